//! The scripted presentation: nine segments recorded on one [`Scene`].

pub mod closing;
pub mod data;
pub mod findings;
pub mod intro;
pub mod methodology;

use std::sync::Arc;

use crate::foundation::core::{Canvas, Fps, Point};
use crate::foundation::error::ReelResult;
use crate::scene::color::Color;
use crate::scene::mobject::Mobject;
use crate::scene::text_layout::TextLayoutEngine;
use crate::timeline::animate::{MobjectId, Play, fade_out_all};
use crate::timeline::model::Composition;
use crate::timeline::scene::Scene;

/// The nine segments, in presentation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Title,
    ResearchQuestions,
    IoNetwork,
    PushPull,
    Centrality,
    CausativeMatrix,
    RiskCoefficients,
    Conclusions,
    EndScreen,
}

impl SegmentKind {
    /// Every segment in the order it plays.
    pub const ALL: [Self; 9] = [
        Self::Title,
        Self::ResearchQuestions,
        Self::IoNetwork,
        Self::PushPull,
        Self::Centrality,
        Self::CausativeMatrix,
        Self::RiskCoefficients,
        Self::Conclusions,
        Self::EndScreen,
    ];

    /// Stable label stored in segment marks.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ResearchQuestions => "research_questions",
            Self::IoNetwork => "io_network",
            Self::PushPull => "push_pull",
            Self::Centrality => "centrality",
            Self::CausativeMatrix => "causative_matrix",
            Self::RiskCoefficients => "risk_coefficients",
            Self::Conclusions => "conclusions",
            Self::EndScreen => "end_screen",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    fn record(self, stage: &mut Stage) -> ReelResult<()> {
        match self {
            Self::Title => intro::title(stage),
            Self::ResearchQuestions => intro::research_questions(stage),
            Self::IoNetwork => methodology::io_network(stage),
            Self::PushPull => methodology::push_pull(stage),
            Self::Centrality => findings::centrality(stage),
            Self::CausativeMatrix => findings::causative_matrix(stage),
            Self::RiskCoefficients => findings::risk_coefficients(stage),
            Self::Conclusions => closing::conclusions(stage),
            Self::EndScreen => closing::end_screen(stage),
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the script put on screen beyond the composition itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptTrace {
    /// Segments in recording order.
    pub segments: Vec<SegmentKind>,
    /// Every plotted series as `(name, samples)` in plot order.
    pub series: Vec<(String, Vec<(f64, f64)>)>,
    /// Causative marker stops: axes coordinates and the scene point the marker centered on.
    pub marker_stops: Vec<((f64, f64), Point)>,
}

/// Recording surface handed to the segment builders.
pub(crate) struct Stage {
    pub(crate) scene: Scene,
    pub(crate) trace: ScriptTrace,
    fonts: Arc<TextLayoutEngine>,
}

impl Stage {
    /// Text measurement shared by every segment.
    fn fonts(&self) -> Arc<TextLayoutEngine> {
        Arc::clone(&self.fonts)
    }

    fn add(&mut self, m: Mobject) -> MobjectId {
        self.scene.add(m)
    }

    fn add_all(&mut self, ms: impl IntoIterator<Item = Mobject>) -> Vec<MobjectId> {
        ms.into_iter().map(|m| self.scene.add(m)).collect()
    }

    fn play(&mut self, play: Play) -> ReelResult<()> {
        self.scene.play(play)
    }

    fn wait(&mut self, secs: f64) -> ReelResult<()> {
        self.scene.wait(secs)
    }

    /// Fade out everything currently on the surface in one play.
    fn clear(&mut self, ids: &[MobjectId]) -> ReelResult<()> {
        let live: Vec<MobjectId> = ids
            .iter()
            .copied()
            .filter(|id| self.scene.is_on_surface(*id))
            .collect();
        self.play(fade_out_all(live))
    }
}

/// Merge laid-out parts into one object, the way a group is drawn as a unit.
fn group(name: &str, parts: impl IntoIterator<Item = Mobject>) -> Mobject {
    parts
        .into_iter()
        .fold(Mobject::new(name), |acc, part| acc.merge(part))
}

/// Records the whole presentation.
pub struct Director {
    stage: Stage,
}

impl Director {
    /// Director measuring text with `fonts`; render with the same font database.
    pub fn new(fps: Fps, canvas: Canvas, background: Color, fonts: TextLayoutEngine) -> Self {
        Self {
            stage: Stage {
                scene: Scene::new(fps, canvas).background(background),
                trace: ScriptTrace::default(),
                fonts: Arc::new(fonts),
            },
        }
    }

    /// Record all nine segments and return the composition.
    pub fn run(self) -> ReelResult<Composition> {
        self.run_traced().map(|(comp, _)| comp)
    }

    /// [`Director::run`] that also returns the script trace.
    pub fn run_traced(mut self) -> ReelResult<(Composition, ScriptTrace)> {
        for kind in SegmentKind::ALL {
            self.stage.scene.begin_segment(kind.label())?;
            kind.record(&mut self.stage)?;
            let mark = self.stage.scene.end_segment()?;
            tracing::info!(
                segment = kind.label(),
                start = mark.range.start.0,
                end = mark.range.end.0,
                "segment recorded"
            );
            self.stage.trace.segments.push(kind);
        }
        let comp = self.stage.scene.finish()?;
        tracing::info!(
            frames = comp.duration.0,
            secs = comp.duration_secs(),
            clips = comp.clips.len(),
            "presentation recorded"
        );
        Ok((comp, self.stage.trace))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/mod.rs"]
mod tests;
