//! Animation verbs and plays.

use crate::{
    animation::ease::Ease,
    foundation::core::{BezPath, Point, Vec2},
};

/// Handle of a mobject registered with a [`crate::timeline::scene::Scene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MobjectId(pub u32);

/// One animation verb applied to scene objects.
#[derive(Clone, Debug)]
pub enum Animation {
    /// Draw strokes one primitive after another, then fill; introduces the object.
    Write(MobjectId),
    /// Draw all primitives together; introduces the object.
    Create(MobjectId),
    /// Fade from transparent; introduces the object.
    FadeIn(MobjectId),
    /// Fade to transparent; removes the object.
    FadeOut(MobjectId),
    /// Morph the `from` group into the `to` group; removes `from`, introduces `to`.
    ReplacementTransform {
        from: Vec<MobjectId>,
        to: Vec<MobjectId>,
    },
    /// Move the object's center along `path`.
    MoveAlongPath { id: MobjectId, path: BezPath },
    /// Translate by `delta`.
    Shift { id: MobjectId, delta: Vec2 },
    /// Translate so the center lands on `point`.
    MoveTo { id: MobjectId, point: Point },
}

impl Animation {
    /// Morph a single object into another.
    pub fn replace(from: MobjectId, to: MobjectId) -> Self {
        Self::ReplacementTransform {
            from: vec![from],
            to: vec![to],
        }
    }

    /// Objects this animation touches.
    pub fn targets(&self) -> Vec<MobjectId> {
        match self {
            Self::Write(id)
            | Self::Create(id)
            | Self::FadeIn(id)
            | Self::FadeOut(id)
            | Self::MoveAlongPath { id, .. }
            | Self::Shift { id, .. }
            | Self::MoveTo { id, .. } => vec![*id],
            Self::ReplacementTransform { from, to } => from.iter().chain(to).copied().collect(),
        }
    }

    /// Verb name for logs and errors.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Write(_) => "Write",
            Self::Create(_) => "Create",
            Self::FadeIn(_) => "FadeIn",
            Self::FadeOut(_) => "FadeOut",
            Self::ReplacementTransform { .. } => "ReplacementTransform",
            Self::MoveAlongPath { .. } => "MoveAlongPath",
            Self::Shift { .. } => "Shift",
            Self::MoveTo { .. } => "MoveTo",
        }
    }
}

/// A batch of animations sharing start frame, run time and rate function.
#[derive(Clone, Debug)]
pub struct Play {
    pub animations: Vec<Animation>,
    /// Seconds; defaults to 1.
    pub run_time: f64,
    pub rate: Ease,
}

impl Play {
    /// Play a single animation.
    pub fn new(animation: Animation) -> Self {
        Self::all([animation])
    }

    /// Play several animations together.
    pub fn all(animations: impl IntoIterator<Item = Animation>) -> Self {
        Self {
            animations: animations.into_iter().collect(),
            run_time: 1.0,
            rate: Ease::Smooth,
        }
    }

    /// Add another animation to the batch.
    pub fn with(mut self, animation: Animation) -> Self {
        self.animations.push(animation);
        self
    }

    pub fn run_time(mut self, secs: f64) -> Self {
        self.run_time = secs;
        self
    }

    pub fn rate(mut self, rate: Ease) -> Self {
        self.rate = rate;
        self
    }
}

/// Fade out every object in `ids` in one play.
pub fn fade_out_all(ids: impl IntoIterator<Item = MobjectId>) -> Play {
    Play::all(ids.into_iter().map(Animation::FadeOut))
}
