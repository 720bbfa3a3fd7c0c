use crate::{
    animation::anim::Anim,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Placement},
    foundation::error::{ReelError, ReelResult},
    scene::color::Color,
    scene::mobject::Mobject,
};

/// A finished, renderable timeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub fps: Fps,
    pub canvas: Canvas,
    pub background: Color,
    pub duration: FrameIndex, // total frames
    /// Clips in introduction order, which is also draw order.
    pub clips: Vec<Clip>,
    pub segments: Vec<SegmentMark>,
}

/// One mobject's stay on the surface.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub id: String,
    pub mobject: Mobject,
    pub range: FrameRange, // timeline placement [start,end)
    pub props: ClipProps,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ClipProps {
    pub placement: Anim<Placement>,
    pub opacity: Anim<f64>, // 0..1 clamped in eval
    /// Draw progress in `[0, 1]`.
    pub reveal: Anim<f64>,
    pub reveal_style: RevealStyle,
}

/// How partial reveal is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RevealStyle {
    /// All primitives drawn together.
    #[default]
    Create,
    /// Primitives drawn one after another with overlap, outlines before fills.
    Write,
}

/// Frame range a named segment occupied.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentMark {
    pub label: String,
    pub range: FrameRange,
}

impl Composition {
    pub fn validate(&self) -> ReelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(ReelError::validation("duration must be > 0 frames"));
        }

        for pair in self.segments.windows(2) {
            if pair[0].range.end.0 > pair[1].range.start.0 {
                return Err(ReelError::validation(format!(
                    "segment '{}' overlaps segment '{}'",
                    pair[0].label, pair[1].label
                )));
            }
        }
        if let Some(last) = self.segments.last()
            && last.range.end.0 > self.duration.0
        {
            return Err(ReelError::validation(format!(
                "segment '{}' exceeds composition duration",
                last.label
            )));
        }

        for clip in &self.clips {
            if clip.range.start.0 > clip.range.end.0 {
                return Err(ReelError::validation(format!(
                    "clip '{}' has invalid range (start > end)",
                    clip.id
                )));
            }
            if clip.range.end.0 > self.duration.0 {
                return Err(ReelError::validation(format!(
                    "clip '{}' range exceeds composition duration",
                    clip.id
                )));
            }
            if !self.segments.is_empty() && self.segment_of(clip.range).is_none() {
                return Err(ReelError::validation(format!(
                    "clip '{}' crosses a segment boundary",
                    clip.id
                )));
            }

            clip.props.placement.validate()?;
            clip.props.opacity.validate()?;
            clip.props.reveal.validate()?;
        }

        Ok(())
    }

    /// Segment that fully contains `range`.
    pub fn segment_of(&self, range: FrameRange) -> Option<&SegmentMark> {
        self.segments.iter().find(|s| s.range.covers(range))
    }

    /// Segment containing frame `f`.
    pub fn segment_at(&self, f: FrameIndex) -> Option<&SegmentMark> {
        self.segments.iter().find(|s| s.range.contains(f))
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
