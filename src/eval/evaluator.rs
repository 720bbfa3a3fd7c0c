use crate::{
    animation::anim::SampleCtx,
    foundation::core::{FrameIndex, FrameRange, Placement},
    foundation::error::{ReelError, ReelResult},
    timeline::model::{Clip, Composition, RevealStyle},
};

/// Everything visible on one frame, in draw order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    pub frame: FrameIndex,
    pub items: Vec<DrawItem>,
}

/// Sampled state of one visible clip.
#[derive(Clone, Debug, serde::Serialize)]
pub struct DrawItem {
    /// Index into `Composition::clips`.
    pub clip: usize,
    pub clip_id: String,
    pub placement: Placement,
    pub opacity: f64, // clamped to 0..1
    pub reveal: f64,  // clamped to 0..1
    pub reveal_style: RevealStyle,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        comp.validate()?;
        if frame.0 >= comp.duration.0 {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, comp.duration.0
            )));
        }

        let mut items = Vec::new();
        for (index, clip) in comp.clips.iter().enumerate() {
            if !clip.range.contains(frame) {
                continue;
            }
            let item = eval_clip(index, clip, frame)?;
            // Fully transparent or unrevealed clips draw nothing.
            if item.opacity > 0.0 && item.reveal > 0.0 {
                items.push(item);
            }
        }

        Ok(EvaluatedFrame { frame, items })
    }

    /// Last frame of `range` where something is visible and every item is fully shown.
    pub fn last_settled_frame(
        comp: &Composition,
        range: FrameRange,
    ) -> ReelResult<Option<FrameIndex>> {
        let end = range.end.0.min(comp.duration.0);
        for f in (range.start.0..end).rev() {
            let eval = Self::eval_frame(comp, FrameIndex(f))?;
            let settled = eval
                .items
                .iter()
                .all(|i| i.opacity >= 1.0 && i.reveal >= 1.0);
            if settled && !eval.items.is_empty() {
                return Ok(Some(FrameIndex(f)));
            }
        }
        Ok(None)
    }
}

fn eval_clip(index: usize, clip: &Clip, frame: FrameIndex) -> ReelResult<DrawItem> {
    let ctx = SampleCtx {
        frame,
        clip_local: FrameIndex(frame.0 - clip.range.start.0),
    };

    let placement = clip.props.placement.sample(ctx)?;
    if !(placement.scale.x.is_finite() && placement.scale.y.is_finite())
        || !(placement.translate.x.is_finite() && placement.translate.y.is_finite())
    {
        return Err(ReelError::evaluation(format!(
            "clip '{}' has a non-finite placement at frame {}",
            clip.id, frame.0
        )));
    }

    Ok(DrawItem {
        clip: index,
        clip_id: clip.id.clone(),
        placement,
        opacity: clip.props.opacity.sample(ctx)?.clamp(0.0, 1.0),
        reveal: clip.props.reveal.sample(ctx)?.clamp(0.0, 1.0),
        reveal_style: clip.props.reveal_style,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
