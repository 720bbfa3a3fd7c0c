use crate::{
    animation::ease::Ease,
    foundation::core::{FrameIndex, Placement, Vec2},
    foundation::error::{ReelError, ReelResult},
};

/// Sampling context provided to animation evaluators.
#[derive(Clone, Copy, Debug)]
pub struct SampleCtx {
    /// Absolute frame index in composition timeline.
    pub frame: FrameIndex,
    /// Clip-local frame index (`frame - clip.range.start`).
    pub clip_local: FrameIndex,
}

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Placement {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// Animated property value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Anim<T> {
    /// Value that never changes.
    Constant(T),
    /// Piecewise animation defined by explicit keyframes.
    Keyframes(Keyframes<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    /// Build a constant animation that always returns `value`.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Sample animation value at the given context.
    pub fn sample(&self, ctx: SampleCtx) -> ReelResult<T> {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf.sample(ctx),
        }
    }

    /// Value at the end of the animation.
    pub fn final_value(&self) -> ReelResult<T> {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf
                .keys
                .last()
                .map(|k| k.value.clone())
                .ok_or_else(|| ReelError::animation("Keyframes has no keys")),
        }
    }

    /// Validate static invariants.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Keyframes(kf) => kf.validate(),
        }
    }

    /// Append a transition from `from` (at `start`) to `to` (at `end`), both clip-local.
    ///
    /// A constant animation is promoted to keyframes, holding its value up to `start`.
    pub fn push_transition(
        &mut self,
        start: FrameIndex,
        from: T,
        end: FrameIndex,
        to: T,
        ease: Ease,
    ) -> ReelResult<()> {
        if let Self::Constant(v) = self {
            let held = v.clone();
            *self = Self::Keyframes(Keyframes {
                keys: vec![Keyframe {
                    frame: FrameIndex(0),
                    value: held,
                    ease: Ease::Linear,
                }],
            });
        }
        let Self::Keyframes(kf) = self else {
            unreachable!("constant promoted above");
        };
        kf.push_transition(start, from, end, to, ease)
    }
}

/// Keyframed animation, keys sorted by clip-local frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keyframes sorted by `frame`.
    pub keys: Vec<Keyframe<T>>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Validate keyframe ordering.
    pub fn validate(&self) -> ReelResult<()> {
        if self.keys.is_empty() {
            return Err(ReelError::animation(
                "Keyframes must have at least one key",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(ReelError::animation(
                "Keyframes keys must be sorted by frame",
            ));
        }
        Ok(())
    }

    /// Sample keyframed value in clip-local time.
    pub fn sample(&self, ctx: SampleCtx) -> ReelResult<T> {
        if self.keys.is_empty() {
            return Err(ReelError::animation("Keyframes has no keys"));
        }

        let f = ctx.clip_local.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        let t = ((f - a.frame.0) as f64) / (denom as f64);
        Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
    }

    fn push_transition(
        &mut self,
        start: FrameIndex,
        from: T,
        end: FrameIndex,
        to: T,
        ease: Ease,
    ) -> ReelResult<()> {
        if start.0 > end.0 {
            return Err(ReelError::animation("transition ends before it starts"));
        }
        if let Some(last) = self.keys.last()
            && last.frame.0 > start.0
        {
            return Err(ReelError::animation(format!(
                "transition at frame {} overlaps a key at frame {}",
                start.0, last.frame.0
            )));
        }

        match self.keys.last_mut() {
            Some(last) if last.frame == start => {
                last.value = from;
                last.ease = ease;
            }
            _ => self.keys.push(Keyframe {
                frame: start,
                value: from,
                ease,
            }),
        }
        self.keys.push(Keyframe {
            frame: end,
            value: to,
            ease: Ease::Linear,
        });
        Ok(())
    }
}

/// One keyframe in a keyframed animation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Clip-local frame index for this key.
    pub frame: FrameIndex,
    /// Value at `frame`.
    pub value: T,
    /// Easing function applied toward the next keyframe.
    pub ease: Ease,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
