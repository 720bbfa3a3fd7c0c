//! Timeline recorder: plays and waits on a frame cursor.

use crate::{
    animation::anim::Anim,
    animation::ease::Ease,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Placement, Rect, Vec2},
    foundation::error::{ReelError, ReelResult},
    foundation::math::point_at_fraction,
    scene::color::{BLACK, Color},
    scene::mobject::{Layout, Mobject, union_rects},
    timeline::animate::{Animation, MobjectId, Play},
    timeline::model::{Clip, ClipProps, Composition, RevealStyle, SegmentMark},
};

#[derive(Clone, Debug)]
struct Entry {
    mobject: Mobject,
    /// Placement after the last recorded animation.
    placement: Placement,
    /// Index of the open clip while on the surface.
    live: Option<usize>,
}

/// Records a presentation as clips on a frame timeline.
///
/// Objects are registered with [`Scene::add`] and only appear once a play introduces them.
/// Every play starts at the cursor and advances it by its duration.
#[derive(Debug)]
pub struct Scene {
    fps: Fps,
    canvas: Canvas,
    background: Color,
    cursor: u64,
    entries: Vec<Entry>,
    clips: Vec<Clip>,
    segments: Vec<SegmentMark>,
    open: Option<(String, u64)>,
}

impl Scene {
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            background: BLACK,
            cursor: 0,
            entries: Vec::new(),
            clips: Vec::new(),
            segments: Vec::new(),
            open: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Current frame cursor.
    pub fn cursor(&self) -> FrameIndex {
        FrameIndex(self.cursor)
    }

    /// Register `mobject` without showing it.
    pub fn add(&mut self, mobject: Mobject) -> MobjectId {
        let id = MobjectId(self.entries.len() as u32);
        self.entries.push(Entry {
            mobject,
            placement: Placement::IDENTITY,
            live: None,
        });
        id
    }

    fn entry(&self, id: MobjectId) -> ReelResult<&Entry> {
        self.entries
            .get(id.0 as usize)
            .ok_or_else(|| ReelError::animation(format!("unknown mobject id {}", id.0)))
    }

    /// Registered mobject in its original layout.
    pub fn mobject(&self, id: MobjectId) -> ReelResult<&Mobject> {
        Ok(&self.entry(id)?.mobject)
    }

    /// Bounding box at the cursor, after all recorded motion.
    pub fn bbox(&self, id: MobjectId) -> ReelResult<Rect> {
        let e = self.entry(id)?;
        Ok(e.placement.apply_rect(e.mobject.bbox()))
    }

    pub fn is_on_surface(&self, id: MobjectId) -> bool {
        self.entries
            .get(id.0 as usize)
            .is_some_and(|e| e.live.is_some())
    }

    /// Names of the objects currently on the surface.
    pub fn on_surface(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.live.is_some())
            .map(|e| e.mobject.name.as_str())
            .collect()
    }

    /// Advance the cursor without animating.
    pub fn wait(&mut self, secs: f64) -> ReelResult<()> {
        if !(secs.is_finite() && secs >= 0.0) {
            return Err(ReelError::animation("wait duration must be finite and >= 0"));
        }
        self.cursor += self.fps.secs_to_frames_round(secs);
        Ok(())
    }

    /// Record a play starting at the cursor.
    pub fn play(&mut self, play: Play) -> ReelResult<()> {
        if play.animations.is_empty() {
            return Err(ReelError::animation("play has no animations"));
        }
        if !(play.run_time.is_finite() && play.run_time > 0.0) {
            return Err(ReelError::animation("play run_time must be > 0"));
        }
        let mut seen = Vec::new();
        for id in play.animations.iter().flat_map(Animation::targets) {
            self.entry(id)?;
            if seen.contains(&id) {
                return Err(ReelError::animation(format!(
                    "'{}' is animated twice in one play",
                    self.entries[id.0 as usize].mobject.name
                )));
            }
            seen.push(id);
        }

        let n = self.fps.secs_to_frames_round(play.run_time).max(1);
        let start = self.cursor;
        for anim in &play.animations {
            self.apply(anim, start, n, play.rate)?;
        }
        self.cursor += n;
        tracing::debug!(
            start,
            frames = n,
            verbs = ?play.animations.iter().map(Animation::verb).collect::<Vec<_>>(),
            "play"
        );
        Ok(())
    }

    fn apply(&mut self, anim: &Animation, start: u64, n: u64, rate: Ease) -> ReelResult<()> {
        match anim {
            Animation::Write(id) | Animation::Create(id) => {
                let style = if matches!(anim, Animation::Write(_)) {
                    RevealStyle::Write
                } else {
                    RevealStyle::Create
                };
                let mut reveal = Anim::constant(0.0);
                reveal.push_transition(FrameIndex(0), 0.0, FrameIndex(n), 1.0, rate)?;
                let placement = Anim::constant(self.entry(*id)?.placement);
                self.introduce(*id, anim, start, placement, Anim::constant(1.0), reveal, style)
            }
            Animation::FadeIn(id) => {
                let mut opacity = Anim::constant(0.0);
                opacity.push_transition(FrameIndex(0), 0.0, FrameIndex(n), 1.0, rate)?;
                let placement = Anim::constant(self.entry(*id)?.placement);
                self.introduce(
                    *id,
                    anim,
                    start,
                    placement,
                    opacity,
                    Anim::constant(1.0),
                    RevealStyle::Create,
                )
            }
            Animation::FadeOut(id) => {
                let (clip, local) = self.live_clip(*id, anim, start)?;
                let props = &mut self.clips[clip].props;
                let from = props.opacity.final_value()?;
                props
                    .opacity
                    .push_transition(local, from, FrameIndex(local.0 + n), 0.0, rate)?;
                self.retire(*id, start + n);
                Ok(())
            }
            Animation::ReplacementTransform { from, to } => {
                self.replacement_transform(anim, from, to, start, n, rate)
            }
            Animation::Shift { id, delta } => self.translate(*id, anim, *delta, start, n, rate),
            Animation::MoveTo { id, point } => {
                let delta = *point - self.bbox(*id)?.center();
                self.translate(*id, anim, delta, start, n, rate)
            }
            Animation::MoveAlongPath { id, path } => {
                let (clip, local) = self.live_clip(*id, anim, start)?;
                let base = self.entries[id.0 as usize].placement;
                let c0 = self.bbox(*id)?.center();
                let at = |f: f64| {
                    point_at_fraction(path, f)
                        .map(|p| base.then(Placement::translation(p - c0)))
                        .ok_or_else(|| ReelError::layout("move-along path is empty"))
                };
                let placement = &mut self.clips[clip].props.placement;
                let mut prev = at(rate.apply(0.0))?;
                for k in 0..n {
                    let next = at(rate.apply((k + 1) as f64 / n as f64))?;
                    placement.push_transition(
                        FrameIndex(local.0 + k),
                        prev,
                        FrameIndex(local.0 + k + 1),
                        next,
                        Ease::Linear,
                    )?;
                    prev = next;
                }
                self.entries[id.0 as usize].placement = prev;
                Ok(())
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn introduce(
        &mut self,
        id: MobjectId,
        anim: &Animation,
        start: u64,
        placement: Anim<Placement>,
        opacity: Anim<f64>,
        reveal: Anim<f64>,
        reveal_style: RevealStyle,
    ) -> ReelResult<()> {
        let entry = self.entry(id)?;
        if entry.live.is_some() {
            return Err(ReelError::animation(format!(
                "{} of '{}': already on the surface",
                anim.verb(),
                entry.mobject.name
            )));
        }
        if self.open.is_none() && !self.segments.is_empty() {
            return Err(ReelError::animation(format!(
                "{} of '{}' outside any segment",
                anim.verb(),
                entry.mobject.name
            )));
        }

        let index = self.clips.len();
        let clip = Clip {
            id: format!("c{index}:{}", entry.mobject.name),
            mobject: entry.mobject.clone(),
            range: FrameRange {
                start: FrameIndex(start),
                end: FrameIndex(start),
            },
            props: ClipProps {
                placement,
                opacity,
                reveal,
                reveal_style,
            },
        };
        self.clips.push(clip);
        let e = &mut self.entries[id.0 as usize];
        e.live = Some(index);
        if let Ok(p) = self.clips[index].props.placement.final_value() {
            e.placement = p;
        }
        Ok(())
    }

    /// Open clip of `id` and the clip-local frame of `start`.
    fn live_clip(
        &self,
        id: MobjectId,
        anim: &Animation,
        start: u64,
    ) -> ReelResult<(usize, FrameIndex)> {
        let entry = self.entry(id)?;
        let clip = entry.live.ok_or_else(|| {
            ReelError::animation(format!(
                "{} of '{}': not on the surface",
                anim.verb(),
                entry.mobject.name
            ))
        })?;
        let local = start - self.clips[clip].range.start.0;
        Ok((clip, FrameIndex(local)))
    }

    fn retire(&mut self, id: MobjectId, end: u64) {
        let e = &mut self.entries[id.0 as usize];
        if let Some(clip) = e.live.take() {
            self.clips[clip].range.end = FrameIndex(end);
        }
    }

    fn translate(
        &mut self,
        id: MobjectId,
        anim: &Animation,
        delta: Vec2,
        start: u64,
        n: u64,
        rate: Ease,
    ) -> ReelResult<()> {
        let (clip, local) = self.live_clip(id, anim, start)?;
        let from = self.entries[id.0 as usize].placement;
        let to = from.then(Placement::translation(delta));
        self.clips[clip]
            .props
            .placement
            .push_transition(local, from, FrameIndex(local.0 + n), to, rate)?;
        self.entries[id.0 as usize].placement = to;
        Ok(())
    }

    fn replacement_transform(
        &mut self,
        anim: &Animation,
        from: &[MobjectId],
        to: &[MobjectId],
        start: u64,
        n: u64,
        rate: Ease,
    ) -> ReelResult<()> {
        if from.is_empty() || to.is_empty() {
            return Err(ReelError::animation(
                "ReplacementTransform needs objects on both sides",
            ));
        }
        let src = union_rects(
            from.iter()
                .map(|id| self.bbox(*id))
                .collect::<ReelResult<Vec<_>>>()?,
        );
        let dst = union_rects(
            to.iter()
                .map(|id| self.bbox(*id))
                .collect::<ReelResult<Vec<_>>>()?,
        );
        let forward = Placement::mapping(src, dst);
        let backward = Placement::mapping(dst, src);

        for id in from {
            let (clip, local) = self.live_clip(*id, anim, start)?;
            let p = self.entries[id.0 as usize].placement;
            let end = FrameIndex(local.0 + n);
            let props = &mut self.clips[clip].props;
            props
                .placement
                .push_transition(local, p, end, p.then(forward), rate)?;
            let o = props.opacity.final_value()?;
            props.opacity.push_transition(local, o, end, 0.0, rate)?;
            self.retire(*id, start + n);
        }

        for id in to {
            let p = self.entry(*id)?.placement;
            let mut placement = Anim::constant(p);
            placement.push_transition(FrameIndex(0), p.then(backward), FrameIndex(n), p, rate)?;
            let mut opacity = Anim::constant(0.0);
            opacity.push_transition(FrameIndex(0), 0.0, FrameIndex(n), 1.0, rate)?;
            self.introduce(
                *id,
                anim,
                start,
                placement,
                opacity,
                Anim::constant(1.0),
                RevealStyle::Create,
            )?;
        }
        Ok(())
    }

    /// Open a named segment at the cursor. The surface must be empty.
    pub fn begin_segment(&mut self, label: impl Into<String>) -> ReelResult<()> {
        let label = label.into();
        if let Some((open, _)) = &self.open {
            return Err(ReelError::validation(format!(
                "cannot begin segment '{label}': segment '{open}' is still open"
            )));
        }
        let leftovers = self.on_surface();
        if !leftovers.is_empty() {
            return Err(ReelError::validation(format!(
                "cannot begin segment '{label}': objects on the surface: {}",
                leftovers.join(", ")
            )));
        }
        self.open = Some((label, self.cursor));
        Ok(())
    }

    /// Close the open segment. Fails when objects remain on the surface.
    pub fn end_segment(&mut self) -> ReelResult<SegmentMark> {
        let Some((label, start)) = self.open.take() else {
            return Err(ReelError::validation("no segment is open"));
        };
        let leftovers = self.on_surface();
        if !leftovers.is_empty() {
            return Err(ReelError::validation(format!(
                "segment '{label}' ended with objects on the surface: {}",
                leftovers.join(", ")
            )));
        }
        let mark = SegmentMark {
            label,
            range: FrameRange::new(FrameIndex(start), FrameIndex(self.cursor))?,
        };
        self.segments.push(mark.clone());
        Ok(mark)
    }

    /// Close the timeline. Objects still on the surface stay until the last frame.
    pub fn finish(mut self) -> ReelResult<Composition> {
        if let Some((label, _)) = &self.open {
            return Err(ReelError::validation(format!(
                "segment '{label}' was never ended"
            )));
        }
        if self.cursor == 0 {
            return Err(ReelError::validation("timeline is empty"));
        }
        for e in &mut self.entries {
            if let Some(clip) = e.live.take() {
                self.clips[clip].range.end = FrameIndex(self.cursor);
            }
        }
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            background: self.background,
            duration: FrameIndex(self.cursor),
            clips: self.clips,
            segments: self.segments,
        };
        comp.validate()?;
        Ok(comp)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scene.rs"]
mod tests;
