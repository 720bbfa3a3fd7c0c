use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Absolute 0-based frame index in composition timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Return `true` when `other` lies entirely inside this range.
    pub fn covers(self, other: FrameRange) -> bool {
        self.start.0 <= other.start.0 && other.end.0 <= self.end.0
    }

    /// Return `true` when both ranges share at least one frame.
    pub fn overlaps(self, other: FrameRange) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }

    /// Last frame inside the range, `None` for empty ranges.
    pub fn last(self) -> Option<FrameIndex> {
        if self.is_empty() {
            None
        } else {
            Some(FrameIndex(self.end.0 - 1))
        }
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Convert seconds to the nearest whole frame count.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Bytes needed for one tightly packed RGBA8 frame.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Per-axis scale followed by a translation, in scene units.
///
/// `p' = scale * p + translate`, component-wise. Interpolating two placements component-wise
/// interpolates the bounding boxes they produce, which is what morphs rely on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Translation applied after scaling.
    pub translate: Vec2,
    /// Per-axis scale factors.
    pub scale: Vec2,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    /// No-op placement.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Pure translation.
    pub fn translation(delta: Vec2) -> Self {
        Self {
            translate: delta,
            ..Self::IDENTITY
        }
    }

    /// Placement that maps `from` onto `to`.
    ///
    /// Degenerate axes (zero extent) keep scale 1 and only align centers on that axis.
    pub fn mapping(from: Rect, to: Rect) -> Self {
        fn axis(src_min: f64, src_len: f64, dst_min: f64, dst_len: f64) -> (f64, f64) {
            if src_len.abs() < 1e-9 || dst_len.abs() < 1e-9 {
                let src_mid = src_min + src_len * 0.5;
                let dst_mid = dst_min + dst_len * 0.5;
                return (1.0, dst_mid - src_mid);
            }
            let s = dst_len / src_len;
            (s, dst_min - s * src_min)
        }

        let (sx, tx) = axis(from.x0, from.width(), to.x0, to.width());
        let (sy, ty) = axis(from.y0, from.height(), to.y0, to.height());
        Self {
            translate: Vec2::new(tx, ty),
            scale: Vec2::new(sx, sy),
        }
    }

    /// Apply `self` first, then `next`.
    pub fn then(self, next: Placement) -> Self {
        Self {
            translate: Vec2::new(
                next.scale.x * self.translate.x + next.translate.x,
                next.scale.y * self.translate.y + next.translate.y,
            ),
            scale: Vec2::new(self.scale.x * next.scale.x, self.scale.y * next.scale.y),
        }
    }

    /// Map a point.
    pub fn apply(self, p: Point) -> Point {
        Point::new(
            self.scale.x * p.x + self.translate.x,
            self.scale.y * p.y + self.translate.y,
        )
    }

    /// Map a rectangle (scale factors may be negative only in theory; bounds are re-sorted).
    pub fn apply_rect(self, r: Rect) -> Rect {
        Rect::from_points(self.apply(r.origin()), self.apply(Point::new(r.x1, r.y1)))
    }

    /// Equivalent affine transform in scene space.
    pub fn to_affine(self) -> Affine {
        Affine::new([
            self.scale.x,
            0.0,
            0.0,
            self.scale.y,
            self.translate.x,
            self.translate.y,
        ])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
