//! Laid-out visual objects in scene units.
//!
//! The scene frame is `FRAME_WIDTH x FRAME_HEIGHT` units, origin at the center, y pointing up.

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::foundation::error::ReelResult;
use crate::scene::color::Color;
use crate::scene::markup::RichText;
use crate::scene::text_layout::{LineExtents, TextLayoutEngine};

/// Scene frame height in units.
pub const FRAME_HEIGHT: f64 = 8.0;
/// Scene frame width in units (16:9).
pub const FRAME_WIDTH: f64 = FRAME_HEIGHT * 16.0 / 9.0;

pub const SMALL_BUFF: f64 = 0.1;
pub const MED_SMALL_BUFF: f64 = 0.25;
pub const MED_LARGE_BUFF: f64 = 0.5;
pub const LARGE_BUFF: f64 = 1.0;

pub const UP: Vec2 = Vec2::new(0.0, 1.0);
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
pub const UR: Vec2 = Vec2::new(1.0, 1.0);
pub const ORIGIN: Vec2 = Vec2::ZERO;

/// Scene units per font point.
pub const FONT_UNIT: f64 = 0.0115;
/// Scene units per stroke-width point.
pub const STROKE_UNIT: f64 = 0.01;

const LINE_HEIGHT_EM: f64 = 1.25;

/// Stroke paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Width in scene units.
    pub width: f64,
}

impl Stroke {
    /// Stroke with a width given in stroke-width points.
    pub fn new(color: Color, width_pt: f64) -> Self {
        Self {
            color,
            width: width_pt * STROKE_UNIT,
        }
    }
}

/// Fill paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    /// Fill color.
    pub color: Color,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A vector path with optional stroke and fill.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PathPrim {
    /// Geometry in scene units.
    pub path: BezPath,
    /// Stroke paint.
    pub stroke: Option<Stroke>,
    /// Fill paint.
    pub fill: Option<Fill>,
}

/// Horizontal alignment of lines inside a text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
}

/// A block of styled text anchored at its top-left corner.
///
/// Line extents are measured once when the run is built and stored in ems, so they stay valid
/// through scaling.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Styled content.
    pub text: RichText,
    /// Base color for spans without an override.
    pub color: Color,
    /// Font size in points.
    pub font_size: f64,
    /// Top-left corner of the text box.
    pub origin: Point,
    /// Line alignment.
    pub align: TextAlign,
    /// Measured extents, one per line.
    pub extents: Vec<LineExtents>,
}

impl TextRun {
    /// Measure `text` with `fonts` and anchor it at the origin.
    pub fn new(
        text: RichText,
        color: Color,
        font_size: f64,
        align: TextAlign,
        fonts: &TextLayoutEngine,
    ) -> ReelResult<Self> {
        let extents = fonts.measure(&text)?;
        Ok(Self {
            text,
            color,
            font_size,
            origin: Point::ZERO,
            align,
            extents,
        })
    }

    /// Em size in scene units.
    pub fn em(&self) -> f64 {
        self.font_size * FONT_UNIT
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f64 {
        self.em() * LINE_HEIGHT_EM
    }

    fn extent(&self, i: usize) -> LineExtents {
        self.extents.get(i).copied().unwrap_or_default()
    }

    /// Width of line `i`.
    pub fn line_width(&self, i: usize) -> f64 {
        self.extent(i).width() * self.em()
    }

    // Top and bottom of the box in ems, relative to the first baseline.
    fn vertical_extent(&self) -> (f64, f64) {
        self.extents
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let drop = i as f64 * LINE_HEIGHT_EM;
                (e.ascent - drop, -e.descent - drop)
            })
            .reduce(|(t0, b0), (t1, b1)| (t0.max(t1), b0.min(b1)))
            .unwrap_or((0.0, 0.0))
    }

    /// Box size `(width, height)`.
    pub fn size(&self) -> (f64, f64) {
        let w = (0..self.extents.len())
            .map(|i| self.line_width(i))
            .fold(0.0, f64::max);
        let (top, bottom) = self.vertical_extent();
        (w, (top - bottom) * self.em())
    }

    /// Baseline y of line `i`.
    pub fn baseline(&self, i: usize) -> f64 {
        let (top, _) = self.vertical_extent();
        self.origin.y - top * self.em() - (i as f64) * self.line_height()
    }

    /// Pen x of line `i` after alignment.
    pub fn line_x(&self, i: usize) -> f64 {
        let pen = self.origin.x - self.extent(i).left * self.em();
        match self.align {
            TextAlign::Left => pen,
            TextAlign::Center => {
                let (w, _) = self.size();
                pen + (w - self.line_width(i)) * 0.5
            }
        }
    }

    /// Bounding box in scene units.
    pub fn bbox(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(
            self.origin.x,
            self.origin.y - h,
            self.origin.x + w,
            self.origin.y,
        )
    }
}

/// Drawing primitive.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Primitive {
    /// Stroked/filled path.
    Path(PathPrim),
    /// Styled text block.
    Text(TextRun),
}

impl Primitive {
    /// Bounding box in scene units (stroke width ignored).
    pub fn bbox(&self) -> Rect {
        match self {
            Self::Path(p) => p.path.bounding_box(),
            Self::Text(t) => t.bbox(),
        }
    }

    fn transform(&mut self, affine: Affine, scale: f64) {
        match self {
            Self::Path(p) => p.path.apply_affine(affine),
            Self::Text(t) => {
                t.origin = affine * t.origin;
                t.font_size *= scale;
            }
        }
    }
}

/// A named, laid-out visual object.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Mobject {
    /// Human-readable name used in logs and plans.
    pub name: String,
    /// Primitives in draw order.
    pub prims: Vec<Primitive>,
}

impl Mobject {
    /// Empty mobject.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prims: Vec::new(),
        }
    }

    /// Append a primitive.
    pub fn with(mut self, prim: Primitive) -> Self {
        self.prims.push(prim);
        self
    }

    /// Append all primitives of `other`, keeping this name.
    pub fn merge(mut self, other: Mobject) -> Self {
        self.prims.extend(other.prims);
        self
    }

    /// Rename.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Uniformly scale about the bounding-box center.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        let c = self.bbox().center();
        let affine =
            Affine::translate(c.to_vec2()) * Affine::scale(factor) * Affine::translate(-c.to_vec2());
        for p in &mut self.prims {
            p.transform(affine, factor);
        }
        self
    }

    /// Scale down (never up) so the width fits in `max_width`.
    pub fn fit_width(&mut self, max_width: f64) -> &mut Self {
        let w = self.bbox().width();
        if w > max_width && w > 0.0 {
            self.scale(max_width / w);
        }
        self
    }
}

/// Geometry that can be positioned with the layout rules.
pub trait Layout {
    /// Bounding box in scene units.
    fn bbox(&self) -> Rect;

    /// Translate by `by`.
    fn shift(&mut self, by: Vec2);

    /// Center of the bounding box.
    fn center(&self) -> Point {
        self.bbox().center()
    }

    /// Point of the bounding box in direction `dir` (components sign-only).
    fn critical_point(&self, dir: Vec2) -> Point {
        critical_point(self.bbox(), dir)
    }

    /// Move so the center lands on `p`.
    fn move_to(&mut self, p: Point) -> &mut Self {
        let c = self.center();
        self.shift(p - c);
        self
    }

    /// Place next to `target` in direction `dir`, `buff` units away.
    fn next_to(&mut self, target: Rect, dir: Vec2, buff: f64) -> &mut Self {
        self.next_to_aligned(target, dir, buff, ORIGIN)
    }

    /// [`Layout::next_to`] with an aligned edge perpendicular to `dir`.
    fn next_to_aligned(&mut self, target: Rect, dir: Vec2, buff: f64, aligned: Vec2) -> &mut Self {
        let target_pt = critical_point(target, dir + aligned);
        let own_pt = self.critical_point(aligned - dir);
        self.shift(target_pt - own_pt + dir * buff);
        self
    }

    /// Place next to a point.
    fn next_to_point(&mut self, target: Point, dir: Vec2, buff: f64) -> &mut Self {
        self.next_to(Rect::from_points(target, target), dir, buff)
    }

    /// Push against the frame edge in direction `dir`, keeping `buff` units of margin.
    fn to_edge(&mut self, dir: Vec2, buff: f64) -> &mut Self {
        let half = Vec2::new(FRAME_WIDTH * 0.5, FRAME_HEIGHT * 0.5);
        let sign = Vec2::new(sign0(dir.x), sign0(dir.y));
        let target = Vec2::new(sign.x * half.x, sign.y * half.y);
        let own = self.critical_point(dir).to_vec2();
        let raw = target - own - dir * buff;
        self.shift(Vec2::new(raw.x * sign.x.abs(), raw.y * sign.y.abs()));
        self
    }
}

fn sign0(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Smallest shift that brings `r` inside the frame shrunk by `margin`.
///
/// Per axis; a rect larger than the shrunk frame gets its low edge pinned.
pub fn frame_overflow_shift(r: Rect, margin: f64) -> Vec2 {
    fn axis(lo: f64, hi: f64, half: f64) -> f64 {
        if lo < -half {
            -half - lo
        } else if hi > half {
            half - hi
        } else {
            0.0
        }
    }
    Vec2::new(
        axis(r.x0, r.x1, FRAME_WIDTH * 0.5 - margin),
        axis(r.y0, r.y1, FRAME_HEIGHT * 0.5 - margin),
    )
}

/// Point of `r` selected by the signs of `dir`.
pub fn critical_point(r: Rect, dir: Vec2) -> Point {
    fn pick(lo: f64, hi: f64, d: f64) -> f64 {
        if d > 0.0 {
            hi
        } else if d < 0.0 {
            lo
        } else {
            (lo + hi) * 0.5
        }
    }
    Point::new(pick(r.x0, r.x1, dir.x), pick(r.y0, r.y1, dir.y))
}

impl Layout for Mobject {
    fn bbox(&self) -> Rect {
        union_rects(self.prims.iter().map(Primitive::bbox))
    }

    fn shift(&mut self, by: Vec2) {
        let affine = Affine::translate(by);
        for p in &mut self.prims {
            p.transform(affine, 1.0);
        }
    }
}

impl Layout for [Mobject] {
    fn bbox(&self) -> Rect {
        union_rects(self.iter().map(Layout::bbox))
    }

    fn shift(&mut self, by: Vec2) {
        for m in self {
            m.shift(by);
        }
    }
}

impl Layout for Vec<Mobject> {
    fn bbox(&self) -> Rect {
        self.as_slice().bbox()
    }

    fn shift(&mut self, by: Vec2) {
        self.as_mut_slice().shift(by);
    }
}

/// Union of rectangles; empty input yields a zero rect at the origin.
pub fn union_rects(rects: impl IntoIterator<Item = Rect>) -> Rect {
    rects
        .into_iter()
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
}

/// Stack `items` in direction `dir` with `buff` gaps, then center the stack on the origin.
///
/// With `aligned` set, every item's edge in that direction lines up with the first item's.
pub fn arrange(items: &mut [Mobject], dir: Vec2, buff: f64, aligned: Vec2) {
    for i in 1..items.len() {
        let (done, rest) = items.split_at_mut(i);
        let prev = done[i - 1].bbox();
        rest[0].next_to_aligned(prev, dir, buff, aligned);
    }
    let c = items.center();
    items.shift(-c.to_vec2());
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mobject.rs"]
mod tests;
