//! Builders for the primitive visual objects: text, captions, titles, circles, dots, lines,
//! arrows and tables.

use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::color::{Color, WHITE};
use crate::scene::markup::{RichText, SpanStyle};
use crate::scene::mobject::{
    FRAME_WIDTH, Fill, Layout, MED_LARGE_BUFF, MED_SMALL_BUFF, Mobject, PathPrim, Primitive,
    Stroke, TextAlign, TextRun, UP,
};
use crate::scene::text_layout::TextLayoutEngine;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f64 = 48.0;
/// Default stroke width in points.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;
/// Default dot radius in scene units.
pub const DEFAULT_DOT_RADIUS: f64 = 0.08;

const PATH_TOLERANCE: f64 = 1e-3;
const ARROW_STROKE_WIDTH: f64 = 6.0;
const ARROW_TIP_LENGTH: f64 = 0.35;
const ARROW_MAX_TIP_RATIO: f64 = 0.25;

#[derive(Clone, Debug)]
enum Source {
    Plain(String),
    Markup(String),
    Math(String),
}

/// Builder for text objects.
///
/// `plain` takes literal text (`\n` breaks lines); `tex` and `math` take caption markup and fail
/// on malformed input.
#[derive(Clone, Debug)]
pub struct Text {
    source: Source,
    name: Option<String>,
    font_size: f64,
    color: Color,
    italic: bool,
    align: TextAlign,
    highlights: Vec<(String, Color)>,
}

impl Text {
    fn with_source(source: Source, align: TextAlign) -> Self {
        Self {
            source,
            name: None,
            font_size: DEFAULT_FONT_SIZE,
            color: WHITE,
            italic: false,
            align,
            highlights: Vec::new(),
        }
    }

    /// Literal text, left-aligned lines.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::with_source(Source::Plain(text.into()), TextAlign::Left)
    }

    /// Caption markup, centered lines.
    pub fn tex(markup: impl Into<String>) -> Self {
        Self::with_source(Source::Markup(markup.into()), TextAlign::Center)
    }

    /// Caption markup parsed in math mode.
    pub fn math(markup: impl Into<String>) -> Self {
        Self::with_source(Source::Math(markup.into()), TextAlign::Center)
    }

    /// Font size in points.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Base color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Italic slant for the whole text.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Line alignment.
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Color every occurrence of `word`.
    pub fn highlight(mut self, word: impl Into<String>, color: Color) -> Self {
        self.highlights.push((word.into(), color));
        self
    }

    /// Name used in plans and logs (defaults to the text itself).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Measure with `fonts` and lay out the text centered on the origin.
    pub fn build(self, fonts: &TextLayoutEngine) -> ReelResult<Mobject> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ReelError::validation("font size must be > 0"));
        }
        let (mut rich, raw) = match &self.source {
            Source::Plain(s) => (RichText::plain(s, SpanStyle::default()), s.as_str()),
            Source::Markup(s) => (RichText::parse(s)?, s.as_str()),
            Source::Math(s) => (RichText::parse_math(s)?, s.as_str()),
        };
        if self.italic {
            rich.restyle(|s| s.italic = true);
        }
        for (word, color) in &self.highlights {
            rich.colorize(word, *color);
        }

        let name = self.name.unwrap_or_else(|| short_name(raw));
        let run = TextRun::new(rich, self.color, self.font_size, self.align, fonts)?;
        let mut m = Mobject::new(name).with(Primitive::Text(run));
        m.move_to(Point::ZERO);
        Ok(m)
    }
}

fn short_name(raw: &str) -> String {
    let flat: String = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(40) {
        Some((at, _)) => format!("{}...", &flat[..at]),
        None => flat,
    }
}

/// Section title: caption text pinned to the top edge with a full-width underline.
pub fn title(fonts: &TextLayoutEngine, markup: &str) -> ReelResult<Mobject> {
    let mut text = Text::tex(markup)
        .named(format!("title: {markup}"))
        .build(fonts)?;
    text.fit_width(FRAME_WIDTH - 1.0);
    let text_box = text.bbox();
    let half = (FRAME_WIDTH - 2.0) * 0.5;
    let y = text_box.y0 - MED_SMALL_BUFF;
    let underline = line(
        Point::new(text_box.center().x - half, y),
        Point::new(text_box.center().x + half, y),
        Stroke::new(WHITE, DEFAULT_STROKE_WIDTH),
    );
    let mut m = text.merge(underline);
    m.to_edge(UP, MED_LARGE_BUFF);
    Ok(m)
}

/// Builder for circles.
#[derive(Clone, Debug)]
pub struct Circle {
    radius: f64,
    color: Color,
    fill_opacity: f64,
    stroke_width: f64,
}

impl Circle {
    /// Circle of `radius` centered on the origin.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            color: WHITE,
            fill_opacity: 0.0,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Stroke (and fill) color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Fill opacity; zero means no fill.
    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity;
        self
    }

    /// Build at `center`.
    pub fn at(self, center: Point) -> Mobject {
        let fill = (self.fill_opacity > 0.0).then_some(Fill {
            color: self.color,
            opacity: self.fill_opacity,
        });
        Mobject::new("circle").with(Primitive::Path(PathPrim {
            path: kurbo::Circle::new(center, self.radius).to_path(PATH_TOLERANCE),
            stroke: Some(Stroke::new(self.color, self.stroke_width)),
            fill,
        }))
    }
}

/// Filled dot.
pub fn dot(center: Point, radius: f64, color: Color) -> Mobject {
    Mobject::new("dot").with(Primitive::Path(PathPrim {
        path: kurbo::Circle::new(center, radius).to_path(PATH_TOLERANCE),
        stroke: None,
        fill: Some(Fill { color, opacity: 1.0 }),
    }))
}

/// Straight line segment.
pub fn line(from: Point, to: Point, stroke: Stroke) -> Mobject {
    Mobject::new("line").with(Primitive::Path(PathPrim {
        path: segment_path(from, to),
        stroke: Some(stroke),
        fill: None,
    }))
}

/// Open polyline through `points`.
pub fn polyline(points: &[Point], stroke: Stroke) -> Mobject {
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(*p);
        } else {
            path.line_to(*p);
        }
    }
    Mobject::new("polyline").with(Primitive::Path(PathPrim {
        path,
        stroke: Some(stroke),
        fill: None,
    }))
}

pub(crate) fn segment_path(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}

/// Arrow from `start` to `end`, pulled in by `buff` at both ends, with a filled tip.
pub fn arrow(start: Point, end: Point, buff: f64, color: Color) -> ReelResult<Mobject> {
    let d = end - start;
    let len = d.hypot();
    if len <= 2.0 * buff {
        return Err(ReelError::layout(format!(
            "arrow from {start:?} to {end:?} is shorter than its buffers"
        )));
    }
    let u = d / len;
    let a = start + u * buff;
    let b = end - u * buff;
    let shaft_len = len - 2.0 * buff;
    let tip_len = ARROW_TIP_LENGTH.min(ARROW_MAX_TIP_RATIO * shaft_len);
    Ok(tipped_segment(a, b, tip_len, Stroke::new(color, ARROW_STROKE_WIDTH)).named("arrow"))
}

/// Segment `a -> b` whose last `tip_len` units are a filled triangular tip.
pub(crate) fn tipped_segment(a: Point, b: Point, tip_len: f64, stroke: Stroke) -> Mobject {
    let d = b - a;
    let len = d.hypot().max(1e-9);
    let u = d / len;
    let n = Vec2::new(-u.y, u.x);
    let base = b - u * tip_len;
    let half_w = tip_len * 0.5;

    let mut tip = BezPath::new();
    tip.move_to(b);
    tip.line_to(base + n * half_w);
    tip.line_to(base - n * half_w);
    tip.close_path();

    Mobject::new("segment")
        .with(Primitive::Path(PathPrim {
            path: segment_path(a, base),
            stroke: Some(stroke),
            fill: None,
        }))
        .with(Primitive::Path(PathPrim {
            path: tip,
            stroke: None,
            fill: Some(Fill {
                color: stroke.color,
                opacity: 1.0,
            }),
        }))
}

/// Builder for grid tables of text cells.
#[derive(Clone, Debug)]
pub struct Table {
    rows: Vec<Vec<String>>,
    font_size: f64,
    h_buff: f64,
    v_buff: f64,
    outer_lines: bool,
}

impl Table {
    /// Table from row-major cell text.
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
            font_size: DEFAULT_FONT_SIZE,
            h_buff: 1.3,
            v_buff: 0.8,
            outer_lines: false,
        }
    }

    /// Draw the outer border too.
    pub fn include_outer_lines(mut self) -> Self {
        self.outer_lines = true;
        self
    }

    /// Lay out the table centered on the origin.
    pub fn build(self, fonts: &TextLayoutEngine) -> ReelResult<Mobject> {
        let n_rows = self.rows.len();
        let n_cols = self.rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(ReelError::layout("table needs at least one row and column"));
        }
        if let Some(i) = self.rows.iter().position(|r| r.len() != n_cols) {
            return Err(ReelError::layout(format!(
                "table row {i} has {} cells, expected {n_cols}",
                self.rows[i].len()
            )));
        }

        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for row in &self.rows {
            for cell in row {
                cells.push(
                    Text::plain(cell.as_str())
                        .font_size(self.font_size)
                        .named(format!("cell {cell}"))
                        .build(fonts)?,
                );
            }
        }

        let col_w: Vec<f64> = (0..n_cols)
            .map(|j| {
                (0..n_rows)
                    .map(|i| cells[i * n_cols + j].bbox().width())
                    .fold(0.0, f64::max)
            })
            .collect();
        let row_h: Vec<f64> = (0..n_rows)
            .map(|i| {
                (0..n_cols)
                    .map(|j| cells[i * n_cols + j].bbox().height())
                    .fold(0.0, f64::max)
            })
            .collect();

        // Cell pitch includes the buffer; grid lines sit halfway through the buffer.
        let mut col_x = Vec::with_capacity(n_cols + 1);
        let mut x = 0.0;
        for w in &col_w {
            col_x.push(x);
            x += w + self.h_buff;
        }
        col_x.push(x);
        let mut row_y = Vec::with_capacity(n_rows + 1);
        let mut y = 0.0;
        for h in &row_h {
            row_y.push(y);
            y -= h + self.v_buff;
        }
        row_y.push(y);

        let mut m = Mobject::new("table");
        for i in 0..n_rows {
            for j in 0..n_cols {
                let cx = (col_x[j] + col_x[j + 1]) * 0.5;
                let cy = (row_y[i] + row_y[i + 1]) * 0.5;
                let mut cell = cells[i * n_cols + j].clone();
                cell.move_to(Point::new(cx, cy));
                m = m.merge(cell);
            }
        }

        let stroke = Stroke::new(WHITE, DEFAULT_STROKE_WIDTH * 0.75);
        let (left, right) = (col_x[0], col_x[n_cols]);
        let (top, bottom) = (row_y[0], row_y[n_rows]);
        let (first, last_col) = if self.outer_lines {
            (0, n_cols)
        } else {
            (1, n_cols - 1)
        };
        for &x in &col_x[first..=last_col] {
            m = m.merge(line(Point::new(x, top), Point::new(x, bottom), stroke));
        }
        let last_row = if self.outer_lines { n_rows } else { n_rows - 1 };
        for &y in &row_y[first..=last_row] {
            m = m.merge(line(Point::new(left, y), Point::new(right, y), stroke));
        }

        m.move_to(Point::ZERO);
        Ok(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shapes.rs"]
mod tests;
