use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::color::{Color, WHITE};
use crate::scene::mobject::{Layout, Mobject, Stroke, critical_point};
use crate::scene::shapes::{DEFAULT_DOT_RADIUS, DEFAULT_STROKE_WIDTH, dot, line, polyline, tipped_segment};

const TICK_HALF: f64 = 0.1;
const AXIS_TIP_LENGTH: f64 = 0.25;

/// Numeric axis range `[min, max]` with tick `step`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Tick spacing.
    pub step: f64,
}

impl AxisRange {
    /// Create a range; validated when the axes are built.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn validate(self, axis: &str) -> ReelResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(ReelError::layout(format!("{axis} range must have min < max")));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ReelError::layout(format!("{axis} step must be > 0")));
        }
        Ok(())
    }

    fn contains(self, v: f64) -> bool {
        let eps = (self.max - self.min) * 1e-9;
        v >= self.min - eps && v <= self.max + eps
    }

    /// Value where the other axis crosses: zero when in range, else `min`.
    fn crossing(self) -> f64 {
        if self.contains(0.0) { 0.0 } else { self.min }
    }

    fn ticks(self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step + 1e-9).floor() as usize;
        (0..=n).map(|i| self.min + self.step * i as f64).collect()
    }
}

/// Two-dimensional coordinate axes.
///
/// Axes are centered on the origin when built; `shift`/`to_edge` move them and every coordinate
/// mapping with them.
#[derive(Clone, Debug)]
pub struct Axes {
    x: AxisRange,
    y: AxisRange,
    x_length: f64,
    y_length: f64,
    tips: bool,
    offset: Vec2,
    color: Color,
}

impl Axes {
    /// Axes with the given ranges and on-screen lengths.
    pub fn new(x: AxisRange, y: AxisRange, x_length: f64, y_length: f64) -> ReelResult<Self> {
        x.validate("x")?;
        y.validate("y")?;
        if !(x_length > 0.0 && y_length > 0.0) {
            return Err(ReelError::layout("axes lengths must be > 0"));
        }
        Ok(Self {
            x,
            y,
            x_length,
            y_length,
            tips: true,
            offset: Vec2::ZERO,
            color: WHITE,
        })
    }

    /// Toggle arrow tips at the positive ends.
    pub fn tips(mut self, on: bool) -> Self {
        self.tips = on;
        self
    }

    /// Coordinates to scene point.
    pub fn c2p(&self, x: f64, y: f64) -> Point {
        let fx = (x - self.x.min) / (self.x.max - self.x.min);
        let fy = (y - self.y.min) / (self.y.max - self.y.min);
        Point::new(
            (fx - 0.5) * self.x_length + self.offset.x,
            (fy - 0.5) * self.y_length + self.offset.y,
        )
    }

    /// [`Axes::c2p`] that rejects coordinates outside the ranges.
    pub fn checked_c2p(&self, x: f64, y: f64) -> ReelResult<Point> {
        if !self.x.contains(x) || !self.y.contains(y) {
            return Err(ReelError::layout(format!(
                "point ({x}, {y}) is outside the axes ranges"
            )));
        }
        Ok(self.c2p(x, y))
    }

    fn x_axis_span(&self) -> (Point, Point) {
        let y0 = self.y.crossing();
        (self.c2p(self.x.min, y0), self.c2p(self.x.max, y0))
    }

    fn y_axis_span(&self) -> (Point, Point) {
        let x0 = self.x.crossing();
        (self.c2p(x0, self.y.min), self.c2p(x0, self.y.max))
    }

    /// Build the drawable axes: both axis lines, tips and ticks.
    pub fn to_mobject(&self) -> Mobject {
        let stroke = Stroke::new(self.color, DEFAULT_STROKE_WIDTH * 0.5);
        let axis = |(a, b): (Point, Point)| {
            if self.tips {
                tipped_segment(a, b, AXIS_TIP_LENGTH, stroke)
            } else {
                line(a, b, stroke)
            }
        };

        let mut m = Mobject::new("axes")
            .merge(axis(self.x_axis_span()))
            .merge(axis(self.y_axis_span()));

        let (x_cross, y_cross) = (self.x.crossing(), self.y.crossing());
        for v in self.x.ticks() {
            if (v - x_cross).abs() < 1e-12 && self.y.contains(0.0) && self.x.contains(0.0) {
                continue;
            }
            let p = self.c2p(v, y_cross);
            m = m.merge(line(
                p - Vec2::new(0.0, TICK_HALF),
                p + Vec2::new(0.0, TICK_HALF),
                stroke,
            ));
        }
        for v in self.y.ticks() {
            if (v - y_cross).abs() < 1e-12 && self.x.contains(0.0) && self.y.contains(0.0) {
                continue;
            }
            let p = self.c2p(x_cross, v);
            m = m.merge(line(
                p - Vec2::new(TICK_HALF, 0.0),
                p + Vec2::new(TICK_HALF, 0.0),
                stroke,
            ));
        }
        m
    }

    fn axis_rect((a, b): (Point, Point)) -> Rect {
        Rect::from_points(a, b)
    }

    /// Position `label` next to the x axis: `edge` picks the anchor on the axis, `dir` the side.
    pub fn place_x_label(&self, label: &mut Mobject, edge: Vec2, dir: Vec2, buff: f64) {
        let anchor = critical_point(Self::axis_rect(self.x_axis_span()), edge);
        label.next_to_point(anchor, dir, buff);
    }

    /// Position `label` next to the y axis.
    pub fn place_y_label(&self, label: &mut Mobject, edge: Vec2, dir: Vec2, buff: f64) {
        let anchor = critical_point(Self::axis_rect(self.y_axis_span()), edge);
        label.next_to_point(anchor, dir, buff);
    }

    /// Polyline through the samples with a dot on every vertex.
    pub fn plot_line_graph(
        &self,
        samples: impl IntoIterator<Item = (f64, f64)>,
        style: LineGraphStyle,
    ) -> ReelResult<LineGraph> {
        let samples: Vec<(f64, f64)> = samples.into_iter().collect();
        if samples.len() < 2 {
            return Err(ReelError::layout("line graph needs at least two samples"));
        }
        let points = samples
            .iter()
            .map(|&(x, y)| self.checked_c2p(x, y))
            .collect::<ReelResult<Vec<_>>>()?;

        let mut m = polyline(&points, Stroke::new(style.line_color, style.stroke_width));
        for p in &points {
            m = m.merge(dot(*p, style.dot_radius, style.dot_color));
        }
        Ok(LineGraph {
            samples,
            points,
            mobject: m.named("line graph"),
        })
    }
}

impl Layout for Axes {
    fn bbox(&self) -> Rect {
        self.to_mobject().bbox()
    }

    fn shift(&mut self, by: Vec2) {
        self.offset += by;
    }
}

/// Styling for [`Axes::plot_line_graph`].
#[derive(Clone, Copy, Debug)]
pub struct LineGraphStyle {
    /// Polyline color.
    pub line_color: Color,
    /// Polyline width in stroke points.
    pub stroke_width: f64,
    /// Vertex dot color.
    pub dot_color: Color,
    /// Vertex dot radius.
    pub dot_radius: f64,
}

impl LineGraphStyle {
    /// Line and dots in one color.
    pub fn new(color: Color) -> Self {
        Self {
            line_color: color,
            stroke_width: DEFAULT_STROKE_WIDTH * 0.5,
            dot_color: color,
            dot_radius: DEFAULT_DOT_RADIUS,
        }
    }

    /// Separate vertex dot color.
    pub fn dot_color(mut self, color: Color) -> Self {
        self.dot_color = color;
        self
    }
}

/// A plotted series: the exact samples, their scene points and the drawable.
#[derive(Clone, Debug)]
pub struct LineGraph {
    /// Samples in plot order.
    pub samples: Vec<(f64, f64)>,
    /// Scene point of each sample.
    pub points: Vec<Point>,
    /// Drawable polyline plus vertex dots.
    pub mobject: Mobject,
}

impl LineGraph {
    /// Scene point of the last sample.
    pub fn end_point(&self) -> Point {
        self.points.last().copied().unwrap_or(Point::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/axes.rs"]
mod tests;
