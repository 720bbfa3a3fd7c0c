//! The findings segments: centrality, the causative matrix and the risk coefficients.

use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::ReelResult;
use crate::presentation::data::*;
use crate::presentation::{Stage, group};
use crate::scene::axes::{Axes, AxisRange, LineGraph, LineGraphStyle};
use crate::scene::color::{BLUE, BLUE_C, Color, GREEN, GREEN_C, ORANGE, PURPLE, RED, YELLOW};
use crate::scene::graph::Graph;
use crate::scene::mobject::{
    DOWN, FRAME_WIDTH, LARGE_BUFF, LEFT, Layout, MED_LARGE_BUFF, MED_SMALL_BUFF, Mobject, RIGHT,
    SMALL_BUFF, TextAlign, UP, UR, critical_point, frame_overflow_shift,
};
use crate::scene::shapes::{DEFAULT_DOT_RADIUS, Text, dot, title as section_title};
use crate::scene::text_layout::TextLayoutEngine;
use crate::timeline::animate::{Animation, MobjectId, Play};

const AXIS_LABEL_FONT: f64 = 32.0;
const YEARS: AxisRange = AxisRange::new(1995.0, 2020.0, 5.0);
// Both risk panels share the frame, each with its axis labels.
const RISK_AXES_LENGTH: f64 = 5.5;

fn subtitle(fonts: &TextLayoutEngine, text: &str, heading: Rect) -> ReelResult<Mobject> {
    let mut m = Text::plain(text).font_size(32.0).build(fonts)?;
    m.next_to(heading, DOWN, MED_LARGE_BUFF);
    Ok(m)
}

fn top_caption(fonts: &TextLayoutEngine, text: &str) -> ReelResult<Mobject> {
    let mut m = Text::plain(text).font_size(28.0).build(fonts)?;
    m.to_edge(UP, 1.5);
    Ok(m)
}

/// Axes drawable merged with its "Year" label and a y label at the top of the y axis.
fn year_axes(
    fonts: &TextLayoutEngine,
    axes: &Axes,
    y_label: &str,
    y_label_dir: Vec2,
    name: &str,
) -> ReelResult<Mobject> {
    let mut x_label = Text::math("Year").font_size(AXIS_LABEL_FONT).build(fonts)?;
    axes.place_x_label(&mut x_label, UR, UR, SMALL_BUFF);
    let mut y_label = Text::math(y_label).font_size(AXIS_LABEL_FONT).build(fonts)?;
    axes.place_y_label(&mut y_label, UP, y_label_dir, SMALL_BUFF);
    Ok(group(name, [axes.to_mobject(), x_label, y_label]))
}

fn plot(stage: &mut Stage, axes: &Axes, series: Series, style: LineGraphStyle) -> ReelResult<LineGraph> {
    let graph = axes.plot_line_graph(series.samples.iter().copied(), style)?;
    stage
        .trace
        .series
        .push((series.name.to_owned(), graph.samples.clone()));
    Ok(graph)
}

/// Shift that moves `own` next to `target` in direction `dir`.
fn next_to_delta(own: Rect, target: Rect, dir: Vec2, buff: f64) -> Vec2 {
    critical_point(target, dir) - critical_point(own, -dir) + dir * buff
}

pub(crate) fn centrality(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading_m = section_title(&fonts, "Finding 2: Role in the Economic Network")?;
    let heading_box = heading_m.bbox();
    let heading = stage.add(heading_m);
    stage.play(Play::new(Animation::Write(heading)))?;

    let closeness = stage.add(subtitle(&fonts, CLOSENESS_CAPTION, heading_box)?);
    stage.play(Play::new(Animation::Write(closeness)))?;

    let mut axes = Axes::new(YEARS, AxisRange::new(0.0, 20000.0, 5000.0), 10.0, 4.0)?.tips(false);
    axes.shift(DOWN);
    let axes_id = stage.add(year_axes(&fonts, &axes, "Closeness Value", UP, "closeness axes")?);

    let down = plot(stage, &axes, DOWNSTREAM_CLOSENESS, LineGraphStyle::new(GREEN).dot_color(GREEN_C))?;
    let up = plot(stage, &axes, UPSTREAM_CLOSENESS, LineGraphStyle::new(BLUE).dot_color(BLUE_C))?;
    let series_label = |text: &str, color: Color, at: Point| -> ReelResult<Mobject> {
        let mut m = Text::plain(text).font_size(24.0).color(color).build(&fonts)?;
        // Series end near the right edge; shrink into the room left of it.
        m.fit_width(FRAME_WIDTH * 0.5 - at.x - 2.0 * MED_SMALL_BUFF);
        m.next_to_point(at, RIGHT, MED_SMALL_BUFF);
        Ok(m)
    };
    let down_label = series_label(DOWNSTREAM_SERIES_LABEL, GREEN, down.end_point())?;
    let up_label = series_label(UPSTREAM_SERIES_LABEL, BLUE, up.end_point())?;
    let down_graph = stage.add(down.mobject.named(DOWNSTREAM_CLOSENESS.name));
    let up_graph = stage.add(up.mobject.named(UPSTREAM_CLOSENESS.name));
    let down_label = stage.add(down_label);
    let up_label = stage.add(up_label);

    stage.play(Play::new(Animation::Create(axes_id)))?;
    stage.play(Play::all([Animation::Create(down_graph), Animation::Write(down_label)]).run_time(2.0))?;
    stage.play(Play::all([Animation::Create(up_graph), Animation::Write(up_label)]).run_time(2.0))?;

    let mut finding = Text::tex(CLOSENESS_FINDING).font_size(28.0).build(&fonts)?;
    finding.to_edge(DOWN, LARGE_BUFF);
    let finding = stage.add(finding);
    stage.play(Play::new(Animation::Write(finding)))?;
    stage.wait(5.0)?;
    stage.clear(&[closeness, axes_id, down_graph, up_graph, down_label, up_label, finding])?;

    let betweenness = stage.add(subtitle(&fonts, BETWEENNESS_CAPTION, heading_box)?);
    stage.play(Play::new(Animation::Write(betweenness)))?;

    let bridge = Graph::new(BRIDGE_NODES, BRIDGE_EDGES)?
        .color(YELLOW)
        .radius(0.6);
    let bridge_m = bridge.to_mobject(&fonts)?.named("bridge graph");
    let mut path_text = Text::plain(BRIDGE_CAPTION).font_size(24.0).build(&fonts)?;
    path_text.next_to(bridge_m.bbox(), DOWN, MED_SMALL_BUFF);
    let bridge_id = stage.add(bridge_m);
    let path_text = stage.add(path_text);
    stage.play(Play::all([Animation::Create(bridge_id), Animation::Write(path_text)]))?;

    let marker = stage.add(dot(bridge.position("A")?, DEFAULT_DOT_RADIUS, RED).named("transaction marker"));
    stage.play(Play::new(Animation::Create(marker)))?;
    for (a, b) in BRIDGE_EDGES {
        let path = bridge.edge_path(a, b)?;
        stage.play(Play::new(Animation::MoveAlongPath { id: marker, path }).rate(Ease::Linear))?;
    }
    stage.play(Play::new(Animation::FadeOut(marker)))?;

    let mut finding = Text::tex(BETWEENNESS_FINDING).font_size(28.0).build(&fonts)?;
    finding.to_edge(DOWN, LARGE_BUFF);
    let finding = stage.add(finding);
    stage.play(Play::new(Animation::replace(path_text, finding)))?;
    stage.wait(5.0)?;

    stage.clear(&[heading, betweenness, bridge_id, finding])?;
    stage.wait(1.0)
}

fn causative_grid(fonts: &TextLayoutEngine, axes: &Axes) -> ReelResult<Mobject> {
    let mut x_label = Text::math(CAUSATIVE_X_LABEL).font_size(24.0).build(fonts)?;
    // Right-aligned under the positive end of the x axis.
    axes.place_x_label(&mut x_label, RIGHT, DOWN + LEFT, SMALL_BUFF);
    let mut y_label = Text::math(CAUSATIVE_Y_LABEL).font_size(24.0).build(fonts)?;
    let y_axis_x = axes.c2p(0.0, 0.0).x;
    y_label.fit_width(FRAME_WIDTH * 0.5 - y_axis_x - 2.0 * MED_SMALL_BUFF);
    axes.place_y_label(&mut y_label, UP, RIGHT, MED_SMALL_BUFF);

    let colors = [GREEN, BLUE, RED, ORANGE];
    let mut parts = vec![axes.to_mobject(), x_label, y_label];
    for ((text, (x, y)), color) in QUADRANTS.into_iter().zip(colors) {
        let mut q = Text::plain(text)
            .font_size(20.0)
            .color(color)
            .align(TextAlign::Center)
            .build(fonts)?;
        q.move_to(axes.checked_c2p(x, y)?);
        parts.push(q);
    }
    Ok(group("causative grid", parts))
}

fn period_caption(fonts: &TextLayoutEngine, text: &str) -> ReelResult<Mobject> {
    top_caption(fonts, text)
}

pub(crate) fn causative_matrix(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading = stage.add(section_title(
        &fonts,
        "Finding 3: Structural Change (Causative Matrix)",
    )?);
    stage.play(Play::new(Animation::Write(heading)))?;

    let quadrant = AxisRange::new(-1.0, 1.0, 2.0);
    let axes = Axes::new(quadrant, quadrant, 8.0, 6.0)?;
    let grid = stage.add(causative_grid(&fonts, &axes)?);
    stage.play(Play::new(Animation::Create(grid)))?;

    let [first, rest @ ..] = CAUSATIVE_PERIODS;
    let mut caption = stage.add(period_caption(&fonts, first.caption)?);
    stage.play(Play::new(Animation::Write(caption)))?;

    let start = axes.checked_c2p(first.position.0, first.position.1)?;
    let marker_m = dot(start, 0.15, YELLOW).named("S36 marker");
    let mut label_m = Text::plain(MARKER_LABEL).font_size(20.0).build(&fonts)?;
    label_m.next_to(marker_m.bbox(), UR, SMALL_BUFF);
    let marker = stage.add(marker_m);
    let label = stage.add(label_m);
    stage.play(Play::all([Animation::Create(marker), Animation::Write(label)]))?;
    record_stop(stage, first.position, marker)?;
    stage.wait(3.0)?;

    for period in rest {
        let next = stage.add(period_caption(&fonts, period.caption)?);
        stage.play(Play::new(Animation::replace(caption, next)))?;
        caption = next;

        let target = axes.checked_c2p(period.position.0, period.position.1)?;
        let marker_box = stage.scene.bbox(marker)?;
        let moved = marker_box + (target - marker_box.center());
        // The label follows the marker to its new position.
        let delta = next_to_delta(stage.scene.bbox(label)?, moved, UR, SMALL_BUFF);
        stage.play(Play::all([
            Animation::MoveTo { id: marker, point: target },
            Animation::Shift { id: label, delta },
        ]))?;
        record_stop(stage, period.position, marker)?;
        stage.wait(3.0)?;
    }

    let mut finding = Text::tex(CAUSATIVE_FINDING).font_size(28.0).build(&fonts)?;
    finding.fit_width(FRAME_WIDTH - 2.0 * MED_LARGE_BUFF);
    finding.to_edge(DOWN, MED_LARGE_BUFF);
    let finding = stage.add(finding);
    stage.play(Play::new(Animation::Write(finding)))?;
    stage.wait(4.0)?;

    stage.clear(&[heading, grid, marker, label, caption, finding])?;
    stage.wait(1.0)
}

fn record_stop(stage: &mut Stage, coords: (f64, f64), marker: MobjectId) -> ReelResult<()> {
    let center = stage.scene.bbox(marker)?.center();
    tracing::debug!(x = coords.0, y = coords.1, "causative marker stop");
    stage.trace.marker_stops.push((coords, center));
    Ok(())
}

fn risk_panel(
    stage: &mut Stage,
    fonts: &TextLayoutEngine,
    y: AxisRange,
    side: Vec2,
    y_label: &str,
    series: Series,
    color: Color,
    finding: &str,
) -> ReelResult<[MobjectId; 3]> {
    let mut axes = Axes::new(YEARS, y, RISK_AXES_LENGTH, 4.0)?.tips(false);
    axes.to_edge(side, MED_LARGE_BUFF);
    let mut axes_m = year_axes(fonts, &axes, y_label, RIGHT, &format!("{} axes", series.name))?;
    // The labels may hang past the frame; move the whole panel, plot included.
    let inward = frame_overflow_shift(axes_m.bbox(), MED_SMALL_BUFF);
    axes.shift(inward);
    axes_m.shift(inward);
    let graph = plot(stage, &axes, series, LineGraphStyle::new(color))?;
    let mut finding_m = Text::tex(finding).font_size(24.0).build(fonts)?;
    finding_m.next_to(axes.bbox(), DOWN, MED_LARGE_BUFF);

    let axes_id = stage.add(axes_m);
    let graph_id = stage.add(graph.mobject.named(series.name));
    let finding_id = stage.add(finding_m);
    stage.play(Play::new(Animation::Create(axes_id)))?;
    stage.play(Play::new(Animation::Create(graph_id)))?;
    stage.play(Play::new(Animation::Write(finding_id)))?;
    Ok([axes_id, graph_id, finding_id])
}

pub(crate) fn risk_coefficients(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading = stage.add(section_title(&fonts, "Finding 4: Risk and Interdependence")?);
    stage.play(Play::new(Animation::Write(heading)))?;

    let clustering_caption = stage.add(top_caption(&fonts, CLUSTERING_CAPTION)?);
    stage.play(Play::new(Animation::Write(clustering_caption)))?;
    let left = risk_panel(
        stage,
        &fonts,
        AxisRange::new(0.0, 0.08, 0.02),
        LEFT,
        "Clustering",
        FAGIOLO_CLUSTERING,
        RED,
        CLUSTERING_FINDING,
    )?;
    stage.wait(4.0)?;

    let symmetry_caption = stage.add(top_caption(&fonts, SYMMETRY_CAPTION)?);
    stage.play(Play::new(Animation::replace(clustering_caption, symmetry_caption)))?;
    let right = risk_panel(
        stage,
        &fonts,
        AxisRange::new(0.1, 0.35, 0.05),
        RIGHT,
        "Symmetry",
        SYMMETRY,
        PURPLE,
        SYMMETRY_FINDING,
    )?;
    stage.wait(5.0)?;

    let mut all = vec![heading, symmetry_caption];
    all.extend(left);
    all.extend(right);
    stage.clear(&all)?;
    stage.wait(1.0)
}
