//! Methodology segments: from IO tables to networks, and push/pull effects.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::ReelResult;
use crate::presentation::data::*;
use crate::presentation::{Stage, group};
use crate::scene::color::{Color, BLUE, BLUE_C, GREEN, GREEN_C, WHITE, YELLOW};
use crate::scene::graph::Graph;
use crate::scene::mobject::{
    DOWN, FRAME_WIDTH, LEFT, Layout, MED_SMALL_BUFF, Mobject, RIGHT, TextAlign, UP,
};
use crate::scene::shapes::{Circle, Table, Text, arrow, title as section_title};
use crate::scene::text_layout::TextLayoutEngine;
use crate::timeline::animate::{Animation, Play};

const CAPTION_EDGE_BUFF: f64 = 1.5;
const ARROW_BUFF: f64 = 0.2;
const SIDE_CAPTION_BUFF: f64 = 1.0;

fn top_caption(fonts: &TextLayoutEngine, text: &str) -> ReelResult<Mobject> {
    let mut m = Text::plain(text).font_size(30.0).build(fonts)?;
    m.to_edge(UP, CAPTION_EDGE_BUFF);
    Ok(m)
}

pub(crate) fn io_network(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading = stage.add(section_title(&fonts, "Methodology: From Tables to Networks")?);
    stage.play(Play::new(Animation::Write(heading)))?;

    let mut table = Table::new(IO_TABLE).include_outer_lines().build(&fonts)?;
    table.scale(0.5);
    let mut table_desc = Text::tex(IO_TABLE_DESC).build(&fonts)?;
    table_desc.scale(0.7);
    table_desc.next_to(table.bbox(), DOWN, MED_SMALL_BUFF);

    let caption = stage.add(top_caption(&fonts, IO_TABLE_CAPTION)?);
    let table = stage.add(table.named("io table"));
    let table_desc = stage.add(table_desc);

    stage.play(Play::new(Animation::Write(caption)))?;
    stage.play(Play::all([
        Animation::Create(table),
        Animation::Write(table_desc),
    ]))?;
    stage.wait(4.0)?;

    let network = Graph::new(IO_NODES, IO_EDGES)?
        .directed()
        .radius(0.5)
        .color(BLUE)
        .edge_style(WHITE, 2.0)
        .to_mobject(&fonts)?
        .named("io network");
    let mut network_desc = Text::tex(NETWORK_DESC).build(&fonts)?;
    network_desc.scale(0.7);
    network_desc.fit_width(FRAME_WIDTH - 1.0);
    network_desc.next_to(network.bbox(), DOWN, MED_SMALL_BUFF);

    let network_caption = stage.add(top_caption(&fonts, NETWORK_CAPTION)?);
    let network = stage.add(network);
    let network_desc = stage.add(network_desc);

    stage.play(Play::new(Animation::replace(caption, network_caption)))?;
    stage.play(Play::new(Animation::ReplacementTransform {
        from: vec![table, table_desc],
        to: vec![network, network_desc],
    }))?;
    stage.wait(4.0)?;

    stage.clear(&[heading, network_caption, network, network_desc])?;
    stage.wait(1.0)
}

struct Node {
    center: Point,
    radius: f64,
}

impl Node {
    fn left(&self) -> Point {
        Point::new(self.center.x - self.radius, self.center.y)
    }

    fn right(&self) -> Point {
        Point::new(self.center.x + self.radius, self.center.y)
    }
}

fn labelled_circle(
    fonts: &TextLayoutEngine,
    node: &Node,
    color: Color,
    fill_opacity: f64,
    label: &str,
    font_size: f64,
) -> ReelResult<[Mobject; 2]> {
    let circle = Circle::new(node.radius)
        .color(color)
        .fill_opacity(fill_opacity)
        .at(node.center);
    let mut text = Text::plain(label)
        .font_size(font_size)
        .align(TextAlign::Center)
        .build(fonts)?;
    text.move_to(node.center);
    Ok([circle, text])
}

/// Caption pinned to one side, lowered under the diagram, with its description below.
///
/// Each caption keeps to its half of the frame, flush with the outer edge.
fn side_caption(
    fonts: &TextLayoutEngine,
    title: &str,
    color: Color,
    desc: &str,
    side: Vec2,
) -> ReelResult<(Mobject, Mobject)> {
    let half = FRAME_WIDTH * 0.5 - SIDE_CAPTION_BUFF - MED_SMALL_BUFF;
    let mut heading = Text::plain(title).font_size(28.0).color(color).build(fonts)?;
    heading.fit_width(half);
    heading.to_edge(side, SIDE_CAPTION_BUFF);
    heading.shift(DOWN * 2.0);
    let mut body = Text::plain(desc).font_size(24.0).build(fonts)?;
    body.fit_width(half);
    body.next_to_aligned(heading.bbox(), DOWN, MED_SMALL_BUFF, side);
    Ok((heading, body))
}

pub(crate) fn push_pull(stage: &mut Stage) -> ReelResult<()> {
    let fonts = stage.fonts();
    let heading = stage.add(section_title(&fonts, "Finding 1: Intersectoral Linkages")?);
    stage.play(Play::new(Animation::Write(heading)))?;

    let finance = Node {
        center: Point::new(0.0, -0.5),
        radius: 0.8,
    };
    let upstream = Node {
        center: Point::new(-4.0, 1.5),
        radius: 0.6,
    };
    let downstream = Node {
        center: Point::new(4.0, 1.5),
        radius: 0.6,
    };

    let diagram = group(
        "sector diagram",
        [
            labelled_circle(&fonts, &finance, YELLOW, 0.3, FINANCE_LABEL, 24.0)?,
            labelled_circle(&fonts, &upstream, BLUE, 0.0, UPSTREAM_LABEL, 20.0)?,
            labelled_circle(&fonts, &downstream, GREEN, 0.0, DOWNSTREAM_LABEL, 20.0)?,
        ]
        .into_iter()
        .flatten(),
    );
    let diagram = stage.add(diagram);
    stage.play(Play::new(Animation::Create(diagram)))?;

    let (pull_title, pull_desc) = side_caption(&fonts, PULL_TITLE, BLUE_C, PULL_DESC, LEFT)?;
    let pull_arrow = arrow(upstream.right(), finance.left(), ARROW_BUFF, BLUE_C)?;
    let pull_title = stage.add(pull_title);
    let pull_desc = stage.add(pull_desc);
    let pull_arrow = stage.add(pull_arrow.named("pull arrow"));

    stage.play(Play::all([
        Animation::Write(pull_title),
        Animation::Create(pull_arrow),
    ]))?;
    stage.play(Play::new(Animation::Write(pull_desc)))?;
    stage.wait(3.0)?;

    let (push_title, push_desc) = side_caption(&fonts, PUSH_TITLE, GREEN_C, PUSH_DESC, RIGHT)?;
    let push_arrow = arrow(finance.right(), downstream.left(), ARROW_BUFF, GREEN_C)?;
    let push_title = stage.add(push_title);
    let push_desc = stage.add(push_desc);
    let push_arrow = stage.add(push_arrow.named("push arrow"));

    stage.play(Play::all([
        Animation::Write(push_title),
        Animation::Create(push_arrow),
    ]))?;
    stage.play(Play::new(Animation::Write(push_desc)))?;
    stage.wait(4.0)?;

    stage.clear(&[
        heading, diagram, pull_title, pull_desc, pull_arrow, push_title, push_desc, push_arrow,
    ])
}
