use super::*;
use kurbo::Shape as _;
use crate::scene::color::WHITE;
use crate::scene::markup::SpanStyle;
use crate::scene::text_layout::{LineExtents, TextLayoutEngine};

fn square(name: &str, side: f64) -> Mobject {
    let r = Rect::new(-side / 2.0, -side / 2.0, side / 2.0, side / 2.0);
    Mobject::new(name).with(Primitive::Path(PathPrim {
        path: r.to_path(0.1),
        stroke: Some(Stroke::new(WHITE, 4.0)),
        fill: None,
    }))
}

fn label(text: &str) -> TextRun {
    TextRun::new(
        RichText::plain(text, SpanStyle::default()),
        WHITE,
        48.0,
        TextAlign::Left,
        &TextLayoutEngine::without_fonts(),
    )
    .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn next_to_places_with_buffer() {
    let a = square("a", 2.0);
    let mut b = square("b", 1.0);
    b.next_to(a.bbox(), DOWN, 0.5);
    let bb = b.bbox();
    assert!(close(bb.y1, -1.5));
    assert!(close(bb.center().x, 0.0));

    b.next_to(a.bbox(), RIGHT, 0.25);
    let bb = b.bbox();
    assert!(close(bb.x0, 1.25));
    assert!(close(bb.center().y, 0.0));
}

#[test]
fn next_to_aligned_edge_lines_up_left_sides() {
    let a = square("a", 4.0);
    let mut b = square("b", 1.0);
    b.next_to_aligned(a.bbox(), DOWN, 0.2, LEFT);
    assert!(close(b.bbox().x0, a.bbox().x0));
}

#[test]
fn to_edge_respects_margin_and_keeps_other_axis() {
    let mut a = square("a", 2.0);
    a.shift(Vec2::new(0.0, -1.0));
    a.to_edge(UP, 1.5);
    let bb = a.bbox();
    assert!(close(bb.y1, FRAME_HEIGHT / 2.0 - 1.5));
    assert!(close(bb.center().x, 0.0));

    a.to_edge(LEFT, 0.5);
    assert!(close(a.bbox().x0, -FRAME_WIDTH / 2.0 + 0.5));
}

#[test]
fn arrange_stacks_and_centers() {
    let mut items = vec![square("a", 1.0), square("b", 1.0), square("c", 1.0)];
    arrange(&mut items, DOWN, 0.5, ORIGIN);
    let c = items.center();
    assert!(close(c.x, 0.0) && close(c.y, 0.0));
    assert!(close(items[0].bbox().y0 - items[1].bbox().y1, 0.5));
    assert!(close(items.bbox().height(), 4.0));
}

#[test]
fn scale_keeps_center_and_scales_text() {
    let mut m = Mobject::new("t").with(Primitive::Text(label("Agri.")));
    m.move_to(Point::new(2.0, 1.0));
    let before = m.bbox();
    m.scale(0.5);
    let after = m.bbox();
    assert!((after.center() - before.center()).hypot() < 1e-9);
    assert!(close(after.width(), before.width() * 0.5));
    let Primitive::Text(t) = &m.prims[0] else {
        panic!("expected text");
    };
    assert!(close(t.font_size, 24.0));
}

#[test]
fn text_metrics_grow_with_lines() {
    let one = label("Financial");
    let two = label("Financial\nSector");
    assert!(two.size().1 > one.size().1);
    assert!(close(two.size().0, one.size().0));
    assert!(close(two.baseline(1) - two.baseline(0), -two.line_height()));
    assert!(close(one.bbox().y1, 0.0));
    assert!(one.baseline(0) < 0.0);
}

#[test]
fn box_follows_measured_extents() {
    let mut t = label("Agri.");
    t.extents = vec![LineExtents {
        left: -0.1,
        right: 2.0,
        ascent: 1.0,
        descent: 0.5,
    }];
    let em = t.em();
    let (w, h) = t.size();
    assert!(close(w, 2.1 * em));
    assert!(close(h, 1.5 * em));
    // overhang to the left of the pen is pulled inside the box
    assert!(close(t.line_x(0), 0.1 * em));
    assert!(close(t.baseline(0), -em));
}

#[test]
fn center_aligned_lines_are_offset() {
    let mut t = label("Upstream\n(e.g., IT)");
    t.align = TextAlign::Center;
    assert!(t.line_x(1) > t.line_x(0));
    assert!(close(t.line_x(0), t.origin.x - t.extents[0].left * t.em()));
}

#[test]
fn overflow_shift_pulls_rects_back_inside() {
    let half_w = FRAME_WIDTH / 2.0;
    let inside = Rect::new(-1.0, -1.0, 1.0, 1.0);
    assert_eq!(frame_overflow_shift(inside, 0.25), Vec2::ZERO);

    let off_right = Rect::new(half_w - 1.0, 0.0, half_w + 0.5, 1.0);
    let by = frame_overflow_shift(off_right, 0.25);
    assert!(close(by.x, -0.75));
    assert!(close(by.y, 0.0));

    let mut m = square("low", 2.0);
    m.shift(Vec2::new(0.0, -FRAME_HEIGHT / 2.0));
    let by = frame_overflow_shift(m.bbox(), 0.5);
    m.shift(by);
    assert!(close(m.bbox().y0, -FRAME_HEIGHT / 2.0 + 0.5));
    assert!(close(m.bbox().center().x, 0.0));
}

#[test]
fn fit_width_only_shrinks() {
    let mut m = square("wide", 20.0);
    m.fit_width(10.0);
    assert!(close(m.bbox().width(), 10.0));
    m.fit_width(50.0);
    assert!(close(m.bbox().width(), 10.0));
}

#[test]
fn critical_points() {
    let r = Rect::new(-1.0, -2.0, 3.0, 4.0);
    assert_eq!(critical_point(r, UR), Point::new(3.0, 4.0));
    assert_eq!(critical_point(r, LEFT), Point::new(-1.0, 1.0));
    assert_eq!(critical_point(r, ORIGIN), r.center());
    assert_eq!(union_rects(std::iter::empty()), Rect::ZERO);
}
