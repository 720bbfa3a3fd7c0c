use super::*;
use crate::scene::color::{BLUE, GREEN};
use crate::scene::mobject::FRAME_HEIGHT;

fn fonts() -> TextLayoutEngine {
    TextLayoutEngine::without_fonts()
}

#[test]
fn text_builds_centered_and_named() {
    let m = Text::plain("Khan, Li, and Mahsud (2024)")
        .font_size(28.0)
        .build(&fonts())
        .unwrap();
    let c = m.bbox().center();
    assert!(c.x.abs() < 1e-9 && c.y.abs() < 1e-9);
    assert_eq!(m.name, "Khan, Li, and Mahsud (2024)");
}

#[test]
fn long_names_are_shortened() {
    let m = Text::plain("1. How have the financial sector's links to the economy evolved?")
        .build(&fonts())
        .unwrap();
    assert!(m.name.ends_with("..."));
    assert!(m.name.chars().count() <= 43);
}

#[test]
fn tex_rejects_malformed_markup() {
    let err = Text::tex(r"\textbf{oops").build(&fonts()).unwrap_err();
    assert!(matches!(err, ReelError::Markup(_)));
}

#[test]
fn highlight_and_italic_apply_to_spans() {
    let m = Text::plain("2. It is a crucial intermediary.")
        .highlight("intermediary", BLUE)
        .italic()
        .build(&fonts())
        .unwrap();
    let Primitive::Text(run) = &m.prims[0] else {
        panic!("expected text");
    };
    let spans = &run.text.lines[0].spans;
    assert!(spans.iter().all(|s| s.style.italic));
    assert!(
        spans
            .iter()
            .any(|s| s.text == "intermediary" && s.style.color == Some(BLUE))
    );
}

#[test]
fn title_sits_at_top_with_underline() {
    let t = title(&fonts(), "Research Questions").unwrap();
    let bb = t.bbox();
    assert!((bb.y1 - (FRAME_HEIGHT / 2.0 - MED_LARGE_BUFF)).abs() < 1e-9);
    assert_eq!(t.prims.len(), 2);
    assert!((bb.width() - (FRAME_WIDTH - 2.0)).abs() < 1e-6);
}

#[test]
fn arrow_is_shortened_by_buffers() {
    let a = arrow(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 0.2, GREEN).unwrap();
    let bb = a.bbox();
    assert!((bb.x0 - 0.2).abs() < 1e-9);
    assert!((bb.x1 - 3.8).abs() < 1e-9);
    assert_eq!(a.prims.len(), 2);
    assert!(arrow(Point::ZERO, Point::new(0.3, 0.0), 0.2, GREEN).is_err());
}

#[test]
fn circle_fill_only_when_opaque() {
    let c = Circle::new(0.8).color(BLUE).fill_opacity(0.3).at(Point::ZERO);
    let Primitive::Path(p) = &c.prims[0] else {
        panic!("expected path");
    };
    assert!(p.fill.is_some());
    assert!((c.bbox().width() - 1.6).abs() < 1e-3);

    let c = Circle::new(0.6).at(Point::new(4.0, 1.5));
    let Primitive::Path(p) = &c.prims[0] else {
        panic!("expected path");
    };
    assert!(p.fill.is_none());
    assert!((c.center() - Point::new(4.0, 1.5)).hypot() < 1e-3);
}

#[test]
fn table_has_cells_and_grid_lines() {
    let rows = [["", "A", "B"], ["A", "1", "2"], ["B", "3", "4"]];
    let t = Table::new(rows).include_outer_lines().build(&fonts()).unwrap();
    let texts = t
        .prims
        .iter()
        .filter(|p| matches!(p, Primitive::Text(_)))
        .count();
    let lines = t.prims.len() - texts;
    assert_eq!(texts, 9);
    assert_eq!(lines, 4 + 4);

    let inner = Table::new(rows).build(&fonts()).unwrap();
    assert_eq!(inner.prims.len(), 9 + 2 + 2);
    assert!(inner.center().to_vec2().hypot() < 1e-9);
}

#[test]
fn ragged_table_is_rejected() {
    let rows = vec![vec!["a", "b"], vec!["c"]];
    assert!(matches!(
        Table::new(rows).build(&fonts()),
        Err(ReelError::Layout(_))
    ));
}
