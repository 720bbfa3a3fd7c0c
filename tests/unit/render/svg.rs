use super::*;
use crate::eval::evaluator::Evaluator;
use crate::foundation::core::{Fps, FrameIndex};
use crate::scene::color::{RED, WHITE};
use crate::scene::shapes::{Text, dot, segment_path};
use crate::scene::text_layout::TextLayoutEngine;
use crate::timeline::animate::{Animation, Play};
use crate::timeline::scene::Scene;

#[test]
fn numbers_are_compact() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(-0.00001), "0");
    assert_eq!(num(0.125), "0.125");
    assert_eq!(num(100.0), "100");
    assert_eq!(num(-7.11111111), "-7.1111");
}

#[test]
fn path_data_flips_y() {
    let d = path_d(&segment_path(Point::new(1.0, 2.0), Point::new(-3.0, -4.5)));
    assert_eq!(d, "M1 -2 L-3 4.5");
}

#[test]
fn placement_matrix_flips_translation() {
    let p = Placement {
        translate: crate::foundation::core::Vec2::new(2.0, 1.5),
        scale: crate::foundation::core::Vec2::new(0.5, 0.5),
    };
    assert_eq!(matrix(p), "matrix(0.5 0 0 0.5 2 -1.5)");
}

#[test]
fn write_progress_staggers_primitives() {
    assert_eq!(prim_progress(0.3, RevealStyle::Create, 4, 5), 0.3);
    let first = prim_progress(0.3, RevealStyle::Write, 0, 5);
    let last = prim_progress(0.3, RevealStyle::Write, 4, 5);
    assert!(first > last);
    assert_eq!(prim_progress(0.0, RevealStyle::Write, 0, 5), 0.0);
    assert_eq!(prim_progress(1.0, RevealStyle::Write, 4, 5), 1.0);
    // the last primitive finishes exactly at full reveal
    assert!((prim_progress(0.9999999, RevealStyle::Write, 4, 5) - 1.0).abs() < 1e-5);
}

fn comp_with_text() -> Composition {
    let mut s = Scene::new(Fps::new(10, 1).unwrap(), Canvas::new(160, 90).unwrap());
    let t = s.add(
        Text::tex(r"Downstream $>$ Upstream \& $z_{ij}$")
            .color(WHITE)
            .build(&TextLayoutEngine::without_fonts())
            .unwrap(),
    );
    let d = s.add(dot(Point::new(1.0, 1.0), 0.1, RED));
    s.play(Play::all([Animation::Write(t), Animation::Create(d)]))
        .unwrap();
    s.wait(1.0).unwrap();
    s.finish().unwrap()
}

#[test]
fn document_has_viewbox_and_items() {
    let comp = comp_with_text();
    let eval = Evaluator::eval_frame(&comp, FrameIndex(15)).unwrap();
    let svg = frame_svg(&comp, &eval, comp.canvas).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="160" height="90""#));
    assert!(svg.contains(r#"viewBox="-7.1111 -4 14.2222 8""#));
    assert!(svg.contains("&gt;"));
    assert!(svg.contains("&amp;"));
    assert!(svg.contains(r#"font-style="italic""#));
    assert!(svg.contains(r##"fill="#fc6255""##));
    assert!(!svg.contains("clipPath"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn partial_text_reveal_uses_a_clip_rect() {
    let comp = comp_with_text();
    let eval = Evaluator::eval_frame(&comp, FrameIndex(4)).unwrap();
    let svg = frame_svg(&comp, &eval, comp.canvas).unwrap();
    assert!(svg.contains("<clipPath id=\"reveal-0-0\">"));
    assert!(svg.contains(r#"clip-path="url(#reveal-0-0)""#));
}

#[test]
fn missing_clip_is_a_render_error() {
    let comp = comp_with_text();
    let mut eval = Evaluator::eval_frame(&comp, FrameIndex(15)).unwrap();
    eval.items[0].clip = 42;
    assert!(matches!(
        frame_svg(&comp, &eval, comp.canvas),
        Err(ReelError::Render(_))
    ));
}
