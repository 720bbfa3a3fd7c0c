use super::*;
use crate::foundation::core::{Canvas, Fps, Point};
use crate::scene::color::WHITE;
use crate::scene::shapes::dot;
use crate::timeline::animate::{Animation, Play};
use crate::timeline::scene::Scene;

// a: written over frames 0..10, held, faded over 30..40; b: faded in over 10..20
fn comp() -> Composition {
    let mut s = Scene::new(Fps::new(10, 1).unwrap(), Canvas::new(64, 36).unwrap());
    let a = s.add(dot(Point::ZERO, 0.1, WHITE).named("a"));
    let b = s.add(dot(Point::new(1.0, 0.0), 0.1, WHITE).named("b"));
    s.play(Play::new(Animation::Write(a))).unwrap();
    s.play(Play::new(Animation::FadeIn(b))).unwrap();
    s.wait(1.0).unwrap();
    s.play(Play::all([Animation::FadeOut(a), Animation::FadeOut(b)]))
        .unwrap();
    s.wait(1.0).unwrap();
    s.finish().unwrap()
}

#[test]
fn unrevealed_and_finished_clips_are_skipped() {
    let comp = comp();
    assert!(Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap().items.is_empty());
    assert_eq!(Evaluator::eval_frame(&comp, FrameIndex(5)).unwrap().items.len(), 1);
    // b is introduced at frame 10 with zero opacity
    assert_eq!(Evaluator::eval_frame(&comp, FrameIndex(10)).unwrap().items.len(), 1);
    assert_eq!(Evaluator::eval_frame(&comp, FrameIndex(15)).unwrap().items.len(), 2);
    assert!(Evaluator::eval_frame(&comp, FrameIndex(45)).unwrap().items.is_empty());
}

#[test]
fn items_follow_introduction_order() {
    let comp = comp();
    let f = Evaluator::eval_frame(&comp, FrameIndex(25)).unwrap();
    let ids: Vec<_> = f.items.iter().map(|i| i.clip).collect();
    assert_eq!(ids, [0, 1]);
    assert_eq!(f.items[0].reveal, 1.0);
    assert_eq!(f.items[1].opacity, 1.0);
}

#[test]
fn out_of_bounds_frames_are_rejected() {
    let comp = comp();
    let err = Evaluator::eval_frame(&comp, comp.duration).unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)));
}

#[test]
fn last_settled_frame_skips_fades() {
    let comp = comp();
    let whole = FrameRange::new(FrameIndex(0), comp.duration).unwrap();
    let f = Evaluator::last_settled_frame(&comp, whole).unwrap().unwrap();
    assert!((20..=30).contains(&f.0), "{f:?}");

    let tail = FrameRange::new(FrameIndex(40), comp.duration).unwrap();
    assert_eq!(Evaluator::last_settled_frame(&comp, tail).unwrap(), None);
}
