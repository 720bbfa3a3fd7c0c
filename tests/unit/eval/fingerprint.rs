use super::*;
use crate::eval::evaluator::Evaluator;
use crate::foundation::core::{Canvas, Fps, FrameIndex, Point};
use crate::scene::color::WHITE;
use crate::scene::shapes::dot;
use crate::timeline::animate::{Animation, Play};
use crate::timeline::scene::Scene;

fn comp() -> crate::timeline::model::Composition {
    let mut s = Scene::new(Fps::new(10, 1).unwrap(), Canvas::new(64, 36).unwrap());
    let a = s.add(dot(Point::ZERO, 0.1, WHITE));
    s.play(Play::new(Animation::Create(a))).unwrap();
    s.wait(2.0).unwrap();
    s.play(Play::new(Animation::FadeOut(a))).unwrap();
    s.finish().unwrap()
}

fn fp(comp: &crate::timeline::model::Composition, f: u64) -> FrameFingerprint {
    fingerprint_eval(&Evaluator::eval_frame(comp, FrameIndex(f)).unwrap())
}

#[test]
fn held_frames_share_a_fingerprint() {
    let comp = comp();
    assert_eq!(fp(&comp, 12), fp(&comp, 25));
    assert_eq!(fp(&comp, 10), fp(&comp, 29));
}

#[test]
fn animated_frames_differ() {
    let comp = comp();
    assert_ne!(fp(&comp, 3), fp(&comp, 4));
    assert_ne!(fp(&comp, 31), fp(&comp, 32));
    assert_ne!(fp(&comp, 3), fp(&comp, 15));
}
