use super::*;
use crate::eval::evaluator::Evaluator;
use crate::foundation::core::{Canvas, Fps, FrameIndex, Point};
use crate::scene::color::{BLACK, RED};
use crate::scene::shapes::dot;
use crate::timeline::animate::{Animation, Play};
use crate::timeline::scene::Scene;

fn backend() -> CpuBackend {
    CpuBackend::new(&RenderSettings {
        fonts_dir: None,
        skip_system_fonts: true,
    })
}

fn comp() -> Composition {
    let mut s = Scene::new(Fps::new(10, 1).unwrap(), Canvas::new(160, 90).unwrap())
        .background(BLACK);
    let d = s.add(dot(Point::ZERO, 0.5, RED));
    s.play(Play::new(Animation::FadeIn(d))).unwrap();
    s.wait(1.0).unwrap();
    s.finish().unwrap()
}

#[test]
fn renders_background_and_shapes() {
    let comp = comp();
    let eval = Evaluator::eval_frame(&comp, FrameIndex(15)).unwrap();
    let frame = backend().render_frame(&comp, &eval).unwrap();
    assert_eq!((frame.width, frame.height), (160, 90));
    assert_eq!(frame.data.len(), comp.canvas.rgba_len());
    assert!(frame.premultiplied);

    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
    let [r, g, b, a] = frame.pixel(80, 45).unwrap();
    assert_eq!(a, 255);
    assert!(r > 200 && g < 120 && b < 120);
    assert_eq!(frame.pixel(160, 0), None);
}

#[test]
fn empty_frames_are_plain_background() {
    let comp = comp();
    let eval = Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap();
    assert!(eval.items.is_empty());
    let frame = backend().render_frame(&comp, &eval).unwrap();
    assert!(frame.data.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}
