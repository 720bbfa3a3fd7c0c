use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.last(), Some(FrameIndex(4)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.last(), None);
}

#[test]
fn frame_range_overlap_and_cover() {
    let a = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    let b = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    let c = FrameRange::new(FrameIndex(2), FrameIndex(8)).unwrap();
    assert!(!a.overlaps(b));
    assert!(a.overlaps(c));
    assert!(a.covers(c));
    assert!(!c.covers(a));
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_round_conversion() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(1.0), 30);
    assert_eq!(fps.secs_to_frames_round(0.49), 15);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_validates_and_sizes_buffers() {
    assert!(Canvas::new(0, 10).is_err());
    let c = Canvas::new(4, 2).unwrap();
    assert_eq!(c.rgba_len(), 32);
}

#[test]
fn premultiply_straight_alpha() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.g, 64);
    assert_eq!(p.b, 0);
    assert_eq!(Rgba8Premul::transparent().a, 0);
}

#[test]
fn placement_mapping_maps_rect_onto_rect() {
    let from = Rect::new(0.0, 0.0, 2.0, 1.0);
    let to = Rect::new(10.0, -1.0, 14.0, 2.0);
    let p = Placement::mapping(from, to);
    let mapped = p.apply_rect(from);
    assert!((mapped.x0 - to.x0).abs() < 1e-9);
    assert!((mapped.y0 - to.y0).abs() < 1e-9);
    assert!((mapped.x1 - to.x1).abs() < 1e-9);
    assert!((mapped.y1 - to.y1).abs() < 1e-9);
}

#[test]
fn placement_mapping_handles_degenerate_axes() {
    let from = Rect::new(0.0, 0.0, 2.0, 0.0);
    let to = Rect::new(4.0, 3.0, 6.0, 3.0);
    let p = Placement::mapping(from, to);
    assert_eq!(p.scale.y, 1.0);
    assert_eq!(p.apply(Point::new(1.0, 0.0)), Point::new(5.0, 3.0));
}

#[test]
fn placement_then_composes_in_order() {
    let a = Placement::translation(Vec2::new(1.0, 0.0));
    let b = Placement {
        translate: Vec2::ZERO,
        scale: Vec2::new(2.0, 2.0),
    };
    let p = Point::new(1.0, 1.0);
    assert_eq!(a.then(b).apply(p), b.apply(a.apply(p)));
    assert_eq!(a.then(b).apply(p), Point::new(4.0, 2.0));
    assert_eq!(Placement::IDENTITY.to_affine(), Affine::IDENTITY);
}
