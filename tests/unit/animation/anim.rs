use super::*;

fn ctx(frame: u64) -> SampleCtx {
    SampleCtx {
        frame: FrameIndex(frame),
        clip_local: FrameIndex(frame),
    }
}

#[test]
fn constant_samples_everywhere() {
    let a = Anim::constant(0.25);
    assert_eq!(a.sample(ctx(0)).unwrap(), 0.25);
    assert_eq!(a.sample(ctx(1000)).unwrap(), 0.25);
    assert_eq!(a.final_value().unwrap(), 0.25);
}

#[test]
fn transition_promotes_constant_and_holds_before_start() {
    let mut a = Anim::constant(1.0);
    a.push_transition(FrameIndex(10), 1.0, FrameIndex(20), 0.0, Ease::Linear)
        .unwrap();
    assert_eq!(a.sample(ctx(0)).unwrap(), 1.0);
    assert_eq!(a.sample(ctx(10)).unwrap(), 1.0);
    assert!((a.sample(ctx(15)).unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(a.sample(ctx(20)).unwrap(), 0.0);
    assert_eq!(a.sample(ctx(99)).unwrap(), 0.0);
    assert_eq!(a.final_value().unwrap(), 0.0);
}

#[test]
fn back_to_back_transitions_share_a_key() {
    let mut a = Anim::constant(0.0);
    a.push_transition(FrameIndex(0), 0.0, FrameIndex(10), 1.0, Ease::Linear)
        .unwrap();
    a.push_transition(FrameIndex(10), 1.0, FrameIndex(20), 3.0, Ease::Linear)
        .unwrap();
    let Anim::Keyframes(kf) = &a else {
        panic!("expected keyframes");
    };
    assert_eq!(kf.keys.len(), 3);
    assert!((a.sample(ctx(15)).unwrap() - 2.0).abs() < 1e-12);
    a.validate().unwrap();
}

#[test]
fn overlapping_transition_is_rejected() {
    let mut a = Anim::constant(0.0);
    a.push_transition(FrameIndex(0), 0.0, FrameIndex(10), 1.0, Ease::Linear)
        .unwrap();
    assert!(
        a.push_transition(FrameIndex(5), 1.0, FrameIndex(12), 0.0, Ease::Linear)
            .is_err()
    );
}

#[test]
fn eased_transition_uses_start_key_ease() {
    let mut a = Anim::constant(0.0);
    a.push_transition(FrameIndex(0), 0.0, FrameIndex(10), 1.0, Ease::Smooth)
        .unwrap();
    let v = a.sample(ctx(2)).unwrap();
    assert!((v - Ease::Smooth.apply(0.2)).abs() < 1e-12);
    assert!(v < 0.2);
}

#[test]
fn placement_lerp_is_componentwise() {
    let a = Placement::IDENTITY;
    let b = Placement {
        translate: Vec2::new(2.0, -4.0),
        scale: Vec2::new(3.0, 1.0),
    };
    let m = <Placement as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(m.translate, Vec2::new(1.0, -2.0));
    assert_eq!(m.scale, Vec2::new(2.0, 1.0));
}

#[test]
fn unsorted_keys_fail_validation() {
    let kf = Keyframes {
        keys: vec![
            Keyframe {
                frame: FrameIndex(5),
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                frame: FrameIndex(1),
                value: 1.0,
                ease: Ease::Linear,
            },
        ],
    };
    assert!(kf.validate().is_err());
    assert!(Keyframes::<f64> { keys: vec![] }.validate().is_err());
}
