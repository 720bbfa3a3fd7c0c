use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::Smooth];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
    }
}

#[test]
fn smooth_is_symmetric_and_monotonic() {
    let e = Ease::Smooth;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-9);
    }
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = e.apply(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn default_is_smooth() {
    assert_eq!(Ease::default(), Ease::Smooth);
}

#[test]
fn smooth_lags_then_leads_linear() {
    assert!(Ease::Smooth.apply(0.2) < 0.2);
    assert!(Ease::Smooth.apply(0.8) > 0.8);
    assert_eq!(Ease::Linear.apply(0.3), 0.3);
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(serde_json::to_string(&Ease::Smooth).unwrap(), "\"smooth\"");
}
