use super::*;
use crate::scene::color::{BLUE, YELLOW};
use crate::scene::mobject::{LEFT, UR};

fn years() -> Axes {
    Axes::new(
        AxisRange::new(1995.0, 2020.0, 5.0),
        AxisRange::new(0.0, 0.25, 0.05),
        10.0,
        5.0,
    )
    .unwrap()
}

#[test]
fn c2p_maps_ranges_onto_lengths() {
    let ax = years();
    let lo = ax.c2p(1995.0, 0.0);
    let hi = ax.c2p(2020.0, 0.25);
    assert!((lo.x + 5.0).abs() < 1e-9 && (lo.y + 2.5).abs() < 1e-9);
    assert!((hi.x - 5.0).abs() < 1e-9 && (hi.y - 2.5).abs() < 1e-9);
}

#[test]
fn shifting_moves_coordinate_mapping() {
    let mut ax = years();
    let before = ax.c2p(2005.0, 0.1);
    ax.shift(Vec2::new(0.0, -0.5));
    let after = ax.c2p(2005.0, 0.1);
    assert!((after.y - before.y + 0.5).abs() < 1e-9);
    assert!((after.x - before.x).abs() < 1e-9);
}

#[test]
fn invalid_ranges_are_rejected() {
    let bad = Axes::new(
        AxisRange::new(1.0, 1.0, 0.1),
        AxisRange::new(0.0, 1.0, 0.1),
        4.0,
        4.0,
    );
    assert!(matches!(bad, Err(ReelError::Layout(_))));
    let bad = Axes::new(
        AxisRange::new(0.0, 1.0, 0.0),
        AxisRange::new(0.0, 1.0, 0.1),
        4.0,
        4.0,
    );
    assert!(bad.is_err());
}

#[test]
fn axes_cross_at_range_minimum_when_zero_is_outside() {
    let ax = years().tips(false);
    let m = ax.to_mobject();
    // two axis lines, six x ticks, six y ticks
    assert_eq!(m.prims.len(), 2 + 6 + 6);
    let bb = m.bbox();
    assert!((bb.x0 - (-5.0 - 0.1)).abs() < 1e-9);
}

#[test]
fn centered_axes_skip_the_origin_tick() {
    let ax = Axes::new(
        AxisRange::new(-1.0, 1.0, 0.5),
        AxisRange::new(-1.0, 1.0, 0.5),
        6.0,
        6.0,
    )
    .unwrap()
    .tips(false);
    assert_eq!(ax.to_mobject().prims.len(), 2 + 4 + 4);
    assert!(ax.c2p(0.0, 0.0).to_vec2().hypot() < 1e-12);
}

#[test]
fn line_graph_keeps_samples_and_points() {
    let ax = years();
    let series = [(1995.0, 0.10), (2000.0, 0.12), (2020.0, 0.24)];
    let g = ax
        .plot_line_graph(series, LineGraphStyle::new(BLUE).dot_color(YELLOW))
        .unwrap();
    assert_eq!(g.samples, series.to_vec());
    assert_eq!(g.points.len(), 3);
    assert_eq!(g.end_point(), ax.c2p(2020.0, 0.24));
    // polyline plus one dot per vertex
    assert_eq!(g.mobject.prims.len(), 4);
}

#[test]
fn line_graph_rejects_out_of_range_samples() {
    let ax = years();
    let err = ax
        .plot_line_graph([(1995.0, 0.1), (2021.0, 0.1)], LineGraphStyle::new(BLUE))
        .unwrap_err();
    assert!(matches!(err, ReelError::Layout(_)));
    assert!(
        ax.plot_line_graph([(2000.0, 0.1)], LineGraphStyle::new(BLUE))
            .is_err()
    );
}

#[test]
fn labels_attach_to_axis_ends() {
    let ax = years();
    let mut x_label = Mobject::new("x").with(dot(Point::ZERO, 0.1, BLUE).prims[0].clone());
    ax.place_x_label(&mut x_label, UR, UR, 0.1);
    let end = ax.c2p(2020.0, 0.0);
    assert!(x_label.bbox().x0 > end.x);

    let mut y_label = Mobject::new("y").with(dot(Point::ZERO, 0.1, BLUE).prims[0].clone());
    ax.place_y_label(&mut y_label, LEFT, LEFT, 0.1);
    assert!(y_label.bbox().x1 < ax.c2p(1995.0, 0.0).x);
}
