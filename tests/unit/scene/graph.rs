use super::*;
use crate::scene::color::YELLOW;
use kurbo::ParamCurve as _;

fn bridge() -> Graph {
    Graph::new(
        [
            ("A", Point::new(-4.0, 0.0)),
            ("B", Point::new(4.0, 0.0)),
            ("Finance", Point::new(0.0, 0.0)),
        ],
        [("A", "Finance"), ("Finance", "B")],
    )
    .unwrap()
    .radius(0.6)
    .color(YELLOW)
}

#[test]
fn edge_path_runs_center_to_center() {
    let g = bridge();
    let p = g.edge_path("A", "Finance").unwrap();
    let seg = p.segments().next().unwrap();
    assert_eq!(seg.eval(0.0), Point::new(-4.0, 0.0));
    assert_eq!(seg.eval(1.0), Point::new(0.0, 0.0));
}

#[test]
fn undirected_edges_accept_either_orientation() {
    let g = bridge();
    assert!(g.edge_path("B", "Finance").is_ok());
    assert!(matches!(
        g.edge_path("A", "B"),
        Err(ReelError::Layout(_))
    ));
    assert!(g.edge_path("A", "Nowhere").is_err());
}

#[test]
fn directed_edges_are_one_way() {
    let g = Graph::new(
        [("Agri", Point::new(-4.0, 2.0)), ("Manuf", Point::new(-2.0, -2.0))],
        [("Agri", "Manuf")],
    )
    .unwrap()
    .directed();
    assert!(g.edge_path("Agri", "Manuf").is_ok());
    assert!(g.edge_path("Manuf", "Agri").is_err());
}

#[test]
fn unknown_and_duplicate_nodes_are_rejected() {
    let unknown = Graph::new([("A", Point::ZERO)], [("A", "B")]);
    assert!(matches!(unknown, Err(ReelError::Layout(_))));
    let dup = Graph::new(
        [("A", Point::ZERO), ("A", Point::new(1.0, 0.0))],
        Vec::<(&str, &str)>::new(),
    );
    assert!(dup.is_err());
}

#[test]
fn mobject_draws_edges_under_nodes() {
    let g = bridge();
    let m = g.to_mobject(&TextLayoutEngine::without_fonts()).unwrap();
    // two edges, then disc + label per node
    assert_eq!(m.prims.len(), 2 + 3 * 2);
    assert!(matches!(m.prims[0], Primitive::Path(_)));
    assert!(matches!(m.prims[3], Primitive::Text(_)));
    let bb = m.bbox();
    assert!((bb.x0 + 4.6).abs() < 1e-3 && (bb.x1 - 4.6).abs() < 1e-3);
}

#[test]
fn directed_edges_stop_at_node_rims() {
    let g = Graph::new(
        [("P", Point::new(0.0, 0.0)), ("Q", Point::new(4.0, 0.0))],
        [("P", "Q")],
    )
    .unwrap()
    .radius(0.5)
    .directed();
    let m = g.to_mobject(&TextLayoutEngine::without_fonts()).unwrap();
    let shaft = m.prims[0].bbox();
    let tip = m.prims[1].bbox();
    assert!((shaft.x0 - 0.5).abs() < 1e-9);
    assert!((tip.x1 - 3.5).abs() < 1e-9);
}
