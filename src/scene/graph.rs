use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::color::{BLACK, BLUE, Color, WHITE};
use crate::scene::mobject::{Fill, Layout, Mobject, PathPrim, Primitive, Stroke};
use crate::scene::shapes::{Circle, Text, line, segment_path, tipped_segment};
use crate::scene::text_layout::TextLayoutEngine;

const LABEL_FONT_SIZE: f64 = 36.0;
const EDGE_TIP_LENGTH: f64 = 0.25;

/// A named node at a fixed scene position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GraphNode {
    /// Node name, also used as its label.
    pub name: String,
    /// Center in scene units.
    pub position: Point,
}

/// Node-link diagram with fixed layout.
///
/// Nodes are filled circles labelled with their names. Edges run center to center under the
/// nodes; directed edges are trimmed at the node rims and carry a tip at the head.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<(usize, usize)>,
    directed: bool,
    radius: f64,
    color: Color,
    edge_color: Color,
    edge_width: f64,
}

impl Graph {
    /// Graph over `nodes` with `edges` given by node name.
    pub fn new<'a>(
        nodes: impl IntoIterator<Item = (&'a str, Point)>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> ReelResult<Self> {
        let mut list: Vec<GraphNode> = Vec::new();
        for (name, position) in nodes {
            if list.iter().any(|n| n.name == name) {
                return Err(ReelError::layout(format!("duplicate graph node '{name}'")));
            }
            list.push(GraphNode {
                name: name.to_owned(),
                position,
            });
        }
        let mut g = Self {
            nodes: list,
            edges: Vec::new(),
            directed: false,
            radius: 0.3,
            color: BLUE,
            edge_color: WHITE,
            edge_width: 4.0,
        };
        for (a, b) in edges {
            let edge = (g.index_of(a)?, g.index_of(b)?);
            if edge.0 == edge.1 {
                return Err(ReelError::layout(format!("graph edge '{a}' -> '{a}' is a loop")));
            }
            g.edges.push(edge);
        }
        Ok(g)
    }

    /// Draw edges as arrows.
    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Node radius.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Node color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Edge color and width in stroke points.
    pub fn edge_style(mut self, color: Color, width_pt: f64) -> Self {
        self.edge_color = color;
        self.edge_width = width_pt;
        self
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    fn index_of(&self, name: &str) -> ReelResult<usize> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .ok_or_else(|| ReelError::layout(format!("unknown graph node '{name}'")))
    }

    /// Center of node `name`.
    pub fn position(&self, name: &str) -> ReelResult<Point> {
        Ok(self.nodes[self.index_of(name)?].position)
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges
            .iter()
            .any(|&e| e == (a, b) || (!self.directed && e == (b, a)))
    }

    /// Center-to-center path of edge `a -> b` (either orientation when undirected).
    pub fn edge_path(&self, a: &str, b: &str) -> ReelResult<BezPath> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        if !self.has_edge(ia, ib) {
            return Err(ReelError::layout(format!("graph has no edge '{a}' -> '{b}'")));
        }
        Ok(segment_path(self.nodes[ia].position, self.nodes[ib].position))
    }

    /// Build the drawable diagram: edges first, then nodes with their labels.
    pub fn to_mobject(&self, fonts: &TextLayoutEngine) -> ReelResult<Mobject> {
        let stroke = Stroke::new(self.edge_color, self.edge_width);
        let mut m = Mobject::new("graph");
        for &(a, b) in &self.edges {
            let (pa, pb) = (self.nodes[a].position, self.nodes[b].position);
            let edge = if self.directed {
                let d = pb - pa;
                let len = d.hypot();
                if len <= 2.0 * self.radius {
                    return Err(ReelError::layout(format!(
                        "graph nodes '{}' and '{}' overlap",
                        self.nodes[a].name, self.nodes[b].name
                    )));
                }
                let u = d / len;
                let (s, e) = (pa + u * self.radius, pb - u * self.radius);
                let tip = EDGE_TIP_LENGTH.min(0.25 * (len - 2.0 * self.radius));
                tipped_segment(s, e, tip, stroke)
            } else {
                line(pa, pb, stroke)
            };
            m = m.merge(edge);
        }

        for node in &self.nodes {
            let mut disc = Circle::new(self.radius)
                .color(self.color)
                .fill_opacity(1.0)
                .at(node.position);
            // solid disc without the rim stroke
            for p in &mut disc.prims {
                if let Primitive::Path(PathPrim { stroke, fill, .. }) = p {
                    *stroke = None;
                    *fill = Some(Fill {
                        color: self.color,
                        opacity: 1.0,
                    });
                }
            }
            let mut label = Text::math(node.name.as_str())
                .font_size(LABEL_FONT_SIZE)
                .color(BLACK)
                .named(format!("label {}", node.name))
                .build(fonts)?;
            label.fit_width(self.radius * 1.6);
            label.move_to(node.position);
            m = m.merge(disc).merge(label);
        }
        Ok(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
