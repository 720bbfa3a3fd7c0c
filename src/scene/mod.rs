pub mod axes;
pub mod color;
pub mod graph;
pub mod markup;
pub mod mobject;
pub mod shapes;
pub mod text_layout;
