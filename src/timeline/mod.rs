pub mod animate;
pub mod model;
pub mod scene;
