pub mod backend;
pub mod cpu;
pub mod fonts;
pub mod svg;
