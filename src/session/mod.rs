//! Frame and range rendering on top of a finished composition.

pub mod render_session;
