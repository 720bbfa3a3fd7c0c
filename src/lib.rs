//! linkage-reel renders a scripted explainer video about "Linkages and Structural Changes in the
//! Chinese Financial Sector, 1996-2018" (Khan, Li and Mahsud, 2024).
//!
//! The pipeline is session-oriented:
//!
//! - Record the presentation with a [`Director`] into a [`Composition`]
//! - Create a [`RenderSession`]
//! - Render single frames or stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
/// Render and recording configuration.
pub mod config;
/// Frame sinks.
pub mod encode;
pub mod eval;
/// The scripted presentation.
pub mod presentation;
/// SVG compilation and rasterization.
pub mod render;
/// Visual objects and layout.
pub mod scene;
/// Session-oriented rendering API.
pub mod session;
/// Timeline recording.
pub mod timeline;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Placement, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::config::{Quality, RenderConfig};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::presentation::{Director, ScriptTrace, SegmentKind};
pub use crate::render::backend::{FrameRGBA, RenderSettings};
pub use crate::timeline::model::{Clip, Composition, SegmentMark};
pub use crate::session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
