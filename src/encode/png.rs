use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, flatten_premul_over_bg_to_opaque_rgba8};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Writes every pushed frame as `<dir>/<prefix><index:06>.png`.
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    bg_rgba: [u8; 4],
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            bg_rgba: [0, 0, 0, 255],
            written: 0,
        }
    }

    /// File name prefix (default `frame_`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path the frame `idx` is written to.
    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}{:06}.png", self.prefix, idx.0))
    }

    /// Number of files written since `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frames directory '{}'", self.dir.display()))?;
        self.bg_rgba = cfg.bg_rgba;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        write_png(&self.path_for(idx), frame, self.bg_rgba)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

/// Write one frame as an opaque PNG, flattening alpha over `bg_rgba`.
pub fn write_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> ReelResult<()> {
    let mut opaque = vec![0u8; frame.data.len()];
    if frame.premultiplied {
        flatten_premul_over_bg_to_opaque_rgba8(&mut opaque, &frame.data, bg_rgba)?;
    } else {
        opaque.copy_from_slice(&frame.data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, opaque).ok_or_else(|| {
        ReelError::validation(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;
    ensure_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
