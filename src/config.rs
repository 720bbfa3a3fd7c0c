//! Render configuration: quality presets plus explicit overrides, loaded from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::presentation::Director;
use crate::render::backend::RenderSettings;
use crate::scene::color::{BLACK, Color};
use crate::scene::text_layout::TextLayoutEngine;
use crate::session::render_session::RenderSessionOpts;

/// Resolution and frame-rate presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 854x480 at 15 fps.
    Low,
    /// 1280x720 at 30 fps.
    #[default]
    Medium,
    /// 1920x1080 at 60 fps.
    High,
    /// 2560x1440 at 60 fps.
    Production,
}

impl Quality {
    /// `(width, height, fps)` of the preset.
    pub fn preset(self) -> (u32, u32, u32) {
        match self {
            Self::Low => (854, 480, 15),
            Self::Medium => (1280, 720, 30),
            Self::High => (1920, 1080, 60),
            Self::Production => (2560, 1440, 60),
        }
    }
}

/// Everything needed to record and render the presentation.
///
/// Every field is optional in JSON; unset size and rate fields fall back to the quality preset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub quality: Quality,
    pub fps: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: Option<Color>,
    /// Extra `.ttf`/`.otf`/`.ttc` files loaded on top of the system fonts.
    pub fonts_dir: Option<PathBuf>,
    pub parallel: bool,
    pub threads: Option<usize>,
    pub chunk_size: usize,
    pub static_frame_elision: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            fps: None,
            width: None,
            height: None,
            background: None,
            fonts_dir: None,
            parallel: false,
            threads: None,
            chunk_size: 64,
            static_frame_elision: true,
        }
    }
}

impl RenderConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        tracing::info!(path = %path.display(), quality = ?cfg.quality, "render config loaded");
        Ok(cfg)
    }

    /// Frame rate after applying overrides.
    pub fn fps(&self) -> ReelResult<Fps> {
        let (_, _, preset) = self.quality.preset();
        Fps::new(self.fps.unwrap_or(preset), 1)
    }

    /// Output size after applying overrides.
    pub fn canvas(&self) -> ReelResult<Canvas> {
        let (w, h, _) = self.quality.preset();
        Canvas::new(self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Background fill; black unless overridden.
    pub fn background(&self) -> Color {
        self.background.unwrap_or(BLACK)
    }

    /// Check every resolved value.
    pub fn validate(&self) -> ReelResult<()> {
        self.fps()?;
        self.canvas()?;
        if self.threads == Some(0) {
            return Err(ReelError::validation("threads must be >= 1 when set"));
        }
        if self.chunk_size == 0 {
            return Err(ReelError::validation("chunk_size must be >= 1"));
        }
        if let Some(dir) = &self.fonts_dir
            && !dir.is_dir()
        {
            return Err(ReelError::validation(format!(
                "fonts_dir '{}' is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }

    /// Session options derived from this config.
    pub fn session_opts(&self) -> RenderSessionOpts {
        RenderSessionOpts {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
            static_frame_elision: self.static_frame_elision,
            settings: self.render_settings(),
            ..RenderSessionOpts::default()
        }
    }

    /// Font settings: system fonts plus `fonts_dir`.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            fonts_dir: self.fonts_dir.clone(),
            skip_system_fonts: false,
        }
    }

    /// Director recording at this config's rate, size and background.
    pub fn director(&self) -> ReelResult<Director> {
        self.validate()?;
        self.director_with_fonts(TextLayoutEngine::new(&self.render_settings()))
    }

    /// [`RenderConfig::director`] measuring text with an existing engine.
    pub fn director_with_fonts(&self, fonts: TextLayoutEngine) -> ReelResult<Director> {
        self.validate()?;
        Ok(Director::new(
            self.fps()?,
            self.canvas()?,
            self.background(),
            fonts,
        ))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
