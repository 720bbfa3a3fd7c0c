use std::ffi::OsString;
use std::io::{Read, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, flatten_premul_over_bg_to_opaque_rgba8};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// x264 constant rate factor; lower is higher quality.
    pub crf: u8,
    /// x264 speed preset.
    pub preset: String,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            crf: 18,
            preset: "medium".to_owned(),
        }
    }
}

/// Command line for a silent libx264 MP4 fed with raw RGBA frames on stdin.
pub fn encoder_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(32);
    let mut push = |s: &str| args.push(s.into());

    push(if opts.overwrite { "-y" } else { "-n" });
    for s in ["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba", "-s"] {
        push(s);
    }
    push(&format!("{}x{}", cfg.width, cfg.height));
    // rational input rate goes before -i
    push("-r");
    push(&format!("{}/{}", cfg.fps.num, cfg.fps.den));
    for s in ["-i", "pipe:0", "-an", "-c:v", "libx264", "-tune", "animation", "-preset"] {
        push(s);
    }
    push(&opts.preset);
    push("-crf");
    push(&opts.crf.to_string());
    for s in ["-pix_fmt", "yuv420p", "-movflags", "+faststart"] {
        push(s);
    }
    args.push(opts.out_path.clone().into_os_string());
    args
}

struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> ReelResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReelError::render(format!("could not start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        // ffmpeg blocks if its stderr pipe fills up, so drain it on the side.
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        if stdin.is_none() {
            return Err(ReelError::render("ffmpeg stdin is not piped"));
        }
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> ReelResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ReelError::render("ffmpeg input already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| ReelError::render(format!("ffmpeg stopped accepting frames: {e}")))
    }

    fn finish(mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| ReelError::render(format!("waiting for ffmpeg: {e}")))?;
        let log = match self.stderr.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| ReelError::render("ffmpeg log reader panicked"))?
                .map_err(|e| ReelError::render(format!("reading ffmpeg log: {e}")))?,
            None => Vec::new(),
        };
        if status.success() {
            return Ok(());
        }
        Err(ReelError::render(format!(
            "ffmpeg failed ({status}): {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// Streams frames into a system `ffmpeg` producing a silent H.264 MP4.
///
/// Frames arrive premultiplied and are flattened over the composition background first, since
/// rawvideo rgba input is read as straight alpha.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            scratch: Vec::new(),
            last_idx: None,
        }
    }

    fn check_config(&self, cfg: &SinkConfig) -> ReelResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(ReelError::validation("mp4 output needs a non-zero fps"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation("mp4 output needs a non-empty canvas"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(ReelError::validation(format!(
                "yuv420p needs even dimensions, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::validation(format!(
                "'{}' exists and overwrite is off",
                self.opts.out_path.display()
            )));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.check_config(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(ReelError::render("ffmpeg was not found on PATH"));
        }

        tracing::info!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            crf = self.opts.crf,
            "encoding mp4"
        );
        self.encoder = Some(Encoder::spawn(encoder_args(&cfg, &self.opts))?);
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(ReelError::render("mp4 sink received a frame before begin"));
        };
        if self.last_idx.is_some_and(|last| idx <= last) {
            return Err(ReelError::render(format!(
                "mp4 sink received frame {} out of order",
                idx.0
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(ReelError::validation(format!(
                "frame is {}x{}, mp4 is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, cfg.bg_rgba)?;
        encoder.write(&self.scratch)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ReelError::render("mp4 sink ended before begin"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::info!(out = %self.opts.out_path.display(), "mp4 written");
        Ok(())
    }
}

/// Create the parent directory of `path` when missing.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    use anyhow::Context as _;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
