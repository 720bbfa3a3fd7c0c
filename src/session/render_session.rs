use crate::encode::sink::{FrameSink, SinkConfig};
use crate::eval::evaluator::Evaluator;
use crate::eval::fingerprint::{FrameFingerprint, fingerprint_eval};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::CpuBackend;
use crate::render::fonts::build_fontdb;
use crate::timeline::model::Composition;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, mpsc};

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Chunk size used by the render->encode streaming pipeline.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Skip rendering frames whose evaluated state repeats within a chunk.
    pub static_frame_elision: bool,
    /// Bounded channel capacity between render workers and the encoder thread.
    pub channel_capacity: usize,
    /// Font and rasterizer settings.
    pub settings: RenderSettings,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
            channel_capacity: 4,
            settings: RenderSettings::default(),
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames actually rendered (may be < total when static-frame elision is enabled).
    pub frames_rendered: u64,
    /// Frames elided due to static-frame elision.
    pub frames_elided: u64,
}

/// Session-oriented renderer for a recorded composition.
///
/// The font database is scanned once per session and shared by every worker backend.
pub struct RenderSession {
    comp: Composition,
    fontdb: Arc<usvg::fontdb::Database>,
    backend: CpuBackend,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Validate `comp` and prepare a session for it.
    pub fn new(comp: Composition, opts: RenderSessionOpts) -> ReelResult<Self> {
        comp.validate()?;
        let fontdb = build_fontdb(&opts.settings);
        Self::with_fontdb(comp, opts, fontdb)
    }

    /// [`RenderSession::new`] reusing a font database, typically the one text was measured with.
    ///
    /// `opts.settings` is ignored for fonts.
    pub fn with_fontdb(
        comp: Composition,
        opts: RenderSessionOpts,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> ReelResult<Self> {
        comp.validate()?;
        let backend = CpuBackend::with_fontdb(Arc::clone(&fontdb));
        Ok(Self {
            comp,
            fontdb,
            backend,
            opts,
        })
    }

    /// Composition this session renders.
    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    /// Render a single frame.
    pub fn render_frame(&mut self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        if frame.0 >= self.comp.duration.0 {
            return Err(ReelError::validation(
                "render_frame frame must be within composition duration",
            ));
        }
        let eval = Evaluator::eval_frame(&self.comp, frame)?;
        self.backend.render_frame(&self.comp, &eval)
    }

    /// Render the whole composition into `sink`.
    pub fn render_all(&mut self, sink: &mut dyn FrameSink) -> ReelResult<RenderStats> {
        let range = FrameRange::new(FrameIndex(0), self.comp.duration)?;
        self.render_range(range, sink)
    }

    /// Render a frame range and stream frames into a sink.
    ///
    /// The sink receives frames in strictly increasing frame index order. When `parallel` is
    /// enabled, out-of-order worker completion is deterministically reordered at the sink boundary
    /// (bounded channel backpressure).
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ReelResult<RenderStats> {
        if range.is_empty() {
            return Err(ReelError::validation("render_range range must be non-empty"));
        }
        if range.end.0 > self.comp.duration.0 {
            return Err(ReelError::validation(
                "render_range range must be within composition duration",
            ));
        }

        let cfg = SinkConfig {
            width: self.comp.canvas.width,
            height: self.comp.canvas.height,
            fps: self.comp.fps,
            bg_rgba: self.comp.background.to_rgba8(),
        };

        let cap = self.opts.channel_capacity.max(1);
        let bytes_per_frame = (cfg.width as u64)
            .saturating_mul(cfg.height as u64)
            .saturating_mul(4)
            .max(1);
        let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);

        let mut chunk_size = normalized_chunk_size(self.opts.chunk_size).min(max_chunk_by_mem);
        chunk_size = chunk_size.min(range.len_frames());

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };

        tracing::info!(
            start = range.start.0,
            end = range.end.0,
            parallel = self.opts.parallel,
            chunk_size,
            "rendering range"
        );

        // Encoder thread: enforce in-order delivery to the sink regardless of render completion
        // order.
        std::thread::scope(|scope| -> ReelResult<RenderStats> {
            let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
            let range_start = range.start.0;
            let range_end = range.end.0;
            let sink_ref: &mut dyn FrameSink = sink;

            let enc = scope.spawn(move || -> ReelResult<()> {
                sink_ref.begin(cfg)?;

                let mut next = range_start;
                let mut pending = HashMap::<u64, Arc<FrameRGBA>>::new();
                while next < range_end {
                    if let Some(frame) = pending.remove(&next) {
                        sink_ref.push_frame(FrameIndex(next), &frame)?;
                        next += 1;
                        continue;
                    }

                    let msg = rx.recv().map_err(|_| {
                        ReelError::render("encoder channel disconnected unexpectedly")
                    })?;
                    pending.insert(msg.idx.0, msg.frame);
                }

                sink_ref.end()?;
                Ok(())
            });

            let ctx = ChunkCtx {
                comp: &self.comp,
                fontdb: &self.fontdb,
                tx: &tx,
            };
            let mut stats = RenderStats::default();
            let mut produce = || -> ReelResult<()> {
                let mut chunk_start = range_start;
                while chunk_start < range_end {
                    let chunk_end = (chunk_start + chunk_size).min(range_end);
                    let chunk_stats = match (pool.as_ref(), self.opts.static_frame_elision) {
                        (Some(pool), true) => render_chunk_parallel_elided(&ctx, pool, chunk_start, chunk_end)?,
                        (Some(pool), false) => render_chunk_parallel(&ctx, pool, chunk_start, chunk_end)?,
                        (None, elide) => {
                            render_chunk_sequential(&ctx, &mut self.backend, elide, chunk_start, chunk_end)?
                        }
                    };
                    stats.frames_total += chunk_stats.frames_total;
                    stats.frames_rendered += chunk_stats.frames_rendered;
                    stats.frames_elided += chunk_stats.frames_elided;
                    tracing::debug!(chunk_start, chunk_end, "chunk rendered");
                    chunk_start = chunk_end;
                }
                Ok(())
            };
            let produce_res = produce();

            drop(tx);
            let enc_res = enc
                .join()
                .map_err(|_| ReelError::render("encoder thread panicked"))?;

            if let Err(e) = produce_res {
                let _ = enc_res;
                return Err(e);
            }
            enc_res?;
            tracing::info!(
                total = stats.frames_total,
                rendered = stats.frames_rendered,
                elided = stats.frames_elided,
                "range complete"
            );
            Ok(stats)
        })
    }
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: Arc<FrameRGBA>,
}

struct ChunkCtx<'a> {
    comp: &'a Composition,
    fontdb: &'a Arc<usvg::fontdb::Database>,
    tx: &'a mpsc::SyncSender<FrameMsg>,
}

impl ChunkCtx<'_> {
    fn send(&self, idx: u64, frame: Arc<FrameRGBA>) -> ReelResult<()> {
        send_frame(self.tx, idx, frame)
    }

    fn worker(&self) -> CpuBackend {
        CpuBackend::with_fontdb(Arc::clone(self.fontdb))
    }
}

fn send_frame(tx: &mpsc::SyncSender<FrameMsg>, idx: u64, frame: Arc<FrameRGBA>) -> ReelResult<()> {
    tx.send(FrameMsg {
        idx: FrameIndex(idx),
        frame,
    })
    .map_err(|_| ReelError::render("encoder thread is not accepting frames"))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn render_chunk_sequential(
    ctx: &ChunkCtx<'_>,
    backend: &mut CpuBackend,
    elide: bool,
    start: u64,
    end: u64,
) -> ReelResult<RenderStats> {
    let mut stats = RenderStats {
        frames_total: end - start,
        ..RenderStats::default()
    };
    let mut cache = HashMap::<FrameFingerprint, Arc<FrameRGBA>>::new();
    for f in start..end {
        let eval = Evaluator::eval_frame(ctx.comp, FrameIndex(f))?;
        let fp = elide.then(|| fingerprint_eval(&eval));
        if let Some(frame) = fp.and_then(|fp| cache.get(&fp)) {
            stats.frames_elided += 1;
            ctx.send(f, Arc::clone(frame))?;
            continue;
        }

        let frame = Arc::new(backend.render_frame(ctx.comp, &eval)?);
        if let Some(fp) = fp {
            cache.insert(fp, Arc::clone(&frame));
        }
        stats.frames_rendered += 1;
        ctx.send(f, frame)?;
    }
    Ok(stats)
}

fn render_chunk_parallel_elided(
    ctx: &ChunkCtx<'_>,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
) -> ReelResult<RenderStats> {
    let mut uniq = Vec::<u64>::new();
    let mut map = Vec::<usize>::with_capacity((end - start) as usize);
    let mut seen = HashMap::<FrameFingerprint, usize>::new();

    for f in start..end {
        let eval = Evaluator::eval_frame(ctx.comp, FrameIndex(f))?;
        let u = *seen.entry(fingerprint_eval(&eval)).or_insert_with(|| {
            let i = uniq.len();
            uniq.push(f);
            i
        });
        map.push(u);
    }

    let rendered = pool.install(|| {
        uniq.par_iter()
            .enumerate()
            .map_init(
                || ctx.worker(),
                |backend, (i, &f)| -> ReelResult<(usize, Arc<FrameRGBA>)> {
                    let eval = Evaluator::eval_frame(ctx.comp, FrameIndex(f))?;
                    let frame = backend.render_frame(ctx.comp, &eval)?;
                    Ok((i, Arc::new(frame)))
                },
            )
            .collect::<Vec<_>>()
    });

    let mut unique_frames = vec![None::<Arc<FrameRGBA>>; uniq.len()];
    for r in rendered {
        let (i, frame) = r?;
        unique_frames[i] = Some(frame);
    }
    let unique_frames = unique_frames
        .into_iter()
        .map(|x| x.ok_or_else(|| ReelError::render("missing unique rendered frame")))
        .collect::<ReelResult<Vec<_>>>()?;

    for (f, &u) in (start..end).zip(&map) {
        ctx.send(f, Arc::clone(&unique_frames[u]))?;
    }

    let total = end - start;
    let rendered_count = unique_frames.len() as u64;
    Ok(RenderStats {
        frames_total: total,
        frames_rendered: rendered_count,
        frames_elided: total.saturating_sub(rendered_count),
    })
}

fn render_chunk_parallel(
    ctx: &ChunkCtx<'_>,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
) -> ReelResult<RenderStats> {
    let comp = ctx.comp;
    let tx = ctx.tx.clone();
    pool.install(|| {
        (start..end).into_par_iter().try_for_each_init(
            || (ctx.worker(), tx.clone()),
            |(backend, tx), f| -> ReelResult<()> {
                let eval = Evaluator::eval_frame(comp, FrameIndex(f))?;
                let frame = backend.render_frame(comp, &eval)?;
                send_frame(tx, f, Arc::new(frame))
            },
        )
    })?;
    Ok(RenderStats {
        frames_total: end - start,
        frames_rendered: end - start,
        frames_elided: 0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
