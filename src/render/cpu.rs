use std::sync::Arc;

use crate::{
    eval::evaluator::EvaluatedFrame,
    foundation::error::{ReelError, ReelResult},
    render::backend::{FrameRGBA, RenderSettings},
    render::fonts::{build_fontdb, usvg_options},
    render::svg::frame_svg,
    timeline::model::Composition,
};

/// CPU rasterizer: compiles each frame to SVG and renders it with resvg.
pub struct CpuBackend {
    opts: usvg::Options<'static>,
}

impl CpuBackend {
    /// Backend with a freshly scanned font database.
    pub fn new(settings: &RenderSettings) -> Self {
        Self::with_fontdb(build_fontdb(settings))
    }

    /// Backend sharing an already built font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            opts: usvg_options(fontdb),
        }
    }

    /// Font database used for text.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.opts.fontdb)
    }

    /// Rasterize one evaluated frame over the composition background.
    pub fn render_frame(
        &mut self,
        comp: &Composition,
        eval: &EvaluatedFrame,
    ) -> ReelResult<FrameRGBA> {
        let canvas = comp.canvas;
        let svg = frame_svg(comp, eval, canvas)?;
        let tree = usvg::Tree::from_str(&svg, &self.opts).map_err(|e| {
            ReelError::render(format!("parse svg for frame {}: {e}", eval.frame.0))
        })?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| ReelError::render("failed to allocate frame pixmap"))?;
        let [r, g, b, a] = comp.background.to_rgba8();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
