//! Text measurement.
//!
//! Lines are laid out by usvg against the same font database and resolver the rasterizer uses,
//! so the boxes the layout rules see are the boxes resvg draws.

use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::RenderSettings;
use crate::render::fonts::{build_fontdb, usvg_options};
use crate::render::svg::{FONT_FAMILY, SCRIPT_SCALE, write_text_line};
use crate::scene::markup::{Line, RichText, Script};

// Lines are shaped at this pixel size and stored per em.
const MEASURE_PX: f64 = 100.0;

const NOMINAL_ADVANCE_EM: f64 = 0.55;
const NOMINAL_ASCENT_EM: f64 = 0.75;
const NOMINAL_DESCENT_EM: f64 = 0.25;

/// Extents of one laid-out line in ems, relative to its pen origin on the baseline.
///
/// Covers both the glyph outlines and the font's layout box, whichever reaches further.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineExtents {
    /// Leftmost extent; negative when a glyph overhangs the pen origin.
    pub left: f64,
    /// Rightmost extent.
    pub right: f64,
    /// Height above the baseline.
    pub ascent: f64,
    /// Depth below the baseline.
    pub descent: f64,
}

impl LineExtents {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Shapes caption lines with usvg's text layout.
pub struct TextLayoutEngine {
    opts: usvg::Options<'static>,
}

impl TextLayoutEngine {
    /// Engine with a freshly scanned font database.
    pub fn new(settings: &RenderSettings) -> Self {
        Self::with_fontdb(build_fontdb(settings))
    }

    /// Engine sharing an already built font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        if fontdb.is_empty() {
            tracing::warn!("no font faces loaded; text boxes use nominal metrics");
        }
        Self {
            opts: usvg_options(fontdb),
        }
    }

    /// Engine with no faces at all; every line gets nominal extents.
    ///
    /// Layout stays deterministic across machines, but no text will be drawn.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
    }

    /// Font database used for shaping.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.opts.fontdb)
    }

    /// Whether any font face is available.
    pub fn has_fonts(&self) -> bool {
        !self.opts.fontdb.is_empty()
    }

    /// Extents of every line of `text`.
    pub fn measure(&self, text: &RichText) -> ReelResult<Vec<LineExtents>> {
        text.lines.iter().map(|line| self.measure_line(line)).collect()
    }

    /// Extents of one line. Empty lines measure zero.
    pub fn measure_line(&self, line: &Line) -> ReelResult<LineExtents> {
        if line.spans.iter().all(|s| s.text.is_empty()) {
            return Ok(LineExtents::default());
        }
        if !self.has_fonts() {
            return Ok(nominal_extents(line));
        }

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"><g font-family="{FONT_FAMILY}" font-size="{MEASURE_PX}">"#
        );
        write_text_line(&mut svg, line, 0.0, 0.0, MEASURE_PX);
        svg.push_str("</g></svg>");

        let tree = usvg::Tree::from_str(&svg, &self.opts)
            .map_err(|e| ReelError::render(format!("lay out text '{}': {e}", line.text())))?;
        let root = tree.root();
        if !root.has_children() {
            // Nothing resolved to a glyph, so nothing will be drawn either.
            tracing::debug!(text = %line.text(), "line produced no glyphs");
            return Ok(nominal_extents(line));
        }

        let layout = root.bounding_box();
        let ink = root.stroke_bounding_box();
        Ok(LineExtents {
            left: layout.left().min(ink.left()) as f64 / MEASURE_PX,
            right: layout.right().max(ink.right()) as f64 / MEASURE_PX,
            ascent: -(layout.top().min(ink.top()) as f64) / MEASURE_PX,
            descent: layout.bottom().max(ink.bottom()) as f64 / MEASURE_PX,
        })
    }
}

fn nominal_extents(line: &Line) -> LineExtents {
    let advance: f64 = line
        .spans
        .iter()
        .map(|span| {
            let scale = if span.style.script == Script::Normal {
                1.0
            } else {
                SCRIPT_SCALE
            };
            span.text.chars().count() as f64 * NOMINAL_ADVANCE_EM * scale
        })
        .sum();
    LineExtents {
        left: 0.0,
        right: advance,
        ascent: NOMINAL_ASCENT_EM,
        descent: NOMINAL_DESCENT_EM,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/text_layout.rs"]
mod tests;
