//! Evaluated frame to SVG document.
//!
//! The document's viewBox is the scene frame with y flipped, so every scene point `(x, y)` is
//! written as `(x, -y)`. Clip placements become group matrices in the same flipped space.

use std::fmt::Write as _;

use kurbo::PathEl;

use crate::{
    eval::evaluator::{DrawItem, EvaluatedFrame},
    foundation::core::{BezPath, Canvas, Placement, Point},
    foundation::error::{ReelError, ReelResult},
    foundation::math::trim_path,
    scene::markup::{Line, Script},
    scene::mobject::{FRAME_HEIGHT, FRAME_WIDTH, PathPrim, Primitive, TextRun},
    timeline::model::{Composition, RevealStyle},
};

pub(crate) const FONT_FAMILY: &str = "DejaVu Sans, Helvetica, Arial, sans-serif";
// Fraction of a primitive's window by which the next primitive starts later.
const WRITE_LAG: f64 = 0.1;
const SUB_SHIFT_EM: f64 = 0.25;
const SUPER_SHIFT_EM: f64 = 0.4;
/// Font-size ratio of sub- and superscript spans.
pub(crate) const SCRIPT_SCALE: f64 = 0.7;

/// Compile one evaluated frame into a standalone SVG document of `canvas` pixels.
pub fn frame_svg(comp: &Composition, eval: &EvaluatedFrame, canvas: Canvas) -> ReelResult<String> {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        canvas.width,
        canvas.height,
        num(-FRAME_WIDTH * 0.5),
        num(-FRAME_HEIGHT * 0.5),
        num(FRAME_WIDTH),
        num(FRAME_HEIGHT),
    );

    for item in &eval.items {
        let clip = comp.clips.get(item.clip).ok_or_else(|| {
            ReelError::render(format!("draw item references missing clip {}", item.clip))
        })?;
        write_item(&mut out, item, &clip.mobject.prims);
    }

    out.push_str("</svg>");
    Ok(out)
}

fn write_item(out: &mut String, item: &DrawItem, prims: &[Primitive]) {
    let _ = write!(out, r#"<g transform="{}""#, matrix(item.placement));
    if item.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, num(item.opacity));
    }
    out.push('>');

    let n = prims.len();
    for (i, prim) in prims.iter().enumerate() {
        let t = prim_progress(item.reveal, item.reveal_style, i, n);
        if t <= 0.0 {
            continue;
        }
        match prim {
            Primitive::Path(p) => write_path(out, p, t),
            Primitive::Text(run) => write_text(out, run, t, item.clip, i),
        }
    }
    out.push_str("</g>");
}

/// Draw progress of primitive `i` of `n` at overall reveal `reveal`.
pub(crate) fn prim_progress(reveal: f64, style: RevealStyle, i: usize, n: usize) -> f64 {
    if reveal >= 1.0 {
        return 1.0;
    }
    match style {
        RevealStyle::Create => reveal,
        RevealStyle::Write => {
            let window = 1.0 / (1.0 + (n.saturating_sub(1) as f64) * WRITE_LAG);
            let offset = i as f64 * WRITE_LAG * window;
            ((reveal - offset) / window).clamp(0.0, 1.0)
        }
    }
}

fn write_path(out: &mut String, p: &PathPrim, t: f64) {
    // Outlines draw first; fills follow during the second half.
    let (stroke_t, fill_t) = match (p.stroke.is_some(), p.fill.is_some()) {
        (true, true) => ((2.0 * t).min(1.0), (2.0 * t - 1.0).max(0.0)),
        (true, false) => (t, 0.0),
        (false, _) => (0.0, t),
    };

    if let Some(fill) = p.fill
        && fill_t > 0.0
    {
        let _ = write!(
            out,
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
            path_d(&p.path),
            fill.color.to_svg_hex(),
            num(fill.opacity * fill.color.a * fill_t),
        );
    }
    if let Some(stroke) = p.stroke
        && stroke_t > 0.0
    {
        let trimmed;
        let path = if stroke_t >= 1.0 {
            &p.path
        } else {
            trimmed = trim_path(&p.path, stroke_t);
            &trimmed
        };
        if path.elements().is_empty() {
            return;
        }
        let _ = write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path_d(path),
            stroke.color.to_svg_hex(),
            num(stroke.color.a),
            num(stroke.width),
        );
    }
}

fn write_text(out: &mut String, run: &TextRun, t: f64, clip: usize, prim: usize) {
    let bb = run.bbox();
    let clip_ref = if t < 1.0 {
        let id = format!("reveal-{clip}-{prim}");
        // Pad vertically so ascenders and descenders are never cut.
        let pad = run.em() * 0.5;
        let _ = write!(
            out,
            r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            num(bb.x0 - pad),
            num(-bb.y1 - pad),
            num((bb.width() + pad) * t),
            num(bb.height() + 2.0 * pad),
        );
        Some(id)
    } else {
        None
    };

    let em = run.em();
    let _ = write!(
        out,
        r#"<g font-family="{FONT_FAMILY}" font-size="{}" fill="{}""#,
        num(em),
        run.color.to_svg_hex()
    );
    if let Some(id) = &clip_ref {
        let _ = write!(out, r#" clip-path="url(#{id})""#);
    }
    out.push('>');

    for (i, line) in run.text.lines.iter().enumerate() {
        if !line.spans.is_empty() {
            write_text_line(out, line, run.line_x(i), -run.baseline(i), em);
        }
    }
    out.push_str("</g>");
}

/// One `<text>` line starting at pen position `x` on SVG baseline `baseline`.
pub(crate) fn write_text_line(out: &mut String, line: &Line, x: f64, baseline: f64, em: f64) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" xml:space="preserve">"#,
        num(x),
        num(baseline),
    );
    for span in &line.spans {
        let s = span.style;
        let (y, size) = match s.script {
            Script::Normal => (baseline, em),
            Script::Sub => (baseline + SUB_SHIFT_EM * em, em * SCRIPT_SCALE),
            Script::Super => (baseline - SUPER_SHIFT_EM * em, em * SCRIPT_SCALE),
        };
        let _ = write!(out, r#"<tspan y="{}""#, num(y));
        if s.script != Script::Normal {
            let _ = write!(out, r#" font-size="{}""#, num(size));
        }
        if s.bold {
            out.push_str(r#" font-weight="bold""#);
        }
        if s.italic {
            out.push_str(r#" font-style="italic""#);
        }
        if let Some(c) = s.color {
            let _ = write!(out, r#" fill="{}""#, c.to_svg_hex());
        }
        out.push('>');
        escape_into(out, &span.text);
        out.push_str("</tspan>");
    }
    out.push_str("</text>");
}

fn matrix(p: Placement) -> String {
    format!(
        "matrix({} 0 0 {} {} {})",
        num(p.scale.x),
        num(p.scale.y),
        num(p.translate.x),
        num(-p.translate.y)
    )
}

/// SVG path data with y flipped.
pub(crate) fn path_d(path: &BezPath) -> String {
    let mut d = String::new();
    let pt = |d: &mut String, p: Point| {
        let _ = write!(d, "{} {} ", num(p.x), num(-p.y));
    };
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                d.push('M');
                pt(&mut d, p);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                pt(&mut d, p);
            }
            PathEl::QuadTo(a, b) => {
                d.push('Q');
                pt(&mut d, a);
                pt(&mut d, b);
            }
            PathEl::CurveTo(a, b, c) => {
                d.push('C');
                pt(&mut d, a);
                pt(&mut d, b);
                pt(&mut d, c);
            }
            PathEl::ClosePath => d.push_str("Z "),
        }
    }
    d.truncate(d.trim_end().len());
    d
}

/// Fixed-precision number without trailing zeros.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
