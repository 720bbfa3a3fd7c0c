use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

const ARCLEN_ACCURACY: f64 = 1e-4;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round to a fixed grid so float noise does not leak into hashes or SVG output.
pub(crate) fn quantize(v: f64, steps_per_unit: f64) -> i64 {
    (v * steps_per_unit).round() as i64
}

/// Total arc length of `path`.
pub(crate) fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ARCLEN_ACCURACY)).sum()
}

/// Point at fraction `f` of the arc length, clamped to the path ends.
pub(crate) fn point_at_fraction(path: &BezPath, f: f64) -> Option<Point> {
    let segs: Vec<PathSeg> = path.segments().collect();
    let first = segs.first()?;
    let total = path_length(path);
    if total <= 0.0 || f <= 0.0 {
        return Some(first.eval(0.0));
    }
    let mut left = f.min(1.0) * total;
    for seg in &segs {
        let len = seg.arclen(ARCLEN_ACCURACY);
        if left <= len {
            return Some(seg.eval(seg.inv_arclen(left, ARCLEN_ACCURACY)));
        }
        left -= len;
    }
    segs.last().map(|s| s.eval(1.0))
}

/// Leading part of `path` covering fraction `f` of its arc length.
pub(crate) fn trim_path(path: &BezPath, f: f64) -> BezPath {
    if f >= 1.0 {
        return path.clone();
    }
    if f <= 0.0 {
        return BezPath::new();
    }
    let mut left = f * path_length(path);
    let segs: Vec<PathSeg> = path.segments().collect();
    let mut kept = Vec::with_capacity(segs.len());
    for seg in segs {
        let len = seg.arclen(ARCLEN_ACCURACY);
        if left >= len {
            kept.push(seg);
            left -= len;
            continue;
        }
        if left > 0.0 {
            kept.push(seg.subsegment(0.0..seg.inv_arclen(left, ARCLEN_ACCURACY)));
        }
        break;
    }
    BezPath::from_path_segments(kept.into_iter())
}
