use xxhash_rust::xxh3::Xxh3;

use crate::{eval::evaluator::EvaluatedFrame, foundation::math::quantize, timeline::model::RevealStyle};

const XXH3_SEED: u64 = 0x6c69_6e6b_6167_6531;
// Sub-pixel at any supported canvas size.
const PLACEMENT_STEPS: f64 = 1e5;
// Finer than one 8-bit alpha step.
const ALPHA_STEPS: f64 = 4096.0;

/// 128-bit identity of what a frame draws. Equal fingerprints render identical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_eval(eval: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(eval.items.len() as u64);
    for item in &eval.items {
        h.write_u64(item.clip as u64);
        let p = item.placement;
        for v in [p.translate.x, p.translate.y, p.scale.x, p.scale.y] {
            h.write_i64(quantize(v, PLACEMENT_STEPS));
        }
        h.write_i64(quantize(item.opacity, ALPHA_STEPS));
        h.write_i64(quantize(item.reveal, ALPHA_STEPS));
        h.write_u8(match item.reveal_style {
            RevealStyle::Create => 0,
            RevealStyle::Write => 1,
        });
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
