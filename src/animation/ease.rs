/// Rate function applied to a play's normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Logistic curve rescaled to pass through (0, 0) and (1, 1). Used by every play unless
    /// overridden.
    #[default]
    Smooth,
}

// Steepness of the logistic curve at t = 0.5.
const SMOOTH_INFLECTION: f64 = 10.0;

impl Ease {
    /// Eased progress for `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => {
                let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
                let floor = sigmoid(-SMOOTH_INFLECTION / 2.0);
                let raw = sigmoid(SMOOTH_INFLECTION * (t - 0.5));
                ((raw - floor) / (1.0 - 2.0 * floor)).clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
