//! Community health scores

use serde::{Deserialize, Serialize};

/// Quantities both health formulas draw from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HealthInputs {
    pub components: usize,
    pub cycles: usize,
    pub members: usize,
    pub isolation_risk: usize,
    pub bridges: usize,
}

/// The two health formulas.
///
/// They are not equivalent: the two-subgroup decomposition reports
/// `Penalty`, whole-graph analysis reports `Weighted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthFormula {
    /// 100 minus penalties for extra components, cycles beyond two and
    /// isolated members, plus a bridge bonus; clamped to [0, 100]
    Penalty,

    /// 0.3 connectivity + 0.3 cohesion + 0.4 isolation, each term in [0, 100]
    Weighted,
}

impl HealthFormula {
    pub fn score(&self, inputs: &HealthInputs) -> f32 {
        let extra_components = inputs.components.saturating_sub(1) as f32;

        match self {
            HealthFormula::Penalty => {
                let component_penalty = extra_components * 15.0;
                let hole_penalty = (5.0 * (inputs.cycles as f32 - 2.0)).max(0.0);
                let isolation_penalty = inputs.isolation_risk as f32 * 3.0;
                let bridge_bonus = inputs.bridges as f32 * 2.0;

                let score =
                    100.0 - component_penalty - hole_penalty - isolation_penalty + bridge_bonus;
                score.clamp(0.0, 100.0)
            }
            HealthFormula::Weighted => {
                let connectivity = (100.0 - 20.0 * extra_components).max(0.0);
                let cohesion = (100.0 - 5.0 * inputs.cycles as f32).max(0.0);
                let isolated_ratio = if inputs.members == 0 {
                    0.0
                } else {
                    inputs.isolation_risk as f32 / inputs.members as f32
                };
                let isolation = (100.0 - 100.0 * isolated_ratio).max(0.0);

                0.3 * connectivity + 0.3 * cohesion + 0.4 * isolation
            }
        }
    }
}
