//! Blood-pressure lowering effect: 15% RRR per 10 mmHg, capped at 25%.

use serde::{Deserialize, Serialize};

pub const RRR_PER_10_MMHG: f64 = 0.15;
pub const MAX_RRR: f64 = 0.25;

/// Result of the blood-pressure pathway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpEffect {
    /// Relative risk reduction in percent (negative when the target is above current SBP)
    pub rrr: f64,

    /// Projected risk in percent
    pub projected_risk: f64,
}

/// Projected risk after lowering SBP from `sbp` to `target_sbp`.
#[must_use]
pub fn bp_effect(baseline_risk: f64, sbp: f64, target_sbp: f64) -> BpEffect {
    let rrr = (RRR_PER_10_MMHG * ((sbp - target_sbp) / 10.0)).min(MAX_RRR);
    BpEffect {
        rrr: rrr * 100.0,
        projected_risk: baseline_risk * (1.0 - rrr),
    }
}
