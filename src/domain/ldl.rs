//! LDL-cholesterol lowering effect (CTT Collaboration, Lancet 2010).
//!
//! 22% relative risk reduction per 1 mmol/L of LDL-C lowered, plateauing at 60%.

use serde::{Deserialize, Serialize};

pub const RRR_PER_MMOL: f64 = 22.0;
pub const MAX_RRR_PERCENT: f64 = 60.0;

/// Result of the LDL pathway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LdlEffect {
    /// LDL-C lowered in mmol/L (negative when LDL rises)
    pub reduction: f64,

    /// Relative risk reduction in percent (negative when LDL rises)
    pub rrr: f64,

    /// Projected risk in percent
    pub projected_risk: f64,
}

/// Relative risk reduction (percent) for an LDL-C reduction in mmol/L.
#[must_use]
pub fn ldl_rrr(reduction: f64) -> f64 {
    (RRR_PER_MMOL * reduction).min(MAX_RRR_PERCENT)
}

/// Full LDL pathway: reduction, capped RRR and projected risk.
#[must_use]
pub fn ldl_effect(baseline_risk: f64, baseline_ldl: f64, final_ldl: f64) -> LdlEffect {
    let reduction = baseline_ldl - final_ldl;
    let rrr = ldl_rrr(reduction);
    LdlEffect {
        reduction,
        rrr,
        projected_risk: baseline_risk * (1.0 - rrr / 100.0),
    }
}

/// Projected risk after lowering LDL-C from `baseline_ldl` to `final_ldl`.
///
/// A rise in LDL-C yields a risk above baseline; it is not clamped.
#[must_use]
pub fn apply_ldl_effect(baseline_risk: f64, baseline_ldl: f64, final_ldl: f64) -> f64 {
    ldl_effect(baseline_risk, baseline_ldl, final_ldl).projected_risk
}

/// Projected LDL-C after a combined percentage reduction.
///
/// The percentage is applied as given. Stacked therapies above 100% drive the
/// projection below zero; the RRR cap still bounds the resulting effect.
#[must_use]
pub fn projected_ldl(baseline_ldl: f64, total_reduction_percent: f64) -> f64 {
    baseline_ldl * (1.0 - total_reduction_percent / 100.0)
}
