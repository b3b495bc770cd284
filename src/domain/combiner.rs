//! Combined effect of several simultaneous interventions.
//!
//! Each intervention's absolute risk reduction is normalised against the
//! baseline, the contributions are summed, and the sum is passed through a
//! saturating transform `1 - exp(-k * x)` so overlapping benefits never add
//! up past 100%. The result is then capped at a 75% clinical ceiling.

use super::catalog::Intervention;
use super::risk::{CombinedEffectResult, Horizon, RiskError};

/// Saturation rate of the diminishing-returns transform.
pub const SATURATION_RATE: f64 = 0.8;

/// Maximum modelled relative risk reduction (fraction).
pub const MAX_COMBINED_RRR: f64 = 0.75;

/// Combine the effects of `interventions` on `baseline_risk` at `horizon`.
///
/// A zero baseline gives every intervention a zero contribution.
///
/// # Errors
/// Returns `RiskError::Computation` if an intervention has no absolute risk
/// reduction for `horizon`.
pub fn combine_interventions<'a, I>(
    baseline_risk: f64,
    interventions: I,
    horizon: Horizon,
) -> Result<CombinedEffectResult, RiskError>
where
    I: IntoIterator<Item = &'a Intervention>,
{
    let mut total_rrr = 0.0;
    for iv in interventions {
        let arr = iv.arr(horizon).ok_or_else(|| {
            RiskError::Computation(format!(
                "{} has no {horizon} absolute risk reduction",
                iv.name
            ))
        })?;
        if baseline_risk > 0.0 {
            total_rrr += arr / baseline_risk;
        }
    }

    let effective_rrr = 1.0 - (-SATURATION_RATE * total_rrr).exp();
    let final_rrr = effective_rrr.min(MAX_COMBINED_RRR);
    let projected_risk = baseline_risk * (1.0 - final_rrr);

    Ok(CombinedEffectResult {
        projected_risk,
        rrr: final_rrr * 100.0,
        arr: baseline_risk - projected_risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InterventionId;
    use approx::assert_abs_diff_eq;
    use std::collections::BTreeMap;

    fn intervention(name: &str, arr_5yr: f64, arr_lifetime: f64) -> Intervention {
        Intervention {
            id: InterventionId::RegularExercise,
            name: name.to_string(),
            absolute_risk_reduction: BTreeMap::from([
                (Horizon::FiveYear, arr_5yr),
                (Horizon::Lifetime, arr_lifetime),
            ]),
            mechanism: String::new(),
            contraindications: Vec::new(),
            citation: "test".to_string(),
        }
    }

    #[test]
    fn test_two_interventions_lifetime() {
        let active = [intervention("a", 2.0, 6.0), intervention("b", 1.0, 3.0)];
        let result = combine_interventions(20.0, &active, Horizon::Lifetime).expect("Should combine");

        assert_abs_diff_eq!(result.rrr, 30.232_367_39, epsilon = 1e-6);
        assert_abs_diff_eq!(result.projected_risk, 13.953_526_52, epsilon = 1e-6);
        assert_abs_diff_eq!(result.arr, 20.0 - result.projected_risk, epsilon = 1e-12);
    }

    #[test]
    fn test_no_interventions_keeps_baseline() {
        let none: Vec<Intervention> = Vec::new();
        let result = combine_interventions(20.0, &none, Horizon::FiveYear).expect("Should combine");
        assert_eq!(result.projected_risk, 20.0);
        assert_eq!(result.rrr, 0.0);
        assert_eq!(result.arr, 0.0);
    }

    #[test]
    fn test_rrr_never_exceeds_cap() {
        let many: Vec<_> = (0..50).map(|i| intervention(&i.to_string(), 30.0, 60.0)).collect();
        let result = combine_interventions(10.0, &many, Horizon::Lifetime).expect("Should combine");
        assert_abs_diff_eq!(result.rrr, 75.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.projected_risk, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_baseline_is_not_an_error() {
        let active = [intervention("a", 2.0, 6.0)];
        let result = combine_interventions(0.0, &active, Horizon::FiveYear).expect("Should combine");
        assert_eq!(result.projected_risk, 0.0);
        assert_eq!(result.rrr, 0.0);
    }

    #[test]
    fn test_missing_horizon_fails() {
        let active = [intervention("a", 2.0, 6.0)];
        let err = combine_interventions(20.0, &active, Horizon::TenYear).expect_err("Should fail");
        assert!(matches!(err, RiskError::Computation(_)));
    }
}
