//! Baseline 10-year risk from the SMART-style secondary-prevention equation.
//!
//! The coefficients and the 0.900 baseline survival reproduce the published
//! hazard-ratio model and must not be tuned.

use super::patient::{PatientProfile, Sex};
use super::risk::{Horizon, RiskError, RiskEstimate};

const COEF_AGE: f64 = 0.064;
const COEF_MALE: f64 = 0.34;
const COEF_SBP: f64 = 0.02;
const COEF_TOTAL_CHOL: f64 = 0.25;
const COEF_HDL: f64 = -0.25;
const COEF_SMOKER: f64 = 0.44;
const COEF_DIABETES: f64 = 0.51;
/// Applied per 10 mL/min/1.73m² of eGFR.
const COEF_EGFR_PER_10: f64 = -0.2;
/// Applied to ln(crp + 1).
const COEF_LOG_CRP: f64 = 0.25;
const COEF_VASCULAR: f64 = 0.4;

const LP_CENTER: f64 = 5.8;
const BASELINE_SURVIVAL_10YR: f64 = 0.900;

pub const MIN_BASELINE_PERCENT: f64 = 1.0;
pub const MAX_BASELINE_PERCENT: f64 = 99.0;

/// Compute the 10-year baseline risk for a profile.
///
/// # Errors
/// Returns `RiskError::Computation` when an input is outside the equation's
/// mathematical domain (`crp <= -1`, non-finite values, more than three
/// vascular territories) or the result is not finite.
pub fn score(profile: &PatientProfile) -> Result<RiskEstimate, RiskError> {
    let lp = linear_predictor(profile)?;

    let risk10 = 1.0 - BASELINE_SURVIVAL_10YR.powf((lp - LP_CENTER).exp());
    if !risk10.is_finite() {
        return Err(RiskError::Computation(format!(
            "10-year risk is not finite (linear predictor {lp})"
        )));
    }

    let percent = round_to_tenth(risk10 * 100.0).clamp(MIN_BASELINE_PERCENT, MAX_BASELINE_PERCENT);
    tracing::debug!("Baseline 10yr risk: lp={:.4}, risk={:.1}%", lp, percent);

    Ok(RiskEstimate::new(percent, Horizon::TenYear))
}

/// The equation's linear predictor.
///
/// # Errors
/// See [`score`].
pub fn linear_predictor(p: &PatientProfile) -> Result<f64, RiskError> {
    let fields = [
        ("age", p.age),
        ("sbp", p.sbp),
        ("total_chol", p.total_chol),
        ("hdl", p.hdl),
        ("egfr", p.egfr),
        ("crp", p.crp),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(RiskError::Computation(format!("{name} is not a finite number ({value})")));
    }
    if p.crp <= -1.0 {
        return Err(RiskError::Computation(format!(
            "ln(crp + 1) undefined for crp = {}",
            p.crp
        )));
    }
    if p.vascular_territories > 3 {
        return Err(RiskError::Computation(format!(
            "vascular territory count {} exceeds 3",
            p.vascular_territories
        )));
    }

    let male = indicator(p.sex == Sex::Male);
    let smoker = indicator(p.smoker);
    let diabetes = indicator(p.diabetes);

    Ok(COEF_AGE * p.age
        + COEF_MALE * male
        + COEF_SBP * p.sbp
        + COEF_TOTAL_CHOL * p.total_chol
        + COEF_HDL * p.hdl
        + COEF_SMOKER * smoker
        + COEF_DIABETES * diabetes
        + COEF_EGFR_PER_10 * (p.egfr / 10.0)
        + COEF_LOG_CRP * (p.crp + 1.0).ln()
        + COEF_VASCULAR * f64::from(p.vascular_territories))
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::reference_profile;
    use crate::domain::RiskCategory;
    use approx::assert_abs_diff_eq;

    fn risk(profile: &PatientProfile) -> f64 {
        score(profile).expect("Should score").percent
    }

    #[test]
    fn test_reference_scenario() {
        let estimate = score(&reference_profile()).expect("Should score");
        assert_abs_diff_eq!(estimate.percent, 28.9, epsilon = 1e-9);
        assert_eq!(estimate.horizon, Horizon::TenYear);
        assert_eq!(estimate.category, RiskCategory::High);
    }

    #[test]
    fn test_linear_predictor() {
        let lp = linear_predictor(&reference_profile()).expect("Should compute");
        assert_abs_diff_eq!(lp, 6.974_653_072, epsilon = 1e-8);
    }

    #[test]
    fn test_crp_minus_one_is_computation_error() {
        let profile = PatientProfile {
            crp: -1.0,
            ..reference_profile()
        };
        assert!(matches!(score(&profile), Err(RiskError::Computation(_))));
    }

    #[test]
    fn test_non_finite_input_is_computation_error() {
        let profile = PatientProfile {
            age: f64::NAN,
            ..reference_profile()
        };
        assert!(matches!(score(&profile), Err(RiskError::Computation(_))));
    }

    #[test]
    fn test_risk_increases_with_risk_factors() {
        let base = reference_profile();
        let r0 = risk(&base);

        assert!(risk(&PatientProfile { age: 70.0, ..base.clone() }) > r0);
        assert!(risk(&PatientProfile { sbp: 160.0, ..base.clone() }) > r0);
        assert!(risk(&PatientProfile { total_chol: 6.5, ..base.clone() }) > r0);
        assert!(risk(&PatientProfile { crp: 8.0, ..base.clone() }) > r0);
        assert!(risk(&PatientProfile { vascular_territories: 1, ..base.clone() }) > r0);
    }

    #[test]
    fn test_risk_decreases_with_protective_factors() {
        let base = reference_profile();
        let r0 = risk(&base);

        assert!(risk(&PatientProfile { hdl: 1.8, ..base.clone() }) < r0);
        assert!(risk(&PatientProfile { egfr: 110.0, ..base.clone() }) < r0);
    }

    #[test]
    fn test_baseline_is_clamped() {
        let extreme_high = PatientProfile {
            age: 90.0,
            sbp: 220.0,
            total_chol: 10.0,
            hdl: 0.5,
            smoker: true,
            diabetes: true,
            egfr: 15.0,
            crp: 20.0,
            vascular_territories: 3,
            ..reference_profile()
        };
        assert_abs_diff_eq!(risk(&extreme_high), MAX_BASELINE_PERCENT);

        let extreme_low = PatientProfile {
            age: 30.0,
            sex: Sex::Female,
            sbp: 90.0,
            total_chol: 2.0,
            hdl: 3.0,
            egfr: 120.0,
            crp: 0.1,
            ..reference_profile()
        };
        assert_abs_diff_eq!(risk(&extreme_low), MIN_BASELINE_PERCENT);
    }

    #[test]
    fn test_score_is_deterministic() {
        let profile = reference_profile();
        let a = score(&profile).expect("Should score");
        let b = score(&profile).expect("Should score");
        assert_eq!(a.percent.to_bits(), b.percent.to_bits());
    }
}
