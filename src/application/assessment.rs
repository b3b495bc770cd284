//! Risk engine: orchestrates one full treatment-effect assessment.
//!
//! Pipeline:
//! 1. Validate the profile and the plan
//! 2. Score the 10-year baseline
//! 3. Rescale it to the requested horizon
//! 4. Evaluate the LDL, blood-pressure and combined-intervention pathways on
//!    the same horizon-adjusted baseline
//! 5. Keep the lowest of the three projected risks
//!
//! Step 5 is a best-case bound across independently modelled pathways, not a
//! multiplicative composition of their effects.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    adjust_horizon, bp_effect, combine_interventions, ldl_effect, projected_ldl, score, BpEffect,
    Catalog, CatalogError, CombinedEffectResult, Horizon, Intervention, InterventionId, LdlEffect,
    PatientProfile, RiskError, RiskEstimate, TreatmentPlan,
};
use crate::ports::CatalogSource;

/// The pathway whose projected risk was selected as final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    Ldl,
    BloodPressure,
    Interventions,
}

impl std::fmt::Display for Pathway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ldl => write!(f, "LDL lowering"),
            Self::BloodPressure => write!(f, "blood pressure control"),
            Self::Interventions => write!(f, "combined interventions"),
        }
    }
}

/// Contraindications to review for one active intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContraindicationNote {
    pub intervention: InterventionId,
    pub name: String,
    pub contraindications: Vec<String>,
}

/// LDL pathway details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LdlProjection {
    /// Summed LDL-C reduction of the selected therapies in percent
    pub therapy_reduction_percent: f64,

    /// Projected LDL-C in mmol/L
    pub final_ldl: f64,

    pub effect: LdlEffect,
}

/// Immutable result of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub horizon: Horizon,

    /// Unadjusted 10-year baseline
    pub baseline_10yr: RiskEstimate,

    /// Baseline rescaled to `horizon`
    pub baseline: RiskEstimate,

    pub ldl: LdlProjection,
    pub blood_pressure: BpEffect,
    pub combined: CombinedEffectResult,

    pub selected_pathway: Pathway,
    pub final_risk: RiskEstimate,

    /// Absolute risk reduction versus `baseline`, in percentage points
    pub arr: f64,

    /// Relative risk reduction versus `baseline`, in percent
    pub rrr: f64,

    pub contraindications: Vec<ContraindicationNote>,

    /// Fingerprint of the catalog the effect sizes came from
    pub catalog_fingerprint: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Secondary-prevention risk engine.
///
/// Holds only the read-only catalog, so a single engine can be shared across
/// threads and every call is independent of every other.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    catalog: Arc<Catalog>,
}

impl RiskEngine {
    /// Create an engine over an already loaded catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Load the catalog from `source` and build an engine over it.
    ///
    /// # Errors
    /// Returns the source's load error.
    pub fn from_source<C: CatalogSource + ?Sized>(source: &C) -> Result<Self, CatalogError> {
        tracing::info!("Initializing risk engine from {}", source.describe());
        Ok(Self::new(Arc::new(source.load()?)))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Baseline risk at `horizon`, without any treatment.
    ///
    /// # Errors
    /// Returns `RiskError::Validation` for out-of-range profile fields and
    /// `RiskError::Computation` if the risk equation cannot be evaluated.
    pub fn baseline(
        &self,
        profile: &PatientProfile,
        horizon: Horizon,
    ) -> Result<RiskEstimate, RiskError> {
        Ok(self.baselines(profile, horizon)?.1)
    }

    fn baselines(
        &self,
        profile: &PatientProfile,
        horizon: Horizon,
    ) -> Result<(RiskEstimate, RiskEstimate), RiskError> {
        if let Err(errors) = profile.validate() {
            tracing::warn!("Rejected patient profile: {} problem(s)", errors.len());
            return Err(RiskError::Validation(errors));
        }

        let baseline_10yr = score(profile)?;
        let baseline = RiskEstimate::new(adjust_horizon(baseline_10yr.percent, horizon), horizon);
        Ok((baseline_10yr, baseline))
    }

    /// Project the effect of `plan` on `profile` at `horizon`.
    ///
    /// # Errors
    /// Returns `RiskError::Validation` for an invalid profile or plan and
    /// `RiskError::Computation` if a model cannot be evaluated (including an
    /// active intervention without an effect size for `horizon`).
    pub fn assess(
        &self,
        profile: &PatientProfile,
        plan: &TreatmentPlan,
        horizon: Horizon,
    ) -> Result<AssessmentResult, RiskError> {
        tracing::debug!("Step 1: Validating profile and plan...");
        let (baseline_10yr, baseline) = self.baselines(profile, horizon)?;
        if let Err(errors) = plan.validate(&self.catalog, profile) {
            tracing::warn!("Rejected treatment plan: {} problem(s)", errors.len());
            return Err(RiskError::Validation(errors));
        }
        let baseline_risk = baseline.percent;

        tracing::debug!("Step 2: LDL pathway...");
        let ldl = self.ldl_projection(profile, plan, baseline_risk)?;

        tracing::debug!("Step 3: Blood pressure pathway...");
        let blood_pressure = bp_effect(baseline_risk, profile.sbp, plan.target_sbp);

        tracing::debug!("Step 4: Combined intervention pathway...");
        let active = plan
            .interventions
            .iter()
            .map(|id| self.catalog.intervention(*id))
            .collect::<Result<Vec<&Intervention>, CatalogError>>()?;
        let combined = combine_interventions(baseline_risk, active.iter().copied(), horizon)?;

        let (selected_pathway, final_percent) = select_lowest(&[
            (Pathway::Ldl, ldl.effect.projected_risk),
            (Pathway::BloodPressure, blood_pressure.projected_risk),
            (Pathway::Interventions, combined.projected_risk),
        ]);

        let arr = baseline_risk - final_percent;
        let rrr = if baseline_risk > 0.0 {
            arr / baseline_risk * 100.0
        } else {
            0.0
        };

        let contraindications = active
            .iter()
            .filter(|iv| !iv.contraindications.is_empty())
            .map(|iv| ContraindicationNote {
                intervention: iv.id,
                name: iv.name.clone(),
                contraindications: iv.contraindications.clone(),
            })
            .collect();

        let result = AssessmentResult {
            horizon,
            baseline_10yr,
            baseline,
            ldl,
            blood_pressure,
            combined,
            selected_pathway,
            final_risk: RiskEstimate::new(final_percent, horizon),
            arr,
            rrr,
            contraindications,
            catalog_fingerprint: self.catalog.fingerprint().to_string(),
            created_at: chrono::Utc::now(),
        };

        tracing::info!(
            "Assessment complete: baseline={:.1}%, final={:.1}% ({}), pathway={}",
            result.baseline.percent,
            result.final_risk.percent,
            horizon,
            selected_pathway
        );

        Ok(result)
    }

    fn ldl_projection(
        &self,
        profile: &PatientProfile,
        plan: &TreatmentPlan,
        baseline_risk: f64,
    ) -> Result<LdlProjection, RiskError> {
        let mut total = 0.0;
        for id in plan.ldl_therapies() {
            total += self.catalog.ldl_therapy(id)?.ldl_reduction_percent;
        }

        let final_ldl = projected_ldl(profile.ldl, total);

        Ok(LdlProjection {
            therapy_reduction_percent: total,
            final_ldl,
            effect: ldl_effect(baseline_risk, profile.ldl, final_ldl),
        })
    }
}

/// Lowest projected risk; ties go to the earlier pathway.
fn select_lowest(candidates: &[(Pathway, f64); 3]) -> (Pathway, f64) {
    let mut best = candidates[0];
    for &(pathway, risk) in &candidates[1..] {
        if risk < best.1 {
            best = (pathway, risk);
        }
    }
    best
}
