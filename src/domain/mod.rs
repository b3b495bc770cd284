//! Domain layer: Core risk-model types and logic.
//!
//! Everything here is a pure function over immutable inputs: no I/O, no
//! shared mutable state. All types are serializable and validated.

mod blood_pressure;
mod catalog;
mod combiner;
mod horizon;
mod ldl;
mod patient;
mod plan;
mod risk;
mod scoring;

pub use blood_pressure::{bp_effect, BpEffect};
pub use catalog::{
    Catalog, CatalogError, Evidence, EvidenceTopic, Intervention, InterventionId, LdlTherapy,
    LdlTherapyId, TherapyKind, CATALOG_VERSION,
};
pub use combiner::{combine_interventions, MAX_COMBINED_RRR};
pub use horizon::{adjust_horizon, LIFETIME_CAP_PERCENT};
pub use ldl::{apply_ldl_effect, ldl_effect, projected_ldl, LdlEffect};
pub use patient::{PatientProfile, Sex, VascularHistory};
pub use plan::{TreatmentPlan, DEFAULT_TARGET_SBP};
pub use risk::{CombinedEffectResult, Horizon, RiskCategory, RiskError, RiskEstimate};
pub use scoring::{linear_predictor, score, MAX_BASELINE_PERCENT, MIN_BASELINE_PERCENT};

#[cfg(test)]
pub(crate) use patient::reference_profile;
