//! Wire format of one assessment request.

use serde::{Deserialize, Serialize};

use crate::domain::{Horizon, PatientProfile, TreatmentPlan};

/// A patient, an optional treatment plan and the horizon to report on.
///
/// Without a plan only the baseline is assessed. The horizon defaults to
/// 10 years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub patient: PatientProfile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<TreatmentPlan>,

    #[serde(default = "default_horizon")]
    pub horizon: Horizon,
}

fn default_horizon() -> Horizon {
    Horizon::TenYear
}

impl AssessmentRequest {
    /// Parse a request from JSON text.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed or incomplete requests.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EmbeddedCatalog;
    use crate::application::RiskEngine;
    use crate::domain::{InterventionId, LdlTherapyId};

    const SAMPLE: &str = include_str!("../../requests/secondary_prevention.json");

    #[test]
    fn test_sample_request_parses() {
        let request = AssessmentRequest::from_json(SAMPLE).expect("Should parse sample request");

        assert_eq!(request.horizon, Horizon::Lifetime);
        assert!(request.patient.smoker);
        assert_eq!(request.patient.hba1c, Some(7.2));
        assert_eq!(request.patient.vascular_territories, 1);

        let plan = request.plan.expect("Sample should carry a plan");
        assert_eq!(plan.statin, Some(LdlTherapyId::Atorvastatin80));
        assert_eq!(plan.add_ons, vec![LdlTherapyId::Ezetimibe]);
        assert_eq!(plan.target_sbp, 130.0);
        assert_eq!(
            plan.interventions,
            vec![
                InterventionId::SmokingCessation,
                InterventionId::Antiplatelet,
                InterventionId::MediterraneanDiet,
            ]
        );
    }

    #[test]
    fn test_sample_request_assesses() {
        let request = AssessmentRequest::from_json(SAMPLE).expect("Should parse sample request");
        let engine = RiskEngine::from_source(&EmbeddedCatalog).expect("Should load");
        let plan = request.plan.as_ref().expect("Sample should carry a plan");

        let result = engine
            .assess(&request.patient, plan, request.horizon)
            .expect("Sample request should assess");
        assert_eq!(result.horizon, Horizon::Lifetime);
        assert!(result.final_risk.percent <= result.baseline.percent);
    }

    #[test]
    fn test_defaults_to_ten_year_baseline() {
        let json = r#"{"patient": {
            "age": 65, "sex": "male", "sbp": 140, "total_chol": 5.0, "hdl": 1.0,
            "ldl": 3.5, "smoker": false, "diabetes": false, "egfr": 80, "crp": 2.0,
            "vascular_territories": 0
        }}"#;
        let request = AssessmentRequest::from_json(json).expect("Should parse");
        assert_eq!(request.horizon, Horizon::TenYear);
        assert!(request.plan.is_none());
    }

    #[test]
    fn test_missing_patient_field_is_rejected() {
        let json = r#"{"patient": {"age": 65, "sex": "male"}}"#;
        assert!(AssessmentRequest::from_json(json).is_err());
    }
}
