//! Treatment plan selected by the clinician.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, InterventionId, LdlTherapyId, TherapyKind};
use super::patient::PatientProfile;

pub const DEFAULT_TARGET_SBP: f64 = 130.0;
pub const MIN_TARGET_SBP: f64 = 110.0;
pub const MAX_TARGET_SBP: f64 = 150.0;

fn default_target_sbp() -> f64 {
    DEFAULT_TARGET_SBP
}

/// Medical and lifestyle interventions to project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    /// Statin regimen, if any
    #[serde(default)]
    pub statin: Option<LdlTherapyId>,

    /// Non-statin LDL-lowering therapies
    #[serde(default)]
    pub add_ons: Vec<LdlTherapyId>,

    /// Target systolic BP in mmHg (110-150)
    #[serde(default = "default_target_sbp")]
    pub target_sbp: f64,

    /// Active non-LDL interventions
    #[serde(default)]
    pub interventions: Vec<InterventionId>,
}

impl Default for TreatmentPlan {
    fn default() -> Self {
        Self {
            statin: None,
            add_ons: Vec::new(),
            target_sbp: DEFAULT_TARGET_SBP,
            interventions: Vec::new(),
        }
    }
}

impl TreatmentPlan {
    /// Check the plan against the catalog and the patient it is meant for.
    ///
    /// # Errors
    /// Returns all problems at once.
    pub fn validate(&self, catalog: &Catalog, patient: &PatientProfile) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(MIN_TARGET_SBP..=MAX_TARGET_SBP).contains(&self.target_sbp) {
            errors.push(format!(
                "Target SBP {} out of range [{MIN_TARGET_SBP}, {MAX_TARGET_SBP}]",
                self.target_sbp
            ));
        }

        if let Some(statin) = self.statin {
            match catalog.ldl_therapy(statin) {
                Ok(t) if t.kind != TherapyKind::Statin => {
                    errors.push(format!("{} is not a statin", t.name));
                }
                Ok(_) => {}
                Err(e) => errors.push(e.to_string()),
            }
        }

        for (i, add_on) in self.add_ons.iter().enumerate() {
            if self.add_ons[..i].contains(add_on) {
                errors.push(format!("Add-on therapy {add_on:?} listed twice"));
                continue;
            }
            match catalog.ldl_therapy(*add_on) {
                Ok(t) if t.kind != TherapyKind::AddOn => {
                    errors.push(format!("{} is not an add-on therapy", t.name));
                }
                Ok(_) => {}
                Err(e) => errors.push(e.to_string()),
            }
        }

        for (i, id) in self.interventions.iter().enumerate() {
            if self.interventions[..i].contains(id) {
                errors.push(format!("Intervention {id:?} listed twice"));
                continue;
            }
            if let Err(e) = catalog.intervention(*id) {
                errors.push(e.to_string());
            }
            if *id == InterventionId::SmokingCessation && !patient.smoker {
                errors.push("Smoking cessation selected for a non-smoker".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Statin and add-ons in application order.
    pub fn ldl_therapies(&self) -> impl Iterator<Item = LdlTherapyId> + '_ {
        self.statin.into_iter().chain(self.add_ons.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference_profile;

    fn catalog() -> Catalog {
        Catalog::from_json_slice(include_bytes!("../../catalog/default_catalog.json"))
            .expect("Default catalog should load")
    }

    #[test]
    fn test_default_plan_is_valid() {
        let plan = TreatmentPlan::default();
        assert_eq!(plan.target_sbp, DEFAULT_TARGET_SBP);
        assert!(plan.validate(&catalog(), &reference_profile()).is_ok());
    }

    #[test]
    fn test_therapy_kinds_are_checked() {
        let plan = TreatmentPlan {
            statin: Some(LdlTherapyId::Ezetimibe),
            add_ons: vec![LdlTherapyId::Atorvastatin20],
            ..TreatmentPlan::default()
        };
        let errors = plan
            .validate(&catalog(), &reference_profile())
            .expect_err("Should reject");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_duplicates_and_target_range() {
        let plan = TreatmentPlan {
            add_ons: vec![LdlTherapyId::Ezetimibe, LdlTherapyId::Ezetimibe],
            interventions: vec![InterventionId::Antiplatelet, InterventionId::Antiplatelet],
            target_sbp: 100.0,
            ..TreatmentPlan::default()
        };
        let errors = plan
            .validate(&catalog(), &reference_profile())
            .expect_err("Should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_smoking_cessation_requires_smoker() {
        let plan = TreatmentPlan {
            interventions: vec![InterventionId::SmokingCessation],
            ..TreatmentPlan::default()
        };
        assert!(plan.validate(&catalog(), &reference_profile()).is_err());

        let smoker = PatientProfile {
            smoker: true,
            ..reference_profile()
        };
        assert!(plan.validate(&catalog(), &smoker).is_ok());
    }

    #[test]
    fn test_ldl_therapies_order() {
        let plan = TreatmentPlan {
            statin: Some(LdlTherapyId::Atorvastatin80),
            add_ons: vec![LdlTherapyId::Ezetimibe],
            ..TreatmentPlan::default()
        };
        let therapies: Vec<_> = plan.ldl_therapies().collect();
        assert_eq!(
            therapies,
            vec![LdlTherapyId::Atorvastatin80, LdlTherapyId::Ezetimibe]
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let plan: TreatmentPlan =
            serde_json::from_str(r#"{"statin": "atorvastatin_80"}"#).expect("Should parse");
        assert_eq!(plan.statin, Some(LdlTherapyId::Atorvastatin80));
        assert_eq!(plan.target_sbp, DEFAULT_TARGET_SBP);
        assert!(plan.interventions.is_empty());
    }
}
