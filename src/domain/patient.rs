//! Patient profile for secondary-prevention risk scoring.
//!
//! Units follow UK/European practice: lipids in mmol/L, hs-CRP in mg/L,
//! eGFR in mL/min/1.73m².

use serde::{Deserialize, Deserializer, Serialize};

/// Biological sex as used by the risk equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Clinical inputs for one patient after a prior ischemic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years (30-90)
    pub age: f64,

    pub sex: Sex,

    /// Systolic blood pressure in mmHg (90-220)
    pub sbp: f64,

    /// Total cholesterol in mmol/L (2.0-10.0)
    pub total_chol: f64,

    /// HDL cholesterol in mmol/L (0.5-3.0)
    pub hdl: f64,

    /// LDL cholesterol in mmol/L (0.5-6.0)
    pub ldl: f64,

    /// Current smoker
    pub smoker: bool,

    /// Diabetes mellitus
    pub diabetes: bool,

    /// eGFR in mL/min/1.73m² (15-120)
    pub egfr: f64,

    /// hs-CRP in mg/L (0.1-20.0)
    pub crp: f64,

    /// Number of affected vascular territories (coronary, cerebrovascular, peripheral).
    ///
    /// Accepts either the count or a [`VascularHistory`] flag object on input.
    #[serde(deserialize_with = "territories_from_count_or_history")]
    pub vascular_territories: u8,

    /// HbA1c in % (5.0-12.0). Only recorded for diabetic patients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
}

/// Vascular disease history, one flag per territory. Absent flags are false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VascularHistory {
    /// Coronary artery disease
    pub coronary: bool,
    /// Prior stroke or TIA
    pub cerebrovascular: bool,
    /// Peripheral artery disease
    pub peripheral: bool,
}

impl VascularHistory {
    /// Number of affected territories (0-3).
    #[must_use]
    pub fn territory_count(&self) -> u8 {
        [self.coronary, self.cerebrovascular, self.peripheral]
            .iter()
            .filter(|&&flag| flag)
            .count() as u8
    }
}

fn territories_from_count_or_history<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Territories {
        Count(u8),
        History(VascularHistory),
    }

    Ok(match Territories::deserialize(deserializer)? {
        Territories::Count(count) => count,
        Territories::History(history) => history.territory_count(),
    })
}

impl PatientProfile {
    /// Validate that every field lies within its clinical range.
    ///
    /// # Errors
    /// Returns all range violations at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_range(&mut errors, "Age", self.age, 30.0, 90.0);
        check_range(&mut errors, "Systolic BP", self.sbp, 90.0, 220.0);
        check_range(&mut errors, "Total cholesterol", self.total_chol, 2.0, 10.0);
        check_range(&mut errors, "HDL-C", self.hdl, 0.5, 3.0);
        check_range(&mut errors, "LDL-C", self.ldl, 0.5, 6.0);
        check_range(&mut errors, "eGFR", self.egfr, 15.0, 120.0);
        check_range(&mut errors, "hs-CRP", self.crp, 0.1, 20.0);

        if self.vascular_territories > 3 {
            errors.push(format!(
                "Vascular territory count {} out of range [0, 3]",
                self.vascular_territories
            ));
        }

        if let Some(hba1c) = self.hba1c {
            check_range(&mut errors, "HbA1c", hba1c, 5.0, 12.0);
            if !self.diabetes {
                errors.push("HbA1c recorded for a patient without diabetes".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Short human-readable list of the risk factors present.
    #[must_use]
    pub fn key_risk_factors(&self) -> Vec<String> {
        let mut factors = vec![
            format!("Age: {}", self.age),
            format!("Sex: {}", self.sex),
            format!("LDL-C: {} mmol/L", self.ldl),
            format!("SBP: {} mmHg", self.sbp),
            format!("HDL-C: {} mmol/L", self.hdl),
        ];

        if self.diabetes {
            match self.hba1c {
                Some(hba1c) => factors.push(format!("Diabetes (HbA1c: {hba1c}%)")),
                None => factors.push("Diabetes".to_string()),
            }
        }
        if self.smoker {
            factors.push("Current smoker".to_string());
        }
        if self.vascular_territories > 0 {
            factors.push(format!(
                "Vascular disease ({} territories)",
                self.vascular_territories
            ));
        }

        factors
    }
}

fn check_range(errors: &mut Vec<String>, label: &str, value: f64, min: f64, max: f64) {
    // NaN fails `contains` as well.
    if !(min..=max).contains(&value) {
        errors.push(format!("{label} {value} out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
pub(crate) fn reference_profile() -> PatientProfile {
    PatientProfile {
        age: 65.0,
        sex: Sex::Male,
        sbp: 140.0,
        total_chol: 5.0,
        hdl: 1.0,
        ldl: 3.5,
        smoker: false,
        diabetes: false,
        egfr: 80.0,
        crp: 2.0,
        vascular_territories: 0,
        hba1c: None,
    }
}
