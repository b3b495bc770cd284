//! Risk estimate types.
//!
//! Represents the output of the baseline scorer and the treatment-effect models.

use serde::{Deserialize, Serialize};

/// Time window a risk estimate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "5yr")]
    FiveYear,
    #[serde(rename = "10yr")]
    TenYear,
    #[serde(rename = "lifetime")]
    Lifetime,
}

impl Horizon {
    /// Wire label ("5yr", "10yr", "lifetime").
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FiveYear => "5yr",
            Self::TenYear => "10yr",
            Self::Lifetime => "lifetime",
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Horizon {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5yr" => Ok(Self::FiveYear),
            "10yr" => Ok(Self::TenYear),
            "lifetime" => Ok(Self::Lifetime),
            other => Err(RiskError::Validation(vec![format!(
                "Unknown horizon {other:?} (expected 5yr, 10yr or lifetime)"
            )])),
        }
    }
}

/// Three-tier display category for a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// Below 10%
    Low,
    /// 10% to below 20%
    Medium,
    /// 20% and above
    High,
}

impl RiskCategory {
    /// Classify a risk percentage.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 20.0 {
            Self::High
        } else if percent >= 10.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk of recurrent cardiovascular events",
            Self::Medium => "Medium risk - optimise modifiable risk factors",
            Self::High => "High risk - intensive secondary prevention advised",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A risk percentage tagged with its horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Risk in percent (0-100 scale)
    pub percent: f64,

    pub horizon: Horizon,

    pub category: RiskCategory,
}

impl RiskEstimate {
    /// Create an estimate; the category is derived from the percentage.
    #[must_use]
    pub fn new(percent: f64, horizon: Horizon) -> Self {
        Self {
            percent,
            horizon,
            category: RiskCategory::from_percent(percent),
        }
    }
}

impl std::fmt::Display for RiskEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}% ({} risk, {})", self.percent, self.horizon, self.category)
    }
}

/// Output of the intervention combiner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedEffectResult {
    /// Projected risk in percent
    pub projected_risk: f64,

    /// Relative risk reduction in percent
    pub rrr: f64,

    /// Absolute risk reduction in percentage points
    pub arr: f64,
}

/// Error type for risk computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unable to compute risk: {0}")]
    Computation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_thresholds() {
        assert_eq!(RiskCategory::from_percent(9.99), RiskCategory::Low);
        assert_eq!(RiskCategory::from_percent(10.0), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_percent(19.9), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_percent(20.0), RiskCategory::High);
    }

    #[test]
    fn test_horizon_labels() {
        assert_eq!("5yr".parse::<Horizon>().expect("Should parse"), Horizon::FiveYear);
        assert_eq!("lifetime".parse::<Horizon>().expect("Should parse"), Horizon::Lifetime);
        assert!("20yr".parse::<Horizon>().is_err());

        let json = serde_json::to_string(&Horizon::TenYear).expect("Should serialize");
        assert_eq!(json, "\"10yr\"");
    }

    #[test]
    fn test_estimate_display() {
        let estimate = RiskEstimate::new(28.9, Horizon::TenYear);
        assert_eq!(estimate.category, RiskCategory::High);
        assert_eq!(estimate.to_string(), "28.9% (10yr risk, HIGH)");
    }

    #[test]
    fn test_validation_error_lists_all_problems() {
        let err = RiskError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Invalid input: a; b");
    }
}
