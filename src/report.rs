//! Plain-text rendering of assessment results.
//!
//! Percentages are rounded to one decimal here and nowhere else.

use std::fmt;

use crate::application::{AssessmentResult, Pathway};
use crate::domain::{Catalog, EvidenceTopic, PatientProfile, RiskEstimate};

/// Baseline-only report.
pub struct BaselineReport<'a> {
    pub profile: &'a PatientProfile,
    pub baseline: &'a RiskEstimate,
}

impl fmt::Display for BaselineReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Baseline {} risk: {:.1}% ({})",
            self.baseline.horizon, self.baseline.percent, self.baseline.category
        )?;
        writeln!(f, "  {}", self.baseline.category.description())?;
        writeln!(
            f,
            "Key risk factors: {}",
            self.profile.key_risk_factors().join(" | ")
        )
    }
}

/// Full treatment-effect report.
pub struct AssessmentReport<'a> {
    pub profile: &'a PatientProfile,
    pub result: &'a AssessmentResult,
    pub catalog: &'a Catalog,
}

impl fmt::Display for AssessmentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        write!(
            f,
            "{}",
            BaselineReport {
                profile: self.profile,
                baseline: &r.baseline,
            }
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "Post-intervention {} risk: {:.1}% ({})",
            r.horizon, r.final_risk.percent, r.final_risk.category
        )?;
        writeln!(
            f,
            "Absolute reduction: {:.1} percentage points | Relative reduction: {:.1}%",
            r.arr, r.rrr
        )?;
        writeln!(f)?;

        writeln!(f, "Pathways:")?;
        writeln!(
            f,
            "  {:<24} {:>5.1}%  (LDL-C {:.2} -> {:.2} mmol/L, RRR {:.1}%)",
            Pathway::Ldl.to_string(),
            r.ldl.effect.projected_risk,
            self.profile.ldl,
            r.ldl.final_ldl,
            r.ldl.effect.rrr
        )?;
        writeln!(
            f,
            "  {:<24} {:>5.1}%  (RRR {:.1}%)",
            Pathway::BloodPressure.to_string(),
            r.blood_pressure.projected_risk,
            r.blood_pressure.rrr
        )?;
        writeln!(
            f,
            "  {:<24} {:>5.1}%  (RRR {:.1}%)",
            Pathway::Interventions.to_string(),
            r.combined.projected_risk,
            r.combined.rrr
        )?;
        writeln!(f, "Selected: {}", r.selected_pathway)?;

        if !r.contraindications.is_empty() {
            writeln!(f)?;
            writeln!(f, "Review contraindications:")?;
            for note in &r.contraindications {
                writeln!(f, "  - {}: {}", note.name, note.contraindications.join(", "))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Evidence:")?;
        for topic in [EvidenceTopic::Ldl, EvidenceTopic::BloodPressure, EvidenceTopic::Lifestyle] {
            if let Ok(evidence) = self.catalog.evidence(topic) {
                write!(f, "  - {} ({})", evidence.effect, evidence.source)?;
                match evidence.pubmed_url() {
                    Some(url) => writeln!(f, " {url}")?,
                    None => writeln!(f)?,
                }
            }
        }

        writeln!(
            f,
            "Catalog {} | Decision support estimate only",
            &r.catalog_fingerprint[..r.catalog_fingerprint.len().min(12)]
        )
    }
}
