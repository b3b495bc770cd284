//! Intervention and LDL-therapy reference catalog.
//!
//! The catalog is parsed and schema-checked once, then shared read-only.
//! Entries are addressed by enumerated identifiers; display names are only
//! used for presentation and exact-name lookup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::risk::{Horizon, RiskError};

/// Only catalog schema version understood by this build.
pub const CATALOG_VERSION: u32 = 1;

/// Error type for catalog loading and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog could not be read: {0}")]
    Io(String),

    #[error("Catalog is not valid JSON: {0}")]
    Parse(String),

    #[error("Catalog failed schema checks: {}", .0.join("; "))]
    Schema(Vec<String>),

    #[error("Unknown intervention: {0:?}")]
    UnknownIntervention(InterventionId),

    #[error("Unknown LDL therapy: {0:?}")]
    UnknownTherapy(LdlTherapyId),

    #[error("No evidence entry for topic {0:?}")]
    UnknownEvidence(EvidenceTopic),

    #[error("No catalog entry named {0:?}")]
    UnknownName(String),
}

impl From<CatalogError> for RiskError {
    fn from(e: CatalogError) -> Self {
        RiskError::Computation(e.to_string())
    }
}

/// Stable identifier of a non-LDL intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionId {
    SmokingCessation,
    Antiplatelet,
    MediterraneanDiet,
    RegularExercise,
    AlcoholModeration,
}

/// Stable identifier of an LDL-lowering therapy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LdlTherapyId {
    #[serde(rename = "atorvastatin_20")]
    Atorvastatin20,
    #[serde(rename = "atorvastatin_80")]
    Atorvastatin80,
    #[serde(rename = "rosuvastatin_10")]
    Rosuvastatin10,
    #[serde(rename = "rosuvastatin_20_40")]
    Rosuvastatin20To40,
    #[serde(rename = "ezetimibe")]
    Ezetimibe,
    #[serde(rename = "pcsk9_inhibitor")]
    Pcsk9Inhibitor,
    #[serde(rename = "bempedoic_acid")]
    BempedoicAcid,
}

/// Whether an LDL therapy is a statin or an add-on to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapyKind {
    Statin,
    AddOn,
}

/// Topic of a citation shown alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceTopic {
    Ldl,
    BloodPressure,
    Lifestyle,
}

/// A non-LDL intervention and its evidence-based effect size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: InterventionId,

    /// Display name, unique within the catalog
    pub name: String,

    /// Absolute risk reduction in percentage points, keyed by horizon
    pub absolute_risk_reduction: BTreeMap<Horizon, f64>,

    pub mechanism: String,

    #[serde(default)]
    pub contraindications: Vec<String>,

    pub citation: String,
}

impl Intervention {
    /// Absolute risk reduction for `horizon`, if the catalog provides one.
    #[must_use]
    pub fn arr(&self, horizon: Horizon) -> Option<f64> {
        self.absolute_risk_reduction.get(&horizon).copied()
    }
}

/// An LDL-lowering therapy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdlTherapy {
    pub id: LdlTherapyId,
    pub name: String,
    pub kind: TherapyKind,

    /// Expected LDL-C reduction in percent
    pub ldl_reduction_percent: f64,

    pub citation: String,
}

/// A citation for one of the effect models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub topic: EvidenceTopic,
    pub effect: String,
    pub source: String,
    #[serde(default)]
    pub pmid: Option<String>,
}

impl Evidence {
    /// PubMed link for the citation, if a PMID is known.
    #[must_use]
    pub fn pubmed_url(&self) -> Option<String> {
        self.pmid
            .as_ref()
            .map(|pmid| format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/"))
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    version: u32,
    interventions: Vec<Intervention>,
    ldl_therapies: Vec<LdlTherapy>,
    #[serde(default)]
    evidence: Vec<Evidence>,
}

/// Validated, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    interventions: BTreeMap<InterventionId, Intervention>,
    ldl_therapies: BTreeMap<LdlTherapyId, LdlTherapy>,
    evidence: BTreeMap<EvidenceTopic, Evidence>,
    fingerprint: String,
}

impl Catalog {
    /// Parse and schema-check a JSON catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::Parse` on malformed JSON or unknown identifiers,
    /// and `CatalogError::Schema` listing every schema violation.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let errors = check_schema(&document);
        if !errors.is_empty() {
            return Err(CatalogError::Schema(errors));
        }

        Ok(Self {
            interventions: document.interventions.into_iter().map(|i| (i.id, i)).collect(),
            ldl_therapies: document.ldl_therapies.into_iter().map(|t| (t.id, t)).collect(),
            evidence: document.evidence.into_iter().map(|e| (e.topic, e)).collect(),
            fingerprint: sha256_hex(bytes),
        })
    }

    /// SHA-256 of the catalog source, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Look up an intervention.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownIntervention` if the catalog has no such entry.
    pub fn intervention(&self, id: InterventionId) -> Result<&Intervention, CatalogError> {
        self.interventions
            .get(&id)
            .ok_or(CatalogError::UnknownIntervention(id))
    }

    /// Look up an intervention by its exact display name.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownName` if no entry carries that name.
    pub fn intervention_by_name(&self, name: &str) -> Result<&Intervention, CatalogError> {
        self.interventions
            .values()
            .find(|i| i.name == name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    /// Look up an LDL therapy.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownTherapy` if the catalog has no such entry.
    pub fn ldl_therapy(&self, id: LdlTherapyId) -> Result<&LdlTherapy, CatalogError> {
        self.ldl_therapies
            .get(&id)
            .ok_or(CatalogError::UnknownTherapy(id))
    }

    /// Look up an LDL therapy by its exact display name.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownName` if no entry carries that name.
    pub fn ldl_therapy_by_name(&self, name: &str) -> Result<&LdlTherapy, CatalogError> {
        self.ldl_therapies
            .values()
            .find(|t| t.name == name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    /// Look up the citation for an effect model.
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownEvidence` if the topic is missing.
    pub fn evidence(&self, topic: EvidenceTopic) -> Result<&Evidence, CatalogError> {
        self.evidence
            .get(&topic)
            .ok_or(CatalogError::UnknownEvidence(topic))
    }

    pub fn interventions(&self) -> impl Iterator<Item = &Intervention> {
        self.interventions.values()
    }

    pub fn ldl_therapies(&self) -> impl Iterator<Item = &LdlTherapy> {
        self.ldl_therapies.values()
    }
}

fn check_schema(document: &CatalogDocument) -> Vec<String> {
    let mut errors = Vec::new();

    if document.version != CATALOG_VERSION {
        errors.push(format!(
            "Unsupported catalog version {} (expected {CATALOG_VERSION})",
            document.version
        ));
    }
    if document.interventions.is_empty() {
        errors.push("Catalog has no interventions".to_string());
    }
    if document.ldl_therapies.is_empty() {
        errors.push("Catalog has no LDL therapies".to_string());
    }

    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    for iv in &document.interventions {
        if !ids.insert(iv.id) {
            errors.push(format!("Duplicate intervention id {:?}", iv.id));
        }
        check_name(&mut errors, &mut names, &iv.name);
        if iv.citation.trim().is_empty() {
            errors.push(format!("Intervention {:?} has no citation", iv.name));
        }
        for required in [Horizon::FiveYear, Horizon::Lifetime] {
            if iv.arr(required).is_none() {
                errors.push(format!(
                    "Intervention {:?} has no {required} absolute risk reduction",
                    iv.name
                ));
            }
        }
        for (horizon, arr) in &iv.absolute_risk_reduction {
            if !arr.is_finite() || !(0.0..=100.0).contains(arr) {
                errors.push(format!(
                    "Intervention {:?} {horizon} absolute risk reduction {arr} out of range [0, 100]",
                    iv.name
                ));
            }
        }
    }

    let mut therapy_ids = BTreeSet::new();
    let mut therapy_names = BTreeSet::new();
    for therapy in &document.ldl_therapies {
        if !therapy_ids.insert(therapy.id) {
            errors.push(format!("Duplicate LDL therapy id {:?}", therapy.id));
        }
        check_name(&mut errors, &mut therapy_names, &therapy.name);
        if therapy.citation.trim().is_empty() {
            errors.push(format!("LDL therapy {:?} has no citation", therapy.name));
        }
        let pct = therapy.ldl_reduction_percent;
        if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
            errors.push(format!(
                "LDL therapy {:?} reduction {pct}% out of range (0, 100]",
                therapy.name
            ));
        }
    }

    let mut topics = BTreeSet::new();
    for entry in &document.evidence {
        if !topics.insert(entry.topic) {
            errors.push(format!("Duplicate evidence topic {:?}", entry.topic));
        }
    }

    errors
}

fn check_name(errors: &mut Vec<String>, seen: &mut BTreeSet<String>, name: &str) {
    if name.trim().is_empty() {
        errors.push("Catalog entry with empty name".to_string());
    } else if !seen.insert(name.to_string()) {
        errors.push(format!("Duplicate catalog name {name:?}"));
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
