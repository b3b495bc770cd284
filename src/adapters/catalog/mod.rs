//! Catalog adapters: built-in and file-backed JSON catalogs.
//!
//! The built-in catalog is compiled into the binary and parsed at most once
//! per process. File catalogs are read on every `load()`; callers are
//! expected to load once at startup and share the result.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::domain::{Catalog, CatalogError};
use crate::ports::CatalogSource;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../../catalog/default_catalog.json");

static BUILTIN: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// The catalog shipped with the binary.
///
/// # Errors
/// Only fails if the embedded JSON is broken, which the test suite guards.
pub fn builtin_catalog() -> Result<&'static Catalog, CatalogError> {
    BUILTIN
        .get_or_init(|| Catalog::from_json_slice(DEFAULT_CATALOG_JSON.as_bytes()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Source for the embedded default catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = builtin_catalog()?.clone();
        tracing::info!(
            "Loaded built-in catalog (fingerprint={})",
            &catalog.fingerprint()[..12]
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// Source for a catalog JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", self.path.display())))?;

        let catalog = Catalog::from_json_slice(&bytes).map_err(|e| {
            tracing::error!("Rejected catalog {:?}: {}", self.path, e);
            e
        })?;

        tracing::info!(
            "Loaded catalog from {:?} (fingerprint={})",
            self.path,
            &catalog.fingerprint()[..12]
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EvidenceTopic, Horizon, InterventionId, LdlTherapyId, TherapyKind};
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().expect("Built-in catalog should be valid");
        assert_eq!(catalog.interventions().count(), 5);
        assert_eq!(catalog.ldl_therapies().count(), 7);

        let smoking = catalog
            .intervention(InterventionId::SmokingCessation)
            .expect("Should find");
        assert_eq!(smoking.arr(Horizon::FiveYear), Some(5.0));
        assert_eq!(smoking.arr(Horizon::Lifetime), Some(17.0));

        let antiplatelet = catalog
            .intervention(InterventionId::Antiplatelet)
            .expect("Should find");
        assert_eq!(antiplatelet.contraindications.len(), 2);

        let atorva = catalog
            .ldl_therapy(LdlTherapyId::Atorvastatin80)
            .expect("Should find");
        assert_eq!(atorva.kind, TherapyKind::Statin);
        assert_eq!(atorva.ldl_reduction_percent, 50.0);

        for topic in [EvidenceTopic::Ldl, EvidenceTopic::BloodPressure, EvidenceTopic::Lifestyle] {
            assert!(catalog.evidence(topic).is_ok());
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = builtin_catalog().expect("Should load");
        let b = builtin_catalog().expect("Should load");
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_embedded_source_matches_builtin() {
        let loaded = EmbeddedCatalog.load().expect("Should load");
        let builtin = builtin_catalog().expect("Should load");
        assert_eq!(loaded.fingerprint(), builtin.fingerprint());
    }

    #[test]
    fn test_file_catalog_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(DEFAULT_CATALOG_JSON.as_bytes())
            .expect("Should write");

        let source = JsonFileCatalog::new(file.path());
        let catalog = source.load().expect("Should load");
        assert_eq!(
            catalog.fingerprint(),
            builtin_catalog().expect("Should load").fingerprint()
        );
        assert!(source.describe().starts_with("catalog file"));
    }

    #[test]
    fn test_file_catalog_missing_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let source = JsonFileCatalog::new(dir.path().join("missing.json"));
        assert!(matches!(source.load(), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_file_catalog_rejects_bad_schema() {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(br#"{"version": 1, "interventions": [], "ldl_therapies": []}"#)
            .expect("Should write");

        let source = JsonFileCatalog::new(file.path());
        assert!(matches!(source.load(), Err(CatalogError::Schema(_))));
    }
}
