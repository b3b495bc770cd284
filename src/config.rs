//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PRIME_CATALOG_PATH` | unset | Catalog JSON to use instead of the built-in one |
//! | `PRIME_LOG_MODE` | `stderr` | `stderr` or `file` |
//! | `PRIME_LOG_FILE` | `prime-cvd.log` | Log file for `file` mode |
//! | `PRIME_SANITIZE_MAX_BYTES` | 16384 | Per-line cap for log sanitizing |
//! | `RUST_LOG` | `info` | Log filter |

use std::path::PathBuf;

use crate::adapters::{EmbeddedCatalog, JsonFileCatalog};
use crate::ports::CatalogSource;
use crate::PrimeError;

pub const CATALOG_PATH_ENV: &str = "PRIME_CATALOG_PATH";
pub const LOG_MODE_ENV: &str = "PRIME_LOG_MODE";
pub const LOG_FILE_ENV: &str = "PRIME_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "prime-cvd.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    /// Standard error; stdout is reserved for the report.
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub catalog_path: Option<PathBuf>,
    pub log_mode: LogMode,
}

impl RuntimeConfig {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns `PrimeError::Config` for an unknown log mode.
    pub fn from_env() -> Result<Self, PrimeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns `PrimeError::Config` for an unknown log mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PrimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup(CATALOG_PATH_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let log_mode = match lookup(LOG_MODE_ENV).as_deref().map(str::trim) {
            None | Some("") | Some("stderr") => LogMode::Stderr,
            Some("file") => {
                let path = lookup(LOG_FILE_ENV).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
                LogMode::File(PathBuf::from(path))
            }
            Some(other) => {
                return Err(PrimeError::Config(format!(
                    "{LOG_MODE_ENV}={other:?} (expected stderr or file)"
                )))
            }
        };

        Ok(Self {
            catalog_path,
            log_mode,
        })
    }

    /// Catalog source selected by this configuration.
    #[must_use]
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog_path {
            Some(path) => Box::new(JsonFileCatalog::new(path.clone())),
            None => Box::new(EmbeddedCatalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<RuntimeConfig, PrimeError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).expect("Should resolve");
        assert_eq!(cfg.catalog_path, None);
        assert_eq!(cfg.log_mode, LogMode::Stderr);
        assert_eq!(cfg.catalog_source().describe(), "built-in catalog");
    }

    #[test]
    fn test_file_logging_and_catalog_path() {
        let cfg = config(&[
            (LOG_MODE_ENV, "file"),
            (LOG_FILE_ENV, "/tmp/prime.log"),
            (CATALOG_PATH_ENV, "/etc/prime/catalog.json"),
        ])
        .expect("Should resolve");

        assert_eq!(cfg.log_mode, LogMode::File(PathBuf::from("/tmp/prime.log")));
        assert_eq!(
            cfg.catalog_path,
            Some(PathBuf::from("/etc/prime/catalog.json"))
        );
        assert!(cfg.catalog_source().describe().contains("catalog.json"));
    }

    #[test]
    fn test_file_logging_default_path() {
        let cfg = config(&[(LOG_MODE_ENV, "file")]).expect("Should resolve");
        assert_eq!(cfg.log_mode, LogMode::File(PathBuf::from(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn test_unknown_log_mode() {
        assert!(matches!(
            config(&[(LOG_MODE_ENV, "syslog")]),
            Err(PrimeError::Config(_))
        ));
    }

    #[test]
    fn test_blank_catalog_path_is_ignored() {
        let cfg = config(&[(CATALOG_PATH_ENV, "  ")]).expect("Should resolve");
        assert_eq!(cfg.catalog_path, None);
    }
}
