//! Adapters layer: Concrete implementations of ports.
//!
//! - `catalog`: built-in and file-backed JSON catalogs
//! - `sanitize`: patient-identifier filtering for logs

pub mod catalog;
pub mod sanitize;

pub use catalog::{builtin_catalog, EmbeddedCatalog, JsonFileCatalog};
