//! Catalog source port: where the intervention catalog comes from.
//!
//! The engine only ever sees a validated `Catalog`; sources differ in where
//! the JSON bytes are read from.

use crate::domain::{Catalog, CatalogError};

/// Trait for loading a reference catalog.
pub trait CatalogSource: Send + Sync {
    /// Read, parse and schema-check the catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::Io` if the source cannot be read, or the parse
    /// and schema errors of [`Catalog::from_json_slice`].
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Short description of the source for logs.
    fn describe(&self) -> String;
}
