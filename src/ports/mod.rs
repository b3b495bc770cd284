//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the risk engine and the outside world.

mod catalog_source;

pub use catalog_source::CatalogSource;
