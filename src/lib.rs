//! # PRIME CVD
//!
//! Secondary-prevention cardiovascular risk engine.
//!
//! This crate provides:
//! - A SMART-style 10-year baseline risk score for patients after a prior
//!   ischemic event
//! - 5-year and lifetime rescaling of that baseline
//! - Treatment-effect models for LDL lowering, blood-pressure control and
//!   combined lifestyle/medical interventions
//! - A typed, schema-checked catalog of interventions and their evidence
//!
//! Estimates are decision support only; they are not a validated clinical
//! certification.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Risk models and their value types (pure functions)
//! - `ports`: Trait definitions for external inputs (catalog sources)
//! - `adapters`: Concrete implementations (embedded/file catalogs, log sanitizing)
//! - `application`: The assessment use case orchestrating the models
//! - `config`: Runtime configuration from the environment
//! - `report`: Plain-text rendering of assessment results

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod report;

pub use application::{AssessmentRequest, AssessmentResult, RiskEngine};
pub use domain::{
    adjust_horizon, apply_ldl_effect, bp_effect, combine_interventions, score, Catalog,
    CatalogError, CombinedEffectResult, Horizon, PatientProfile, RiskCategory, RiskError,
    RiskEstimate, TreatmentPlan,
};

/// Result type for PRIME operations
pub type Result<T> = std::result::Result<T, PrimeError>;

/// Main error type for PRIME
#[derive(Debug, thiserror::Error)]
pub enum PrimeError {
    #[error("Risk assessment failed: {0}")]
    Risk(#[from] RiskError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
