//! Application layer: Use cases and services.
//!
//! This module orchestrates the domain models into the full assessment
//! use case.

mod assessment;
mod request;

pub use assessment::{
    AssessmentResult, ContraindicationNote, LdlProjection, Pathway, RiskEngine,
};
pub use request::AssessmentRequest;
