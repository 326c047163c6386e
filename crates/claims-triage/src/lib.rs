//! Risk scoring engine for insurance-claim fraud triage.
//!
//! The dashboard around this crate handles storage, auth, and presentation;
//! this crate owns the scoring pipeline (feature extraction, strategies,
//! ensemble, classification, explanation) plus the HTTP router that exposes
//! it.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
