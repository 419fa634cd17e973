//! # crcscreen
//!
//! Colorectal cancer screening risk stratification.
//!
//! Given a patient's birth date, height, weight and yes/no answers to a risk
//! questionnaire, selects one screening strategy from a fixed, prioritized
//! rule table and attaches a BMI advisory when relevant.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and the rule table (pure, no I/O)
//! - `ports`: Trait definitions for external inputs (the clock)
//! - `adapters`: Concrete implementations (clocks, log sanitization)
//! - `application`: The screening evaluation use case
//! - `config` / `cli`: Environment settings and the command-line front end

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{ScreeningReport, ScreeningService};
pub use domain::{Category, PatientProfile, RecommendationRecord, RiskFactors, ScreeningError};

/// Result type for crcscreen operations
pub type Result<T> = std::result::Result<T, CrcScreenError>;

/// Main error type for crcscreen
#[derive(Debug, thiserror::Error)]
pub enum CrcScreenError {
    #[error("Invalid patient data: {0}")]
    Screening(#[from] domain::ScreeningError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
