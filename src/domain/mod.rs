//! Domain layer: Core screening types and logic.
//!
//! Pure functions and immutable types with no I/O. "Today" is always passed
//! in explicitly.

mod metrics;
mod patient;
mod recommendation;
pub mod rules;

pub use metrics::{compute_age, compute_bmi, min_birth_date, DerivedMetrics, MAX_AGE, OVERWEIGHT_BMI};
pub use patient::{Field, Measurement, PatientProfile, RiskFactors, ScreeningError, ScreeningIntake};
pub use recommendation::{bmi_advisory, disclaimer, Category, Locale, RecommendationRecord};
pub use rules::{classify, RuleInput};
