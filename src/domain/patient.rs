//! Patient answers for colorectal cancer screening.
//!
//! Raw form answers arrive as a [`ScreeningIntake`], where any field may be
//! missing or mistyped. Validation turns it into an immutable
//! [`PatientProfile`], the only input the classifier accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metrics::{check_positive, compute_age, compute_bmi, DerivedMetrics};

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BirthDate,
    Height,
    Weight,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BirthDate => write!(f, "birth date"),
            Self::Height => write!(f, "height"),
            Self::Weight => write!(f, "weight"),
        }
    }
}

/// Errors raised while validating patient answers.
///
/// All of them are recoverable: the caller re-prompts for the field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScreeningError {
    #[error("Invalid birth date: {reason}")]
    InvalidDate { reason: String },

    #[error("Invalid {field}: {reason}")]
    InvalidMeasurement { field: Field, reason: String },

    #[error("Missing required field: {field}")]
    IncompleteInput { field: Field },
}

impl ScreeningError {
    /// The field that failed validation.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            Self::InvalidDate { .. } => Field::BirthDate,
            Self::InvalidMeasurement { field, .. } | Self::IncompleteInput { field } => *field,
        }
    }
}

/// Yes/no answers to the risk questionnaire.
///
/// Syndrome-level answers (`hereditary_syndrome`, `fap`, `fap_attenuated`,
/// `hamartomatous_syndrome`, `serrated_polyposis_syndrome`) are independent
/// top-level questions. The remaining sub-answers are only meaningful under
/// their parent; see [`RiskFactors::normalized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskFactors {
    /// Lynch syndrome or another hereditary cancer syndrome
    pub hereditary_syndrome: bool,
    /// Crohn's disease or ulcerative colitis
    pub inflammatory_bowel_disease: bool,
    /// Familial adenomatous polyposis
    pub fap: bool,
    /// Attenuated familial adenomatous polyposis
    pub fap_attenuated: bool,
    /// Peutz-Jeghers, Cowden
    pub hamartomatous_syndrome: bool,
    pub serrated_polyposis_syndrome: bool,

    pub first_degree_relative_with_crc: bool,
    /// Only consulted under `first_degree_relative_with_crc`
    pub relative_diagnosed_before_60: bool,

    pub polyp_found_last_10_years: bool,
    /// Large or histologically high-risk polyp
    pub advanced_polyp: bool,
    pub serrated_polyp: bool,
    pub resected: bool,
}

impl RiskFactors {
    /// Clear sub-answers whose parent answer is `false`.
    ///
    /// A form asks the follow-up questions only when the parent box is
    /// ticked, so stale follow-ups from a since-unticked parent are dropped.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut factors = self;
        if !factors.first_degree_relative_with_crc {
            factors.relative_diagnosed_before_60 = false;
        }
        if !factors.polyp_found_last_10_years {
            factors.advanced_polyp = false;
            factors.serrated_polyp = false;
            factors.resected = false;
        }
        factors
    }
}

/// Validated, immutable patient answers.
///
/// Constructed per evaluation and discarded once the recommendation is
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientProfile {
    /// Local identifier, echoed in the report only
    pub id: Option<String>,
    pub birth_date: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Normalized risk answers
    pub risk_factors: RiskFactors,
    /// Rectal bleeding, change in bowel habit or unexplained weight loss
    pub symptoms_present: bool,
}

impl PatientProfile {
    /// Create a profile, validating measurements and the birth date.
    ///
    /// # Errors
    /// Returns [`ScreeningError`] for out-of-range dates, non-positive
    /// measurements, or measurements whose BMI is not a finite number.
    pub fn new(
        birth_date: NaiveDate,
        height_cm: f64,
        weight_kg: f64,
        risk_factors: RiskFactors,
        symptoms_present: bool,
        today: NaiveDate,
    ) -> Result<Self, ScreeningError> {
        compute_age(birth_date, today)?;
        compute_bmi(height_cm, weight_kg)?;

        Ok(Self {
            id: None,
            birth_date,
            height_cm,
            weight_kg,
            risk_factors: risk_factors.normalized(),
            symptoms_present,
        })
    }

    /// Attach a local identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Compute age and BMI as of `today`.
    ///
    /// # Errors
    /// Returns [`ScreeningError::InvalidDate`] if `today` makes the birth
    /// date invalid (for example a profile evaluated with an earlier clock).
    pub fn metrics(&self, today: NaiveDate) -> Result<DerivedMetrics, ScreeningError> {
        Ok(DerivedMetrics {
            age: compute_age(self.birth_date, today)?,
            bmi: compute_bmi(self.height_cm, self.weight_kg)?,
        })
    }
}

/// A measurement as typed into a form: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    /// Parse into a positive finite number.
    ///
    /// Blank text counts as a missing answer.
    ///
    /// # Errors
    /// Returns [`ScreeningError::IncompleteInput`] for blank text and
    /// [`ScreeningError::InvalidMeasurement`] for anything else that is not
    /// a positive number.
    pub fn parse(&self, field: Field) -> Result<f64, ScreeningError> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ScreeningError::IncompleteInput { field });
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| ScreeningError::InvalidMeasurement {
                        field,
                        reason: format!("'{trimmed}' is not a number"),
                    })?
            }
        };
        check_positive(field, value)?;
        Ok(value)
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Raw questionnaire answers, possibly incomplete.
///
/// Unknown keys are rejected: a misspelled answer must not silently read
/// as "no".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningIntake {
    pub patient_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<Measurement>,
    pub weight_kg: Option<Measurement>,
    pub risk_factors: RiskFactors,
    pub symptoms_present: bool,
}

impl ScreeningIntake {
    /// Validate the answers into a [`PatientProfile`].
    ///
    /// Fields are checked in form order: birth date, height, weight.
    ///
    /// # Errors
    /// Returns the first [`ScreeningError`] found.
    pub fn into_profile(self, today: NaiveDate) -> Result<PatientProfile, ScreeningError> {
        let birth_date = self.birth_date.ok_or(ScreeningError::IncompleteInput {
            field: Field::BirthDate,
        })?;
        compute_age(birth_date, today)?;

        let height_cm = self
            .height_cm
            .as_ref()
            .ok_or(ScreeningError::IncompleteInput {
                field: Field::Height,
            })?
            .parse(Field::Height)?;
        let weight_kg = self
            .weight_kg
            .as_ref()
            .ok_or(ScreeningError::IncompleteInput {
                field: Field::Weight,
            })?
            .parse(Field::Weight)?;

        let profile = PatientProfile::new(
            birth_date,
            height_cm,
            weight_kg,
            self.risk_factors,
            self.symptoms_present,
            today,
        )?;
        Ok(match self.patient_id {
            Some(id) => profile.with_id(id),
            None => profile,
        })
    }
}
