//! Derived metrics: age from birth date, BMI from height and weight.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Field, ScreeningError};

/// Ages above this are treated as a mistyped birth date.
pub const MAX_AGE: u32 = 120;

/// Threshold at which the BMI advisory is attached.
pub const OVERWEIGHT_BMI: f64 = 25.0;

/// Earliest accepted birth date.
#[must_use]
pub fn min_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Metrics computed from a profile at evaluation time. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Age in whole years
    pub age: u32,
    /// Body-mass index, one decimal
    pub bmi: f64,
}

impl DerivedMetrics {
    /// Whether the BMI advisory applies.
    #[must_use]
    pub fn is_overweight(&self) -> bool {
        self.bmi >= OVERWEIGHT_BMI
    }
}

/// Age in whole years on `today`.
///
/// One year is subtracted when the birthday has not yet occurred this year
/// (the `(month, day)` pair of `today` precedes that of `birth_date`).
///
/// # Errors
/// Returns [`ScreeningError::InvalidDate`] when the birth date is in the
/// future, before 1900-01-01, or yields an age above [`MAX_AGE`].
pub fn compute_age(birth_date: NaiveDate, today: NaiveDate) -> Result<u32, ScreeningError> {
    if birth_date > today {
        return Err(ScreeningError::InvalidDate {
            reason: "birth date is in the future".to_string(),
        });
    }
    if birth_date < min_birth_date() {
        return Err(ScreeningError::InvalidDate {
            reason: "birth date is before 1900-01-01".to_string(),
        });
    }

    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    // birth_date <= today, so age is never negative here.
    let age = u32::try_from(age).map_err(|_| ScreeningError::InvalidDate {
        reason: format!("computed age {age} is negative"),
    })?;
    if age > MAX_AGE {
        return Err(ScreeningError::InvalidDate {
            reason: format!("computed age {age} exceeds {MAX_AGE}"),
        });
    }
    Ok(age)
}

/// Body-mass index rounded to one decimal, half away from zero.
///
/// # Errors
/// Returns [`ScreeningError::InvalidMeasurement`] when either value is not a
/// positive finite number, or when a vanishingly small height makes the
/// quotient overflow.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<f64, ScreeningError> {
    check_positive(Field::Height, height_cm)?;
    check_positive(Field::Weight, weight_kg)?;

    let height_m = height_cm / 100.0;
    let bmi = round_one_decimal(weight_kg / (height_m * height_m));
    if !bmi.is_finite() {
        return Err(ScreeningError::InvalidMeasurement {
            field: Field::Height,
            reason: format!("height {height_cm} cm yields a non-finite BMI"),
        });
    }
    Ok(bmi)
}

/// Validate that a measurement is positive and finite.
pub(crate) fn check_positive(field: Field, value: f64) -> Result<(), ScreeningError> {
    if !value.is_finite() {
        return Err(ScreeningError::InvalidMeasurement {
            field,
            reason: "value is not a finite number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ScreeningError::InvalidMeasurement {
            field,
            reason: format!("value {value} must be greater than zero"),
        });
    }
    Ok(())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
