//! Screening service: Orchestrates one risk-stratification evaluation.
//!
//! Pipeline:
//! 1. Validate raw answers into a `PatientProfile`
//! 2. Compute age and BMI as of the clock's date
//! 3. Select the winning rule from the table
//! 4. Attach the BMI advisory

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::rules::select;
use crate::domain::{
    Category, Locale, PatientProfile, RecommendationRecord, RuleInput, ScreeningError,
    ScreeningIntake,
};
use crate::ports::Clock;

/// Outcome of one evaluation, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    /// Local identifier from the intake, if any
    pub patient_id: Option<String>,
    pub evaluated_on: NaiveDate,
    pub age: u32,
    pub bmi: f64,
    pub category: Category,
    /// Category heading in the report language
    pub label: String,
    pub severity_tier: u8,
    pub protocol_text: String,
    pub bmi_advisory: Option<String>,
    /// Lower-priority categories that also matched and were outranked
    pub also_matched: Vec<Category>,
}

/// Service for evaluating screening recommendations.
///
/// Holds no per-patient state: every call is independent and the same
/// inputs on the same date always produce the same report.
pub struct ScreeningService<C>
where
    C: Clock,
{
    clock: C,
    locale: Locale,
}

impl<C> ScreeningService<C>
where
    C: Clock,
{
    /// Create a new screening service.
    pub fn new(clock: C, locale: Locale) -> Self {
        Self { clock, locale }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The date evaluations are computed against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validate raw answers and evaluate them.
    ///
    /// # Errors
    /// Returns [`ScreeningError`] naming the field that failed validation.
    pub fn evaluate_intake(&self, intake: ScreeningIntake) -> Result<ScreeningReport, ScreeningError> {
        let today = self.clock.today();
        tracing::debug!("Validating intake...");
        let profile = intake.into_profile(today).map_err(|e| {
            tracing::warn!(field = %e.field(), "Intake rejected: {}", e);
            e
        })?;
        self.evaluate_on(&profile, today)
    }

    /// Evaluate an already validated profile.
    ///
    /// # Errors
    /// Returns [`ScreeningError::InvalidDate`] if the birth date is invalid
    /// relative to the clock's date.
    pub fn evaluate(&self, profile: &PatientProfile) -> Result<ScreeningReport, ScreeningError> {
        self.evaluate_on(profile, self.clock.today())
    }

    fn evaluate_on(
        &self,
        profile: &PatientProfile,
        today: NaiveDate,
    ) -> Result<ScreeningReport, ScreeningError> {
        tracing::debug!("Computing derived metrics...");
        let metrics = profile.metrics(today)?;

        tracing::debug!("Classifying...");
        let input = RuleInput::new(metrics.age, profile.risk_factors, profile.symptoms_present);
        let selection = select(&input);
        let also_matched: Vec<Category> =
            selection.outranked.iter().map(|rule| rule.category).collect();

        let record = RecommendationRecord::new(
            selection.winner.category,
            metrics.is_overweight(),
            self.locale,
        );
        if record.is_urgent() {
            tracing::warn!("Red-flag symptoms reported; urgent evaluation required");
        }

        tracing::info!(
            category = ?record.category,
            tier = record.severity_tier,
            trigger = selection.winner.trigger,
            outranked = also_matched.len(),
            bmi_advisory = record.bmi_advisory.is_some(),
            "Evaluation complete"
        );

        Ok(ScreeningReport {
            patient_id: profile.id.clone(),
            evaluated_on: today,
            age: metrics.age,
            bmi: metrics.bmi,
            category: record.category,
            label: record.category.label(self.locale).to_string(),
            severity_tier: record.severity_tier,
            protocol_text: record.protocol_text,
            bmi_advisory: record.bmi_advisory,
            also_matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedClock;
    use crate::domain::{bmi_advisory, Field, Measurement, RiskFactors};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
    }

    fn create_test_service() -> ScreeningService<FixedClock> {
        ScreeningService::new(FixedClock::new(today()), Locale::En)
    }

    /// Birth date giving exactly `age` on the test date.
    fn born_years_ago(age: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025 - age, 6, 1)
    }

    fn intake(age: i32, height: f64, weight: f64, factors: RiskFactors) -> ScreeningIntake {
        ScreeningIntake {
            patient_id: None,
            birth_date: born_years_ago(age),
            height_cm: Some(Measurement::from(height)),
            weight_kg: Some(Measurement::from(weight)),
            risk_factors: factors,
            symptoms_present: false,
        }
    }

    #[test]
    fn test_young_patient_without_factors() {
        let service = create_test_service();
        let report = service
            .evaluate_intake(intake(45, 170.0, 65.0, RiskFactors::default()))
            .expect("Should evaluate");

        assert_eq!(report.age, 45);
        assert!((report.bmi - 22.5).abs() < 1e-9);
        assert_eq!(report.category, Category::BelowScreeningAge);
        assert_eq!(report.severity_tier, 1);
        assert!(report.bmi_advisory.is_none());
        assert!(report.also_matched.is_empty());
    }

    #[test]
    fn test_lynch_at_thirty() {
        let service = create_test_service();
        let factors = RiskFactors {
            hereditary_syndrome: true,
            first_degree_relative_with_crc: true,
            ..Default::default()
        };
        let report = service
            .evaluate_intake(intake(30, 170.0, 65.0, factors))
            .expect("Should evaluate");

        assert_eq!(report.category, Category::LynchSyndrome);
        assert_eq!(report.severity_tier, 10);
        assert_eq!(
            report.also_matched,
            vec![Category::FamilyHistoryAfter60, Category::BelowScreeningAge]
        );
    }

    #[test]
    fn test_family_history_before_60() {
        let service = create_test_service();
        let factors = RiskFactors {
            first_degree_relative_with_crc: true,
            relative_diagnosed_before_60: true,
            ..Default::default()
        };
        let report = service
            .evaluate_intake(intake(55, 170.0, 65.0, factors))
            .expect("Should evaluate");

        assert_eq!(report.category, Category::FamilyHistoryBefore60);
        assert!(report.protocol_text.contains("40"));
    }

    #[test]
    fn test_advanced_adenoma_resected() {
        let service = create_test_service();
        let factors = RiskFactors {
            polyp_found_last_10_years: true,
            advanced_polyp: true,
            resected: true,
            ..Default::default()
        };
        let report = service
            .evaluate_intake(intake(60, 170.0, 65.0, factors))
            .expect("Should evaluate");

        assert_eq!(report.category, Category::AdvancedAdenomaResected);
        assert_eq!(report.severity_tier, 6);
    }

    #[test]
    fn test_symptoms_override_lynch() {
        let service = create_test_service();
        let mut input = intake(
            40,
            170.0,
            65.0,
            RiskFactors {
                hereditary_syndrome: true,
                ..Default::default()
            },
        );
        input.symptoms_present = true;

        let report = service.evaluate_intake(input).expect("Should evaluate");
        assert_eq!(report.category, Category::UrgentEvaluation);
        assert_eq!(report.also_matched[0], Category::LynchSyndrome);
    }

    #[test]
    fn test_birth_date_tomorrow_rejected() {
        let service = create_test_service();
        let mut input = intake(40, 170.0, 65.0, RiskFactors::default());
        input.birth_date = today().succ_opt();

        let err = service.evaluate_intake(input).unwrap_err();
        assert!(matches!(err, ScreeningError::InvalidDate { .. }));
    }

    #[test]
    fn test_non_numeric_height_rejected() {
        let service = create_test_service();
        let mut input = intake(40, 170.0, 65.0, RiskFactors::default());
        input.height_cm = Some(Measurement::from("1,70 m"));

        let err = service.evaluate_intake(input).unwrap_err();
        assert_eq!(err.field(), Field::Height);
    }

    #[test]
    fn test_bmi_advisory_independent_of_factors() {
        let service = create_test_service();
        let plain = service
            .evaluate_intake(intake(62, 170.0, 80.0, RiskFactors::default()))
            .expect("Should evaluate");
        let risky = service
            .evaluate_intake(intake(
                62,
                170.0,
                80.0,
                RiskFactors {
                    inflammatory_bowel_disease: true,
                    ..Default::default()
                },
            ))
            .expect("Should evaluate");

        assert!(plain.bmi >= 25.0);
        assert_ne!(plain.category, risky.category);
        assert_eq!(plain.bmi_advisory, risky.bmi_advisory);
        assert_eq!(plain.bmi_advisory.as_deref(), Some(bmi_advisory(Locale::En)));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let service = create_test_service();
        let factors = RiskFactors {
            polyp_found_last_10_years: true,
            serrated_polyp: true,
            resected: true,
            ..Default::default()
        };
        let first = service.evaluate_intake(intake(58, 165.0, 72.0, factors));
        let second = service.evaluate_intake(intake(58, 165.0, 72.0, factors));
        assert_eq!(first, second);
    }

    #[test]
    fn test_spanish_report() {
        let service = ScreeningService::new(FixedClock::new(today()), Locale::Es);
        let report = service
            .evaluate_intake(intake(80, 160.0, 70.0, RiskFactors::default()))
            .expect("Should evaluate");

        assert_eq!(report.category, Category::AboveScreeningAge);
        assert!(report.protocol_text.contains(">75"));
        assert_eq!(report.label, Category::AboveScreeningAge.label(Locale::Es));
        assert!(report.bmi_advisory.unwrap().contains("IMC"));
    }

    #[test]
    fn test_evaluation_is_total_over_ages() {
        let service = create_test_service();
        for age in 0..=120 {
            let report = service
                .evaluate_intake(intake(age, 200.0, 99.6, RiskFactors::default()))
                .expect("Should evaluate");
            assert!(report.severity_tier >= 1);
            assert!(report.also_matched.is_empty());
            assert!(report.bmi_advisory.is_none());
        }
    }

    #[test]
    fn test_evaluate_profile_with_id() {
        let service = create_test_service();
        let profile = PatientProfile::new(
            NaiveDate::from_ymd_opt(1960, 1, 1).unwrap(),
            175.0,
            70.0,
            RiskFactors::default(),
            false,
            today(),
        )
        .unwrap()
        .with_id("hc-1024");

        let report = service.evaluate(&profile).expect("Should evaluate");
        assert_eq!(report.patient_id.as_deref(), Some("hc-1024"));
        assert_eq!(report.category, Category::AverageRisk);
        assert_eq!(report.evaluated_on, today());
    }
}
