//! Plain-text rendering of a screening report.

use std::fmt::Write;

use crate::application::ScreeningReport;
use crate::domain::{disclaimer, Locale};

struct Headings {
    age: &'static str,
    bmi: &'static str,
    result: &'static str,
    note: &'static str,
    outranked: &'static str,
}

fn headings(locale: Locale) -> Headings {
    match locale {
        Locale::En => Headings {
            age: "Age",
            bmi: "BMI",
            result: "Assessment result",
            note: "Note",
            outranked: "Also present (lower priority)",
        },
        Locale::Es => Headings {
            age: "Edad",
            bmi: "IMC",
            result: "Resultado de la evaluación",
            note: "Nota",
            outranked: "También presente (menor prioridad)",
        },
    }
}

/// Render the report for a terminal.
#[must_use]
pub fn render_text(report: &ScreeningReport, locale: Locale) -> String {
    let h = headings(locale);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}: {} | {}: {:.1}", h.age, report.age, h.bmi, report.bmi);
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(out, "{}", h.result);
    let _ = writeln!(out, "  [{}] {}", report.severity_tier, report.label);
    let _ = writeln!(out, "  {}", report.protocol_text);

    if !report.also_matched.is_empty() {
        let labels: Vec<&str> = report
            .also_matched
            .iter()
            .map(|c| c.label(locale))
            .collect();
        let _ = writeln!(out, "{}: {}", h.outranked, labels.join("; "));
    }

    if let Some(advisory) = &report.bmi_advisory {
        let _ = writeln!(out, "{}: {}", h.note, advisory);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", disclaimer(locale));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn sample() -> ScreeningReport {
        ScreeningReport {
            patient_id: None,
            evaluated_on: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            age: 57,
            bmi: 26.04,
            category: Category::FamilyHistoryAfter60,
            label: Category::FamilyHistoryAfter60.label(Locale::En).to_string(),
            severity_tier: 3,
            protocol_text: Category::FamilyHistoryAfter60.protocol(Locale::En).to_string(),
            bmi_advisory: Some("advisory".to_string()),
            also_matched: vec![Category::AverageRisk],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample(), Locale::En);
        assert!(text.starts_with("Age: 57 | BMI: 26.0"));
        assert!(text.contains("[3] Family history"));
        assert!(text.contains("Also present (lower priority): Average risk, 50-75"));
        assert!(text.contains("Note: advisory"));
        assert!(text.trim_end().ends_with(disclaimer(Locale::En)));
    }

    #[test]
    fn test_render_text_without_extras() {
        let report = ScreeningReport {
            bmi_advisory: None,
            also_matched: Vec::new(),
            ..sample()
        };
        let text = render_text(&report, Locale::Es);
        assert!(text.starts_with("Edad: 57 | IMC: 26.0"));
        assert!(!text.contains("Nota"));
        assert!(!text.contains("También"));
    }
}
