//! Screening recommendation types and their guidance texts.
//!
//! Texts follow the Argentine colorectal cancer screening guidelines and are
//! available in English and Spanish.

use serde::{Deserialize, Serialize};

/// Language of the guidance texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "es" | "spanish" | "español" => Ok(Self::Es),
            other => Err(format!("Unsupported language '{other}' (expected en or es)")),
        }
    }
}

/// Screening strategy selected for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Red-flag symptoms: diagnostic work-up, not screening
    UrgentEvaluation,
    LynchSyndrome,
    InflammatoryBowelDisease,
    FamilialAdenomatousPolyposis,
    HamartomatousSyndrome,
    SerratedPolyposisSyndrome,
    AdvancedAdenomaResected,
    SerratedPolypResected,
    SimplePolypHistory,
    #[serde(rename = "family_history_before_60")]
    FamilyHistoryBefore60,
    #[serde(rename = "family_history_after_60")]
    FamilyHistoryAfter60,
    AverageRisk,
    BelowScreeningAge,
    AboveScreeningAge,
}

impl Category {
    /// Every category, highest tier first.
    pub const ALL: [Category; 14] = [
        Self::UrgentEvaluation,
        Self::LynchSyndrome,
        Self::InflammatoryBowelDisease,
        Self::FamilialAdenomatousPolyposis,
        Self::HamartomatousSyndrome,
        Self::SerratedPolyposisSyndrome,
        Self::AdvancedAdenomaResected,
        Self::SerratedPolypResected,
        Self::SimplePolypHistory,
        Self::FamilyHistoryBefore60,
        Self::FamilyHistoryAfter60,
        Self::AverageRisk,
        Self::BelowScreeningAge,
        Self::AboveScreeningAge,
    ];

    /// Priority used for tie-breaks. Higher wins.
    #[must_use]
    pub fn tier(&self) -> u8 {
        match self {
            Self::UrgentEvaluation => 11,
            Self::LynchSyndrome => 10,
            Self::InflammatoryBowelDisease => 9,
            Self::FamilialAdenomatousPolyposis | Self::HamartomatousSyndrome => 8,
            Self::SerratedPolyposisSyndrome => 7,
            Self::AdvancedAdenomaResected | Self::SerratedPolypResected => 6,
            Self::SimplePolypHistory => 5,
            Self::FamilyHistoryBefore60 => 4,
            Self::FamilyHistoryAfter60 => 3,
            Self::AverageRisk => 2,
            Self::BelowScreeningAge | Self::AboveScreeningAge => 1,
        }
    }

    /// Short heading for the category.
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::UrgentEvaluation => "Urgent evaluation",
                Self::LynchSyndrome => "Lynch syndrome",
                Self::InflammatoryBowelDisease => "Inflammatory bowel disease",
                Self::FamilialAdenomatousPolyposis => "Familial adenomatous polyposis",
                Self::HamartomatousSyndrome => "Hamartomatous polyposis syndrome",
                Self::SerratedPolyposisSyndrome => "Serrated polyposis syndrome",
                Self::AdvancedAdenomaResected => "Advanced adenoma, resected",
                Self::SerratedPolypResected => "Serrated polyp, resected",
                Self::SimplePolypHistory => "Polyp history",
                Self::FamilyHistoryBefore60 => "Family history, relative diagnosed before 60",
                Self::FamilyHistoryAfter60 => "Family history, relative diagnosed at 60 or later",
                Self::AverageRisk => "Average risk, 50-75",
                Self::BelowScreeningAge => "Below screening age",
                Self::AboveScreeningAge => "Above routine screening age",
            },
            Locale::Es => match self {
                Self::UrgentEvaluation => "Síntomas presentes",
                Self::LynchSyndrome => "Riesgo Alto – Síndrome de Lynch",
                Self::InflammatoryBowelDisease => "Riesgo Alto – Enfermedad Inflamatoria Intestinal",
                Self::FamilialAdenomatousPolyposis => "Riesgo Alto – Poliposis Adenomatosa Familiar",
                Self::HamartomatousSyndrome => "Riesgo Alto – Síndromes Hamartomatosos",
                Self::SerratedPolyposisSyndrome => "Riesgo Alto – Síndrome de Poliposis Serrada",
                Self::AdvancedAdenomaResected => "Riesgo Alto – Adenomas Avanzados",
                Self::SerratedPolypResected => "Riesgo Alto – Pólipos Serrados",
                Self::SimplePolypHistory => "Riesgo Intermedio – Historial de Pólipos",
                Self::FamilyHistoryBefore60 => "Riesgo Incrementado – Familiar <60 años",
                Self::FamilyHistoryAfter60 => "Riesgo Incrementado – Familiar ≥60 años",
                Self::AverageRisk => "Riesgo Promedio – 50 a 75 años",
                Self::BelowScreeningAge => "Menor de 50 años sin factores de riesgo",
                Self::AboveScreeningAge => "Mayor de 75 años",
            },
        }
    }

    /// Screening protocol for the category.
    #[must_use]
    pub fn protocol(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::UrgentEvaluation => {
                    "Rectal bleeding, a change in bowel habit or unexplained weight loss require \
                     prompt medical evaluation. This is a diagnostic work-up, not screening."
                }
                Self::LynchSyndrome => {
                    "Colonoscopy every 1-2 years. If not possible: annual FIT or biennial gFOBT."
                }
                Self::InflammatoryBowelDisease => {
                    "Colonoscopy every 1-5 years. If not possible: annual FIT or biennial gFOBT."
                }
                Self::FamilialAdenomatousPolyposis | Self::HamartomatousSyndrome => {
                    "Colonoscopy every 1-2 years. If not possible: annual FIT or biennial gFOBT."
                }
                Self::SerratedPolyposisSyndrome => "Annual colonoscopy and genetic evaluation.",
                Self::AdvancedAdenomaResected => {
                    "Colonoscopy at 3 years. In the interim: annual FIT or biennial gFOBT."
                }
                Self::SerratedPolypResected => {
                    "Colonoscopy every 3-5 years and genetic evaluation."
                }
                Self::SimplePolypHistory => {
                    "Colonoscopy at 5 years. Alternative: annual FIT or biennial gFOBT."
                }
                Self::FamilyHistoryBefore60 => {
                    "Colonoscopy starting at age 40, or 10 years before the age at which the \
                     youngest relative was diagnosed, repeated every 5 years. Alternative: \
                     annual FIT or biennial gFOBT."
                }
                Self::FamilyHistoryAfter60 => {
                    "Colonoscopy starting at age 50, repeated every 5 years. Alternative: FIT \
                     or gFOBT every 2 years."
                }
                Self::AverageRisk => {
                    "Screening options: FIT every 2 years, gFOBT every 2 years, flexible \
                     sigmoidoscopy every 5 years, colonoscopy every 10 years, or virtual \
                     colonoscopy every 5 years as a non-invasive alternative."
                }
                Self::BelowScreeningAge => {
                    "No screening indicated before age 50 without other risk factors."
                }
                Self::AboveScreeningAge => {
                    "No routine screening after age 75; individualized evaluation recommended."
                }
            },
            Locale::Es => match self {
                Self::UrgentEvaluation => "Requiere evaluación médica inmediata.",
                Self::LynchSyndrome => {
                    "Colonoscopia: cada 1–2 años. Si no es posible: TSOMFi anual o TSOMFg bienal."
                }
                Self::InflammatoryBowelDisease => {
                    "Colonoscopia: cada 1–5 años. Si no es posible: TSOMFi anual o TSOMFg bienal."
                }
                Self::FamilialAdenomatousPolyposis | Self::HamartomatousSyndrome => {
                    "Colonoscopia: cada 1–2 años. Si no es posible: TSOMFi anual o TSOMFg bienal."
                }
                Self::SerratedPolyposisSyndrome => "Colonoscopia anual. Evaluación genética.",
                Self::AdvancedAdenomaResected => {
                    "Colonoscopia: control en 3 años. Interim: TSOMFi anual o TSOMFg bienal."
                }
                Self::SerratedPolypResected => {
                    "Colonoscopia: vigilancia cada 3–5 años. Evaluación genética."
                }
                Self::SimplePolypHistory => {
                    "Colonoscopia: control en 5 años. Alternativa: TSOMFi anual o TSOMFg bienal."
                }
                Self::FamilyHistoryBefore60 => {
                    "Colonoscopia: iniciar a los 40 años o 10 años antes del caso familiar más \
                     joven. Repetir cada 5 años. Alternativa: TSOMFi anual o TSOMFg bienal."
                }
                Self::FamilyHistoryAfter60 => {
                    "Colonoscopia: iniciar a los 50 años. Repetir cada 5 años. Alternativa: \
                     TSOMFi cada 2 años o TSOMFg bienal."
                }
                Self::AverageRisk => {
                    "Opciones de tamizaje: TSOMFi cada 2 años, TSOMFg cada 2 años, \
                     rectosigmoidoscopía cada 5 años, colonoscopia cada 10 años o colonoscopia \
                     virtual (VCC) cada 5 años como alternativa no invasiva."
                }
                Self::BelowScreeningAge => {
                    "No se recomienda tamizaje <50 años sin otros factores de riesgo."
                }
                Self::AboveScreeningAge => {
                    "No se recomienda tamizaje programático >75 años sin evaluación individualizada."
                }
            },
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label(Locale::En))
    }
}

/// Note attached when BMI is 25 or above.
#[must_use]
pub fn bmi_advisory(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Your BMI is elevated, an additional risk factor for colorectal cancer.",
        Locale::Es => "Tu IMC es elevado, factor de riesgo adicional para CCR.",
    }
}

/// Disclaimer shown with every report.
#[must_use]
pub fn disclaimer(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "This tool provides guidance based on the Argentine screening guidelines and does \
             not replace professional medical evaluation."
        }
        Locale::Es => {
            "Esta herramienta orienta según las Guías Argentinas de tamizaje y no reemplaza la \
             evaluación médica profesional."
        }
    }
}

/// The single recommendation produced by one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub category: Category,
    pub severity_tier: u8,
    pub protocol_text: String,
    pub bmi_advisory: Option<String>,
}

impl RecommendationRecord {
    /// Build the record for a category, attaching the advisory if requested.
    #[must_use]
    pub fn new(category: Category, overweight: bool, locale: Locale) -> Self {
        Self {
            category,
            severity_tier: category.tier(),
            protocol_text: category.protocol(locale).to_string(),
            bmi_advisory: overweight.then(|| bmi_advisory(locale).to_string()),
        }
    }

    /// Whether this is a diagnostic referral rather than a screening interval.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.category == Category::UrgentEvaluation
    }
}
