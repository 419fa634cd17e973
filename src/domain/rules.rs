//! Prioritized screening rule table.
//!
//! Each row pairs a predicate with the category it selects. Rows are listed
//! in non-increasing tier order and evaluated in a single pass: the
//! first matching row wins, which is also the highest matching tier. Rows
//! sharing a tier resolve by table order.
//!
//! The table is total. The three age rows partition every age into
//! `< 50`, `50..=75` and `> 75`, so some row always matches.

use super::patient::RiskFactors;
use super::recommendation::Category;

/// Lower bound of the average-risk screening window.
pub const SCREENING_START_AGE: u32 = 50;
/// Upper bound (inclusive) of the average-risk screening window.
pub const SCREENING_END_AGE: u32 = 75;

/// Validated facts a rule predicate may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInput {
    pub age: u32,
    pub factors: RiskFactors,
    pub symptoms_present: bool,
}

impl RuleInput {
    /// Build an input, normalizing gated sub-answers.
    #[must_use]
    pub fn new(age: u32, factors: RiskFactors, symptoms_present: bool) -> Self {
        Self {
            age,
            factors: factors.normalized(),
            symptoms_present,
        }
    }

    fn resected_polyp(&self) -> bool {
        self.factors.polyp_found_last_10_years && self.factors.resected
    }
}

/// One row of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub category: Category,
    /// Human-readable trigger, for audit output
    pub trigger: &'static str,
    applies: fn(&RuleInput) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .field("tier", &self.tier())
            .field("trigger", &self.trigger)
            .finish()
    }
}

impl Rule {
    #[must_use]
    pub fn tier(&self) -> u8 {
        self.category.tier()
    }

    #[must_use]
    pub fn matches(&self, input: &RuleInput) -> bool {
        (self.applies)(input)
    }
}

/// The canonical rule table, highest tier first.
pub static RULES: [Rule; 14] = [
    Rule {
        category: Category::UrgentEvaluation,
        trigger: "symptoms present",
        applies: |i| i.symptoms_present,
    },
    Rule {
        category: Category::LynchSyndrome,
        trigger: "hereditary syndrome",
        applies: |i| i.factors.hereditary_syndrome,
    },
    Rule {
        category: Category::InflammatoryBowelDisease,
        trigger: "inflammatory bowel disease",
        applies: |i| i.factors.inflammatory_bowel_disease,
    },
    Rule {
        category: Category::FamilialAdenomatousPolyposis,
        trigger: "FAP or attenuated FAP",
        applies: |i| i.factors.fap || i.factors.fap_attenuated,
    },
    Rule {
        category: Category::HamartomatousSyndrome,
        trigger: "hamartomatous syndrome",
        applies: |i| i.factors.hamartomatous_syndrome,
    },
    Rule {
        category: Category::SerratedPolyposisSyndrome,
        trigger: "serrated polyposis syndrome",
        applies: |i| i.factors.serrated_polyposis_syndrome,
    },
    Rule {
        category: Category::AdvancedAdenomaResected,
        trigger: "resected advanced polyp in last 10 years",
        applies: |i| i.resected_polyp() && i.factors.advanced_polyp,
    },
    Rule {
        category: Category::SerratedPolypResected,
        trigger: "resected serrated polyp in last 10 years",
        applies: |i| i.resected_polyp() && i.factors.serrated_polyp,
    },
    Rule {
        category: Category::SimplePolypHistory,
        trigger: "resected simple polyp in last 10 years",
        applies: |i| {
            i.resected_polyp() && !(i.factors.advanced_polyp || i.factors.serrated_polyp)
        },
    },
    Rule {
        category: Category::FamilyHistoryBefore60,
        trigger: "first-degree relative diagnosed before 60",
        applies: |i| {
            i.factors.first_degree_relative_with_crc && i.factors.relative_diagnosed_before_60
        },
    },
    Rule {
        category: Category::FamilyHistoryAfter60,
        trigger: "first-degree relative diagnosed at 60 or later",
        applies: |i| {
            i.factors.first_degree_relative_with_crc && !i.factors.relative_diagnosed_before_60
        },
    },
    Rule {
        category: Category::AverageRisk,
        trigger: "age 50 to 75",
        applies: |i| (SCREENING_START_AGE..=SCREENING_END_AGE).contains(&i.age),
    },
    Rule {
        category: Category::BelowScreeningAge,
        trigger: "age below 50",
        applies: |i| i.age < SCREENING_START_AGE,
    },
    Rule {
        category: Category::AboveScreeningAge,
        trigger: "age above 75",
        applies: |i| i.age > SCREENING_END_AGE,
    },
];

/// Every rule matching `input`, highest tier first.
pub fn matching_rules(input: &RuleInput) -> impl Iterator<Item = &'static Rule> + '_ {
    RULES.iter().filter(move |rule| rule.matches(input))
}

/// The winning rule plus every lower-priority rule that also matched.
#[derive(Debug, Clone)]
pub struct Selection {
    pub winner: &'static Rule,
    pub outranked: Vec<&'static Rule>,
}

// The age rows cover every u32, so this is unreachable; it keeps selection
// total without a panic path.
fn fallback() -> &'static Rule {
    &RULES[RULES.len() - 1]
}

/// Select the single winning rule for `input`.
#[must_use]
pub fn select_rule(input: &RuleInput) -> &'static Rule {
    matching_rules(input).next().unwrap_or_else(fallback)
}

/// Walk the table once, splitting the matches into winner and outranked.
#[must_use]
pub fn select(input: &RuleInput) -> Selection {
    let mut matched = matching_rules(input);
    let winner = matched.next().unwrap_or_else(fallback);
    Selection {
        winner,
        outranked: matched.collect(),
    }
}

/// Select the winning category for `input`.
#[must_use]
pub fn classify(input: &RuleInput) -> Category {
    select_rule(input).category
}
