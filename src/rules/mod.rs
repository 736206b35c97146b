pub mod clinical;

pub use clinical::*;

use regex::Regex;
use tracing::debug;

use crate::models::{MedicalSummary, SummaryField};

/// What a matching rule writes into its field
#[derive(Debug, Clone)]
pub enum RuleEffect {
    /// Record a fixed value
    Record(String),
    /// Record the matched text itself
    CaptureMatch,
}

/// A single (pattern, field, effect) entry of the summary rule table
#[derive(Debug, Clone)]
pub struct SummaryRule {
    pub pattern: Regex,
    pub field: SummaryField,
    pub effect: RuleEffect,
}

impl SummaryRule {
    /// Case-insensitive match of a literal phrase
    pub fn phrase(phrase: &str, field: SummaryField, value: &str) -> Self {
        Self::pattern(&regex::escape(phrase), field, value)
    }

    /// Case-insensitive match of a fixed regular expression
    ///
    /// Panics if the expression does not compile; use [`SummaryRule::try_pattern`]
    /// for patterns that come from outside the crate.
    pub fn pattern(pattern: &str, field: SummaryField, value: &str) -> Self {
        Self::try_pattern(pattern, field, value).unwrap()
    }

    /// Case-insensitive match of a regular expression, failing on bad syntax
    pub fn try_pattern(
        pattern: &str,
        field: SummaryField,
        value: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){}", pattern))?,
            field,
            effect: RuleEffect::Record(value.to_string()),
        })
    }

    /// Apply the rule to `text`, returning the value to record on a match
    pub fn evaluate(&self, text: &str) -> Option<String> {
        let found = self.pattern.find(text)?;
        Some(match &self.effect {
            RuleEffect::Record(value) => value.clone(),
            RuleEffect::CaptureMatch => found.as_str().to_string(),
        })
    }
}

/// Ordered set of summary rules
///
/// Every rule is checked against the whole transcript. Rules are independent:
/// list fields receive values in table order, scalar fields keep the value of
/// the last matching rule, and unmatched fields keep their defaults.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<SummaryRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<SummaryRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build a summary by evaluating every rule in order
    pub fn apply(&self, text: &str) -> MedicalSummary {
        let mut summary = MedicalSummary::default();
        let mut matched = 0;

        for rule in &self.rules {
            if let Some(value) = rule.evaluate(text) {
                debug!("Rule {:?} matched: {:?} -> {}", rule.pattern.as_str(), rule.field, value);
                summary.record(rule.field, value);
                matched += 1;
            }
        }

        debug!("{} of {} summary rules matched", matched, self.rules.len());
        summary
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(CLINICAL_RULES.clone())
    }
}
