use tracing::info;

use crate::models::{MedicalSummary, Transcript};
use crate::rules::RuleTable;

/// Execute Stage 1: rule-based medical summary
///
/// Pure function of the transcript text and the rule table. A rule that does
/// not match leaves its field at the default; nothing here can fail.
pub fn execute_stage1(transcript: &Transcript, rules: &RuleTable) -> MedicalSummary {
    let summary = rules.apply(transcript.text());

    info!(
        "Stage 1: {} symptoms, {} treatments, diagnosis: {}",
        summary.symptoms.len(),
        summary.treatment.len(),
        summary.diagnosis
    );

    summary
}
