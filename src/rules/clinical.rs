use std::sync::LazyLock;

use regex::Regex;

use crate::models::SummaryField;

use super::{RuleEffect, SummaryRule};

/// Honorific followed by a capitalised surname on the same line, e.g. "Ms. Jones"
const PATIENT_NAME_PATTERN: &str = r"\b(?:Mrs|Mr|Ms|Miss)\.?[ \t]+[A-Z][A-Za-z'-]+";

/// Default clinical rules, compiled once
///
/// Symptom and treatment entries are appended in this order regardless of
/// where the phrases appear in the transcript.
pub static CLINICAL_RULES: LazyLock<Vec<SummaryRule>> = LazyLock::new(|| {
    vec![
        SummaryRule {
            pattern: Regex::new(PATIENT_NAME_PATTERN).unwrap(),
            field: SummaryField::PatientName,
            effect: RuleEffect::CaptureMatch,
        },
        SummaryRule::pattern(r"pain in my neck|neck pain", SummaryField::Symptoms, "Neck pain"),
        SummaryRule::pattern(r"pain in my.+back|back pain", SummaryField::Symptoms, "Back pain"),
        SummaryRule::pattern(r"hit my head", SummaryField::Symptoms, "Head impact"),
        SummaryRule::phrase("whiplash injury", SummaryField::Diagnosis, "Whiplash injury"),
        SummaryRule::phrase(
            "ten sessions of physiotherapy",
            SummaryField::Treatment,
            "10 physiotherapy sessions",
        ),
        SummaryRule::phrase("painkillers", SummaryField::Treatment, "Painkillers"),
        SummaryRule::phrase(
            "occasional backaches",
            SummaryField::CurrentStatus,
            "Occasional backaches",
        ),
        SummaryRule::phrase(
            "full recovery within six months",
            SummaryField::Prognosis,
            "Full recovery expected within six months",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use crate::rules::RuleTable;

    #[test]
    fn test_patient_name_extraction() {
        let table = RuleTable::default();
        let summary = table.apply("Physician: Good morning, Ms. Jones. How are you?");
        assert_eq!(summary.patient_name, "Ms. Jones");

        let summary = table.apply("Physician: Good morning. How are you?");
        assert_eq!(summary.patient_name, "Not mentioned");
    }

    #[test]
    fn test_patient_name_stays_on_one_line() {
        let table = RuleTable::default();
        let summary = table.apply("Physician: Thanks, Ms.\nPatient: You're welcome.");
        assert_eq!(summary.patient_name, "Not mentioned");
    }

    #[test]
    fn test_default_table_size() {
        assert_eq!(RuleTable::default().len(), 9);
    }

    #[test]
    fn test_back_pain_does_not_cross_lines() {
        let table = RuleTable::default();
        let summary = table.apply("Patient: pain in my arm\nPhysician: and your back?");
        assert!(summary.symptoms.is_empty());

        let summary = table.apply("Patient: pain in my lower back");
        assert_eq!(summary.symptoms, vec!["Back pain"]);
    }

    #[test]
    fn test_diagnosis_any_case() {
        let table = RuleTable::default();
        assert_eq!(
            table.apply("They said it was a WHIPLASH Injury.").diagnosis,
            "Whiplash injury"
        );
        assert_eq!(table.apply("They said it was a sprain.").diagnosis, "Not mentioned");
    }
}
