use serde::{Deserialize, Serialize};

/// Default value for scalar summary fields with no matching rule
pub const NOT_MENTIONED: &str = "Not mentioned";

/// Structured medical summary produced by the rule-based stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalSummary {
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<String>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<String>,
    #[serde(rename = "Current_Status")]
    pub current_status: String,
    #[serde(rename = "Prognosis")]
    pub prognosis: String,
}

impl Default for MedicalSummary {
    fn default() -> Self {
        Self {
            patient_name: NOT_MENTIONED.to_string(),
            symptoms: Vec::new(),
            diagnosis: NOT_MENTIONED.to_string(),
            treatment: Vec::new(),
            current_status: NOT_MENTIONED.to_string(),
            prognosis: NOT_MENTIONED.to_string(),
        }
    }
}

/// A field of [`MedicalSummary`] that a rule can write to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    PatientName,
    Symptoms,
    Diagnosis,
    Treatment,
    CurrentStatus,
    Prognosis,
}

impl MedicalSummary {
    /// Append to a list field, or overwrite a scalar field
    pub fn record(&mut self, field: SummaryField, value: String) {
        match field {
            SummaryField::PatientName => self.patient_name = value,
            SummaryField::Symptoms => self.symptoms.push(value),
            SummaryField::Diagnosis => self.diagnosis = value,
            SummaryField::Treatment => self.treatment.push(value),
            SummaryField::CurrentStatus => self.current_status = value,
            SummaryField::Prognosis => self.prognosis = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_summary() {
        let summary = MedicalSummary::default();
        assert_eq!(summary.diagnosis, "Not mentioned");
        assert_eq!(summary.current_status, "Not mentioned");
        assert!(summary.symptoms.is_empty());
        assert!(summary.treatment.is_empty());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(MedicalSummary::default()).unwrap();
        for key in [
            "Patient_Name",
            "Symptoms",
            "Diagnosis",
            "Treatment",
            "Current_Status",
            "Prognosis",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_record_appends_lists_and_overwrites_scalars() {
        let mut summary = MedicalSummary::default();
        summary.record(SummaryField::Symptoms, "Neck pain".to_string());
        summary.record(SummaryField::Symptoms, "Back pain".to_string());
        summary.record(SummaryField::Diagnosis, "First".to_string());
        summary.record(SummaryField::Diagnosis, "Second".to_string());

        assert_eq!(summary.symptoms, vec!["Neck pain", "Back pain"]);
        assert_eq!(summary.diagnosis, "Second");
    }
}
