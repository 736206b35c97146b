use serde::{Deserialize, Serialize};

/// Value used when a field's context slice is empty
pub const NO_CONTEXT: &str = "Not mentioned in the provided context.";

/// Fixed objective observation, never derived from the transcript
pub const DEFAULT_OBSERVATIONS: &str = "Patient is alert and oriented, recounts events clearly.";

/// SOAP note assembled from independent generation queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapNote {
    #[serde(rename = "Subjective")]
    pub subjective: Subjective,
    #[serde(rename = "Objective")]
    pub objective: Objective,
    #[serde(rename = "Assessment")]
    pub assessment: Assessment,
    #[serde(rename = "Plan")]
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subjective {
    #[serde(rename = "Chief_Complaint")]
    pub chief_complaint: String,
    #[serde(rename = "History_of_Present_Illness")]
    pub history_of_present_illness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(rename = "Physical_Exam")]
    pub physical_exam: String,
    #[serde(rename = "Observations")]
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Prognosis")]
    pub prognosis: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "Treatment")]
    pub treatment: String,
    #[serde(rename = "Follow-Up")]
    pub follow_up: String,
}

/// Which slice of the transcript a SOAP field is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    PatientDialogue,
    PhysicianDialogue,
    ExamSection,
    /// Patient dialogue followed by physician dialogue
    FullDialogue,
}

/// A generated SOAP field: its prompt name, description and context slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoapField {
    pub name: &'static str,
    pub description: &'static str,
    pub source: ContextSource,
}

pub const CHIEF_COMPLAINT: SoapField = SoapField {
    name: "Chief Complaint",
    description: "The primary symptoms the patient reports, such as pain.",
    source: ContextSource::PatientDialogue,
};

pub const HISTORY_OF_PRESENT_ILLNESS: SoapField = SoapField {
    name: "History of Present Illness",
    description: "The patient's story of the accident and the progression of their symptoms over time.",
    source: ContextSource::PatientDialogue,
};

pub const PHYSICAL_EXAM: SoapField = SoapField {
    name: "Physical Exam Findings",
    description: "The physician's objective findings from the physical examination.",
    source: ContextSource::ExamSection,
};

pub const DIAGNOSIS: SoapField = SoapField {
    name: "Diagnosis",
    description: "The medical diagnosis given by the physician, such as 'whiplash injury'.",
    source: ContextSource::PhysicianDialogue,
};

pub const PROGNOSIS: SoapField = SoapField {
    name: "Prognosis",
    description: "The physician's forecast for the patient's recovery.",
    source: ContextSource::PhysicianDialogue,
};

pub const TREATMENT_PLAN: SoapField = SoapField {
    name: "Treatment Plan",
    description: "The treatments mentioned, such as physiotherapy or painkillers.",
    source: ContextSource::FullDialogue,
};

pub const FOLLOW_UP_PLAN: SoapField = SoapField {
    name: "Follow-Up Plan",
    description: "Instructions for future appointments or actions if symptoms worsen.",
    source: ContextSource::PhysicianDialogue,
};
