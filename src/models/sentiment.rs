use serde::{Deserialize, Serialize};

/// Message reported when the transcript has no patient lines
pub const NO_PATIENT_DIALOGUE: &str = "No patient dialogue found.";

/// Keywords that mark a patient line as emotionally expressive
pub const EXPRESSIVE_KEYWORDS: &[&str] = &["worried", "scared", "relief", "great", "rough"];

/// Sentiment labels, in the order they are offered to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Anxious,
    Neutral,
    Reassured,
    Concerned,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Anxious,
        Sentiment::Neutral,
        Sentiment::Reassured,
        Sentiment::Concerned,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Anxious => "Anxious",
            Sentiment::Neutral => "Neutral",
            Sentiment::Reassured => "Reassured",
            Sentiment::Concerned => "Concerned",
        }
    }
}

/// Intent labels, in the order they are offered to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "Seeking reassurance")]
    SeekingReassurance,
    #[serde(rename = "Reporting symptoms")]
    ReportingSymptoms,
    #[serde(rename = "Expressing relief")]
    ExpressingRelief,
}

impl Intent {
    pub const ALL: [Intent; 3] = [
        Intent::SeekingReassurance,
        Intent::ReportingSymptoms,
        Intent::ExpressingRelief,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::SeekingReassurance => "Seeking reassurance",
            Intent::ReportingSymptoms => "Reporting symptoms",
            Intent::ExpressingRelief => "Expressing relief",
        }
    }
}

/// Closed label sets that can be parsed back from a classifier's answer
pub trait LabelSet: Sized + Copy + 'static {
    fn all() -> &'static [Self];
    fn as_label(&self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::all().iter().map(|l| l.as_label()).collect()
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.as_label() == label)
    }
}

impl LabelSet for Sentiment {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_label(&self) -> &'static str {
        self.label()
    }
}

impl LabelSet for Intent {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_label(&self) -> &'static str {
        self.label()
    }
}

/// Outcome of the sentiment and intent stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentimentResult {
    Classified {
        #[serde(rename = "Analyzed_Line")]
        analyzed_line: String,
        #[serde(rename = "Sentiment")]
        sentiment: Sentiment,
        #[serde(rename = "Intent")]
        intent: Intent,
    },
    NoPatientDialogue {
        #[serde(rename = "Error")]
        error: String,
    },
}

impl SentimentResult {
    pub fn no_patient_dialogue() -> Self {
        SentimentResult::NoPatientDialogue {
            error: NO_PATIENT_DIALOGUE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SentimentResult::NoPatientDialogue { .. })
    }
}
