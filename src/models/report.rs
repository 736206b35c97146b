use serde::{Deserialize, Serialize};

use super::{MedicalSummary, SentimentResult, SoapNote};

/// Full analysis of one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "Medical_Summary")]
    pub medical_summary: MedicalSummary,
    #[serde(rename = "Patient_Sentiment_Analysis")]
    pub sentiment: SentimentResult,
    #[serde(rename = "Generated_SOAP_Note")]
    pub soap_note: SoapNote,
}
