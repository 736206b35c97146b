pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod stages;

pub use io::{read_transcript, read_transcript_file, report_to_json, write_report_json, HumanReport};
pub use llm::{
    Capabilities, CapabilityError, GenerationParams, ModelConfig, Provider, TextGenerator,
    ZeroShotClassifier,
};
pub use models::{
    AnalysisReport, Intent, MedicalSummary, Sentiment, SentimentResult, SoapNote, Speaker,
    Transcript,
};
pub use pipeline::{NotetakerPipeline, PipelineConfig};
pub use rules::{RuleEffect, RuleTable, SummaryRule};
pub use stages::{execute_stage1, execute_stage2, execute_stage3, Stage3Config};
