use anyhow::Result;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::llm::Capabilities;
use crate::models::{AnalysisReport, MedicalSummary, Transcript};
use crate::rules::RuleTable;
use crate::stages::{execute_stage1, execute_stage2, execute_stage3, Stage3Config};

/// Configuration shared by every run of the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Rules for the medical summary
    pub rules: RuleTable,
    /// SOAP note composition settings
    pub stage3: Stage3Config,
}

/// Full transcript analysis: summary, patient sentiment and SOAP note
///
/// The model capabilities are injected once and reused read-only by every
/// call to [`NotetakerPipeline::run_full_analysis`].
pub struct NotetakerPipeline {
    capabilities: Capabilities,
    config: PipelineConfig,
}

impl NotetakerPipeline {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_config(capabilities, PipelineConfig::default())
    }

    pub fn with_config(capabilities: Capabilities, config: PipelineConfig) -> Self {
        Self {
            capabilities,
            config,
        }
    }

    /// Rule-based summary alone; needs no model capabilities
    pub fn summarize_only(transcript: &Transcript, rules: &RuleTable) -> MedicalSummary {
        execute_stage1(transcript, rules)
    }

    /// Run all three stages and merge their results
    ///
    /// A missing patient dialogue is reported inside the sentiment section.
    /// Any model failure aborts the whole run.
    pub async fn run_full_analysis(&self, transcript: &Transcript) -> Result<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("analysis", %run_id);

        async {
            info!("1/3: Generating medical summary...");
            let medical_summary = execute_stage1(transcript, &self.config.rules);

            info!("2/3: Analyzing patient sentiment...");
            let sentiment =
                execute_stage2(self.capabilities.classifier.as_ref(), transcript).await?;

            info!("3/3: Generating SOAP note...");
            let soap_note = execute_stage3(
                self.capabilities.generator.as_ref(),
                transcript,
                &self.config.stage3,
            )
            .await?;

            info!("Analysis complete");

            Ok::<_, anyhow::Error>(AnalysisReport {
                medical_summary,
                sentiment,
                soap_note,
            })
        }
        .instrument(span)
        .await
    }
}
