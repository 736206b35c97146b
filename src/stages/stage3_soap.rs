use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::llm::{build_soap_field_prompt, GenerationParams, TextGenerator};
use crate::models::{
    Assessment, ContextSource, Objective, Plan, SoapField, SoapNote, Speaker, Subjective,
    Transcript, CHIEF_COMPLAINT, DEFAULT_OBSERVATIONS, DIAGNOSIS, FOLLOW_UP_PLAN,
    HISTORY_OF_PRESENT_ILLNESS, NO_CONTEXT, PHYSICAL_EXAM, PROGNOSIS, TREATMENT_PLAN,
};

/// Configuration for Stage 3
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Decoding parameters passed with every generation call
    pub generation: GenerationParams,
    /// Constant value of Objective.Observations
    pub observations: String,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generation: GenerationParams::default(),
            observations: DEFAULT_OBSERVATIONS.to_string(),
        }
    }
}

/// Context slices derived once from the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapContext {
    pub patient: String,
    pub physician: String,
    pub exam: String,
    pub full: String,
}

impl SoapContext {
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let patient = transcript.dialogue(Speaker::Patient);
        let physician = transcript.dialogue(Speaker::Physician);
        let full = format!("{}{}", patient, physician);

        Self {
            patient,
            physician,
            exam: transcript.exam_section().to_string(),
            full,
        }
    }

    pub fn slice(&self, source: ContextSource) -> &str {
        match source {
            ContextSource::PatientDialogue => &self.patient,
            ContextSource::PhysicianDialogue => &self.physician,
            ContextSource::ExamSection => &self.exam,
            ContextSource::FullDialogue => &self.full,
        }
    }
}

/// Execute Stage 3: SOAP note composition
///
/// Each generated field is an independent query over its own context slice;
/// the seven queries run concurrently and the first failure aborts the note.
pub async fn execute_stage3(
    generator: &dyn TextGenerator,
    transcript: &Transcript,
    config: &Stage3Config,
) -> Result<SoapNote> {
    let context = SoapContext::from_transcript(transcript);

    info!(
        "Stage 3: context {} patient chars, {} physician chars, {} exam chars",
        context.patient.len(),
        context.physician.len(),
        context.exam.len()
    );

    let (
        chief_complaint,
        history_of_present_illness,
        physical_exam,
        diagnosis,
        prognosis,
        treatment,
        follow_up,
    ) = tokio::try_join!(
        generate_field(generator, &context, &CHIEF_COMPLAINT, &config.generation),
        generate_field(generator, &context, &HISTORY_OF_PRESENT_ILLNESS, &config.generation),
        generate_field(generator, &context, &PHYSICAL_EXAM, &config.generation),
        generate_field(generator, &context, &DIAGNOSIS, &config.generation),
        generate_field(generator, &context, &PROGNOSIS, &config.generation),
        generate_field(generator, &context, &TREATMENT_PLAN, &config.generation),
        generate_field(generator, &context, &FOLLOW_UP_PLAN, &config.generation),
    )?;

    Ok(SoapNote {
        subjective: Subjective {
            chief_complaint,
            history_of_present_illness,
        },
        objective: Objective {
            physical_exam,
            observations: config.observations.clone(),
        },
        assessment: Assessment {
            diagnosis,
            prognosis,
        },
        plan: Plan {
            treatment,
            follow_up,
        },
    })
}

/// Generate one field, or return the sentinel when its context is blank
async fn generate_field(
    generator: &dyn TextGenerator,
    context: &SoapContext,
    field: &SoapField,
    params: &GenerationParams,
) -> Result<String> {
    let slice = context.slice(field.source);
    if slice.trim().is_empty() {
        debug!("{}: empty context, skipping generation", field.name);
        return Ok(NO_CONTEXT.to_string());
    }

    let prompt = build_soap_field_prompt(field, slice);
    let output = generator
        .generate(&prompt, params)
        .await
        .with_context(|| format!("Generation failed for {}", field.name))?;

    debug!("{}: {} chars generated", field.name, output.len());
    Ok(clean_generated_text(&output))
}

/// Trim whitespace, then strip surrounding double quotes
pub fn clean_generated_text(text: &str) -> String {
    text.trim().trim_matches('"').to_string()
}
