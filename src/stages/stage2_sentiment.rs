use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::llm::ZeroShotClassifier;
use crate::models::{
    Intent, LabelSet, Sentiment, SentimentResult, Speaker, Transcript, EXPRESSIVE_KEYWORDS,
};

/// Execute Stage 2: sentiment and intent of the most expressive patient line
///
/// A transcript without patient lines is reported in the result rather than
/// as an error. Classifier failures are returned as errors.
pub async fn execute_stage2(
    classifier: &dyn ZeroShotClassifier,
    transcript: &Transcript,
) -> Result<SentimentResult> {
    let patient_lines = transcript.utterances(Speaker::Patient);

    let Some(line) = select_expressive_line(&patient_lines) else {
        info!("Stage 2: no patient dialogue found");
        return Ok(SentimentResult::no_patient_dialogue());
    };

    debug!("Stage 2: analyzing {:?} ({} patient lines)", line, patient_lines.len());

    let sentiment = classify_top::<Sentiment>(classifier, line)
        .await
        .context("Sentiment classification failed")?;
    let intent = classify_top::<Intent>(classifier, line)
        .await
        .context("Intent classification failed")?;

    info!("Stage 2: sentiment {}, intent {}", sentiment.label(), intent.label());

    Ok(SentimentResult::Classified {
        analyzed_line: line.trim().to_string(),
        sentiment,
        intent,
    })
}

/// Pick the line to classify
///
/// The first line (in order) containing any expressive keyword wins; with no
/// keyword anywhere, the last line is used. `None` only for empty input.
pub fn select_expressive_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines
        .iter()
        .copied()
        .find(|line| {
            let lower = line.to_lowercase();
            EXPRESSIVE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .or_else(|| lines.last().copied())
}

/// Classify `text` against the label set `L` and return its top label
async fn classify_top<L: LabelSet>(classifier: &dyn ZeroShotClassifier, text: &str) -> Result<L> {
    let labels = L::labels();
    let ranked = classifier.classify(text, &labels).await?;

    let top = ranked
        .first()
        .context("Classifier returned no labels")?;

    L::from_label(top).with_context(|| format!("Classifier returned unknown label '{}'", top))
}
