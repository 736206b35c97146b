use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::{Speaker, Transcript};

/// Read a transcript from a text file
pub fn read_transcript_file(path: &Path) -> Result<Transcript> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(parse_transcript(content))
}

/// Read a transcript from any reader (e.g., stdin)
pub fn read_transcript<R: Read>(mut reader: R) -> Result<Transcript> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read transcript")?;
    Ok(parse_transcript(content))
}

/// Wrap raw text as a transcript, warning about input that will only yield defaults
fn parse_transcript(content: String) -> Transcript {
    let transcript = Transcript::new(content);

    if transcript.is_blank() {
        warn!("Transcript is empty");
    } else if transcript.utterances(Speaker::Patient).is_empty()
        && transcript.utterances(Speaker::Physician).is_empty()
    {
        warn!(
            "Transcript has no \"{}:\" or \"{}:\" lines",
            Speaker::Patient.label(),
            Speaker::Physician.label()
        );
    }

    transcript
}
