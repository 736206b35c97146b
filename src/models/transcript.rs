use std::sync::LazyLock;

use regex::Regex;

/// Literal marker that opens the physical examination section
pub const EXAM_MARKER: &str = "[Physical Examination Conducted]";

static PATIENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Patient:\s*(.*)").unwrap());
static PHYSICIAN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Physician:\s*(.*)").unwrap());

/// Speaker roles recognised in a clinical dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Patient,
    Physician,
}

impl Speaker {
    /// Label as it appears before the colon in the transcript
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Patient => "Patient",
            Speaker::Physician => "Physician",
        }
    }

    fn line_pattern(&self) -> &'static Regex {
        match self {
            Speaker::Patient => &*PATIENT_LINE,
            Speaker::Physician => &*PHYSICIAN_LINE,
        }
    }
}

/// A raw speaker-labeled dialogue ("Speaker: utterance" per line)
///
/// The text is never validated; malformed input simply yields fewer
/// utterances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw transcript text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// All utterances attributed to `speaker`, in transcript order
    ///
    /// The label match is case-insensitive and not anchored to the start of a
    /// line. The utterance is everything after the colon (leading whitespace
    /// skipped) up to the end of the line.
    pub fn utterances(&self, speaker: Speaker) -> Vec<&str> {
        speaker
            .line_pattern()
            .captures_iter(&self.text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Everything `speaker` said, joined with single spaces
    pub fn dialogue(&self, speaker: Speaker) -> String {
        self.utterances(speaker).join(" ")
    }

    /// Text following the physical examination marker, trimmed
    ///
    /// Empty when the marker is absent.
    pub fn exam_section(&self) -> &str {
        match self.text.find(EXAM_MARKER) {
            Some(pos) => self.text[pos + EXAM_MARKER.len()..].trim(),
            None => "",
        }
    }
}

impl From<&str> for Transcript {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Transcript {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
