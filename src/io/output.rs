use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::models::{AnalysisReport, SentimentResult};

/// Serialize the report as pretty-printed JSON
pub fn report_to_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Write the report to a JSON file
pub fn write_report_json(report: &AnalysisReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, report).context("Failed to write JSON")?;
    Ok(())
}

/// Human-readable rendering of an analysis report
pub struct HumanReport<'a> {
    report: &'a AnalysisReport,
    generated_at: DateTime<Local>,
}

impl<'a> HumanReport<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self::generated_at(report, Local::now())
    }

    pub fn generated_at(report: &'a AnalysisReport, generated_at: DateTime<Local>) -> Self {
        Self {
            report,
            generated_at,
        }
    }

    /// Format the report as plain text
    pub fn format(&self) -> String {
        let summary = &self.report.medical_summary;
        let note = &self.report.soap_note;
        let mut output = String::new();

        output.push_str(&format!(
            "Clinical Note - generated {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));

        output.push_str("MEDICAL SUMMARY\n");
        push_entry(&mut output, "Patient", &summary.patient_name);
        push_entry(&mut output, "Symptoms", &join_or_none(&summary.symptoms));
        push_entry(&mut output, "Diagnosis", &summary.diagnosis);
        push_entry(&mut output, "Treatment", &join_or_none(&summary.treatment));
        push_entry(&mut output, "Current status", &summary.current_status);
        push_entry(&mut output, "Prognosis", &summary.prognosis);
        output.push('\n');

        output.push_str("PATIENT SENTIMENT\n");
        match &self.report.sentiment {
            SentimentResult::Classified {
                analyzed_line,
                sentiment,
                intent,
            } => {
                push_entry(&mut output, "Statement", &format!("\"{}\"", analyzed_line));
                push_entry(&mut output, "Sentiment", sentiment.label());
                push_entry(&mut output, "Intent", intent.label());
            }
            SentimentResult::NoPatientDialogue { error } => {
                push_entry(&mut output, "Error", error);
            }
        }
        output.push('\n');

        output.push_str("SUBJECTIVE\n");
        push_entry(&mut output, "Chief complaint", &note.subjective.chief_complaint);
        push_entry(
            &mut output,
            "History of present illness",
            &note.subjective.history_of_present_illness,
        );
        output.push_str("\nOBJECTIVE\n");
        push_entry(&mut output, "Physical exam", &note.objective.physical_exam);
        push_entry(&mut output, "Observations", &note.objective.observations);
        output.push_str("\nASSESSMENT\n");
        push_entry(&mut output, "Diagnosis", &note.assessment.diagnosis);
        push_entry(&mut output, "Prognosis", &note.assessment.prognosis);
        output.push_str("\nPLAN\n");
        push_entry(&mut output, "Treatment", &note.plan.treatment);
        push_entry(&mut output, "Follow-up", &note.plan.follow_up);

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn push_entry(output: &mut String, label: &str, value: &str) {
    output.push_str(&format!("  {}:\n", label));
    output.push_str(&indent(&wrap_text(value, 76), "    "));
    output.push('\n');
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        if line_len + word.len() + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word.len();
    }

    result
}
