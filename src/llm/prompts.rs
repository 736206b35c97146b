use crate::models::SoapField;

/// System prompt for chat-style generators writing SOAP fields
pub const GENERATOR_SYSTEM_PROMPT: &str = "You write concise, factual clinical documentation. \
Answer with the requested summary only, without preamble.";

/// System prompt for chat-style models acting as a zero-shot classifier
pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a zero-shot text classifier for patient statements from clinical conversations.

You are given one statement and a list of candidate labels.
Choose the single label that best describes the statement.
Only use a label from the list, exactly as written.
Use the submit_label tool to give your answer."#;

/// Build the instruction for one SOAP field
///
/// The model is told to rely only on `context` and to answer "Not mentioned"
/// when the information is absent.
pub fn build_soap_field_prompt(field: &SoapField, context: &str) -> String {
    let name = field.name;
    let description = field.description;
    format!(
        "Based *only* on the following text, provide a concise summary for the \"{name}\".\n\
The \"{name}\" is: {description}\n\
Summarize the key points into a brief, professional statement. \
If the information is not present in the text, respond with \"Not mentioned\".\n\
\n\
TEXT: \"{context}\"\n\
\n\
Summary of {name}:"
    )
}

/// Build the user prompt for a chat-based classification
pub fn build_classification_prompt(text: &str, labels: &[&str]) -> String {
    let mut prompt = String::new();
    prompt.push_str("# Statement\n\n");
    prompt.push_str(text);
    prompt.push_str("\n\n# Candidate Labels\n\n");
    for label in labels {
        prompt.push_str(&format!("- {}\n", label));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FOLLOW_UP_PLAN, PHYSICAL_EXAM};

    #[test]
    fn test_soap_prompt_contents() {
        let prompt = build_soap_field_prompt(&FOLLOW_UP_PLAN, "Come back if it gets worse.");
        assert!(prompt.contains("\"Follow-Up Plan\""));
        assert!(prompt.contains(FOLLOW_UP_PLAN.description));
        assert!(prompt.contains("TEXT: \"Come back if it gets worse.\""));
        assert!(prompt.ends_with("Summary of Follow-Up Plan:"));
    }

    #[test]
    fn test_soap_prompt_uses_field_name_throughout() {
        let prompt = build_soap_field_prompt(&PHYSICAL_EXAM, "No tenderness.");
        assert_eq!(prompt.matches("Physical Exam Findings").count(), 3);
    }

    #[test]
    fn test_classification_prompt_lists_labels() {
        let prompt = build_classification_prompt("I'm worried.", &["Anxious", "Neutral"]);
        assert!(prompt.contains("I'm worried."));
        assert!(prompt.contains("- Anxious\n"));
        assert!(prompt.contains("- Neutral\n"));
    }
}
