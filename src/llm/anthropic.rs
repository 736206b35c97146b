use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::client::{CapabilityError, GenerationParams, TextGenerator, ZeroShotClassifier};
use crate::llm::prompts::{
    build_classification_prompt, CLASSIFIER_SYSTEM_PROMPT, GENERATOR_SYSTEM_PROMPT,
};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const LABEL_TOOL: &str = "submit_label";

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in a classification response
    pub max_tokens: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.0,
            max_tokens: 256,
        }
    }
}

/// Anthropic API client
///
/// Generation maps the prompt to a single user turn. Classification forces a
/// tool call whose only argument is an enum of the candidate labels.
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send(&self, request: &AnthropicRequest) -> Result<AnthropicResponse, CapabilityError> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Api { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            CapabilityError::MalformedResponse(format!("Failed to parse Anthropic API response: {}", e))
        })
    }

    fn request(&self, system: &str, user: &str, max_tokens: u32) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
            tools: Vec::new(),
            tool_choice: None,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CapabilityError> {
        let request = self.request(GENERATOR_SYSTEM_PROMPT, prompt, params.max_new_tokens);
        let response = self.send(&request).await?;

        response
            .content
            .iter()
            .find(|c| c.content_type == "text")
            .map(|c| c.text.clone())
            .ok_or_else(|| CapabilityError::MalformedResponse("No text content in response".to_string()))
    }
}

#[async_trait]
impl ZeroShotClassifier for AnthropicClient {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, CapabilityError> {
        let mut request = self.request(
            CLASSIFIER_SYSTEM_PROMPT,
            &build_classification_prompt(text, labels),
            self.config.max_tokens,
        );
        request.tools = vec![label_tool(labels)];
        request.tool_choice = Some(ToolChoice {
            choice_type: "tool".to_string(),
            name: LABEL_TOOL.to_string(),
        });

        let response = self.send(&request).await?;
        let chosen = extract_label(&response, labels)?;

        let mut ranked = vec![chosen.clone()];
        ranked.extend(labels.iter().filter(|l| **l != chosen).map(|l| l.to_string()));
        Ok(ranked)
    }
}

fn label_tool(labels: &[&str]) -> Tool {
    Tool {
        name: LABEL_TOOL.to_string(),
        description: "Submit the single label that best describes the text".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "label": {
                    "type": "string",
                    "enum": labels
                }
            },
            "required": ["label"]
        }),
    }
}

/// Find the submitted label in the tool_use block and check it is a candidate
fn extract_label(response: &AnthropicResponse, labels: &[&str]) -> Result<String, CapabilityError> {
    let label = response
        .content
        .iter()
        .filter(|c| c.content_type == "tool_use" && c.name.as_deref() == Some(LABEL_TOOL))
        .find_map(|c| c.input.as_ref()?.get("label")?.as_str().map(str::to_string))
        .ok_or_else(|| CapabilityError::MalformedResponse("No tool_use response found".to_string()))?;

    if labels.contains(&label.as_str()) {
        Ok(label)
    } else {
        Err(CapabilityError::MalformedResponse(format!(
            "Label '{}' is not one of {:?}",
            label, labels
        )))
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    description: String,
    input_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["Anxious", "Neutral", "Reassured", "Concerned"];

    #[test]
    fn test_extract_label_from_tool_use() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use", "name": "submit_label", "input": {"label": "Reassured"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_label(&response, LABELS).unwrap(), "Reassured");
    }

    #[test]
    fn test_extract_label_rejects_unknown_label() {
        let response: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use", "name": "submit_label", "input": {"label": "Happy"}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            extract_label(&response, LABELS),
            Err(CapabilityError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_label_requires_tool_use() {
        let response: AnthropicResponse =
            serde_json::from_str(r#"{"content": [{"type": "text", "text": "Reassured"}]}"#).unwrap();
        assert!(extract_label(&response, LABELS).is_err());
    }

    #[test]
    fn test_label_tool_schema_lists_candidates() {
        let tool = label_tool(LABELS);
        assert_eq!(tool.input_schema["properties"]["label"]["enum"][2], "Reassured");
    }
}
