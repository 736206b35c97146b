use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::client::{CapabilityError, GenerationParams, TextGenerator, ZeroShotClassifier};

/// Configuration for the Hugging Face Inference API client
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// API token (from HF_API_TOKEN env var)
    pub api_token: String,
    /// Base URL, models are addressed as `{endpoint}/{model}`
    pub endpoint: String,
    /// Zero-shot classification model (e.g., "facebook/bart-large-mnli")
    pub classifier_model: String,
    /// Text-to-text generation model (e.g., "google/flan-t5-large")
    pub generator_model: String,
}

/// Hugging Face Inference API client serving both capabilities
pub struct HuggingFaceClient {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceClient {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, CapabilityError> {
        Ok(Self {
            client: Client::builder().build()?,
            config,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.config.endpoint, model)
    }

    /// POST a payload to a model and decode the JSON answer
    async fn infer<B, R>(&self, model: &str, body: &B) -> Result<R, CapabilityError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.model_url(model))
            .bearer_auth(&self.config.api_token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Api { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            CapabilityError::MalformedResponse(format!("{} returned unexpected JSON: {}", model, e))
        })
    }
}

#[async_trait]
impl ZeroShotClassifier for HuggingFaceClient {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, CapabilityError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
            options: InferenceOptions::default(),
        };

        debug!("Zero-shot request to {} with {} labels", self.config.classifier_model, labels.len());
        let response: ZeroShotResponse = self.infer(&self.config.classifier_model, &request).await?;
        Ok(response.ranked_labels())
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CapabilityError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: params.max_new_tokens,
                num_beams: params.num_beams,
                early_stopping: params.early_stopping,
            },
            options: InferenceOptions::default(),
        };

        debug!("Generation request to {} ({} chars)", self.config.generator_model, prompt.len());
        let response: GenerationResponse = self.infer(&self.config.generator_model, &request).await?;
        response.into_text().ok_or_else(|| {
            CapabilityError::MalformedResponse("No generated_text in response".to_string())
        })
    }
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block while a cold model loads instead of failing with 503
    wait_for_model: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

/// The API answers either with parallel label/score arrays (already sorted)
/// or with a list of label/score pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Parallel {
        labels: Vec<String>,
        #[allow(dead_code)]
        #[serde(default)]
        scores: Vec<f64>,
    },
    Pairs(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ZeroShotResponse {
    fn ranked_labels(self) -> Vec<String> {
        match self {
            ZeroShotResponse::Parallel { labels, .. } => labels,
            ZeroShotResponse::Pairs(mut pairs) => {
                pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
                pairs.into_iter().map(|p| p.label).collect()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    num_beams: u32,
    early_stopping: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    List(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::List(items) => items.into_iter().next().map(|g| g.generated_text),
            GenerationResponse::Single(item) => Some(item.generated_text),
        }
    }
}
