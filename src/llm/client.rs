use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::anthropic::{AnthropicClient, AnthropicConfig};
use crate::llm::huggingface::{HuggingFaceClient, HuggingFaceConfig};

/// Failure of an external model capability
///
/// Any of these aborts the analysis run.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Fixed decoding parameters for SOAP field generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    /// Beam width
    pub num_beams: u32,
    /// Stop beams once enough candidates are finished
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 150,
            num_beams: 4,
            early_stopping: true,
        }
    }
}

/// Zero-shot text classification
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Rank `labels` by how well they describe `text`, best first
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<String>, CapabilityError>;
}

/// Constrained text generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CapabilityError>;
}

/// Backend serving the two model capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    HuggingFace,
    Anthropic,
}

impl FromStr for Provider {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Provider::HuggingFace),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(CapabilityError::Config(format!(
                "Unsupported provider '{}'. Supported providers: huggingface, anthropic",
                other
            ))),
        }
    }
}

pub const DEFAULT_HF_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_HF_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_HF_GENERATOR_MODEL: &str = "google/flan-t5-large";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

/// Selection of the models backing the classifier and generator
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    /// API token for the selected provider
    pub api_key: String,
    pub classifier_model: String,
    pub generator_model: String,
    /// Base URL for the Hugging Face Inference API
    pub hf_endpoint: String,
}

impl ModelConfig {
    /// Create config from environment variables
    ///
    /// - `NOTETAKER_PROVIDER`: `huggingface` (default) or `anthropic`
    /// - `HF_API_TOKEN` or `ANTHROPIC_API_KEY`, depending on the provider
    /// - `NOTETAKER_CLASSIFIER_MODEL`, `NOTETAKER_GENERATOR_MODEL`
    /// - `NOTETAKER_HF_ENDPOINT`
    pub fn from_env() -> Result<Self, CapabilityError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CapabilityError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match non_empty("NOTETAKER_PROVIDER") {
            Some(value) => value.parse()?,
            None => Provider::HuggingFace,
        };

        let (key_var, default_classifier, default_generator) = match provider {
            Provider::HuggingFace => (
                "HF_API_TOKEN",
                DEFAULT_HF_CLASSIFIER_MODEL,
                DEFAULT_HF_GENERATOR_MODEL,
            ),
            Provider::Anthropic => (
                "ANTHROPIC_API_KEY",
                DEFAULT_ANTHROPIC_MODEL,
                DEFAULT_ANTHROPIC_MODEL,
            ),
        };

        let api_key = non_empty(key_var).ok_or_else(|| {
            CapabilityError::Config(format!("{} environment variable not set", key_var))
        })?;

        Ok(Self {
            provider,
            api_key,
            classifier_model: non_empty("NOTETAKER_CLASSIFIER_MODEL")
                .unwrap_or_else(|| default_classifier.to_string()),
            generator_model: non_empty("NOTETAKER_GENERATOR_MODEL")
                .unwrap_or_else(|| default_generator.to_string()),
            hf_endpoint: non_empty("NOTETAKER_HF_ENDPOINT")
                .map(|e| e.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_HF_ENDPOINT.to_string()),
        })
    }
}

/// The two model capabilities, loaded once and shared read-only
#[derive(Clone)]
pub struct Capabilities {
    pub classifier: Arc<dyn ZeroShotClassifier>,
    pub generator: Arc<dyn TextGenerator>,
}

impl Capabilities {
    pub fn new(
        classifier: Arc<dyn ZeroShotClassifier>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    /// Build the capabilities for the configured provider
    pub fn from_config(config: &ModelConfig) -> Result<Self, CapabilityError> {
        match config.provider {
            Provider::HuggingFace => {
                let client = Arc::new(HuggingFaceClient::new(HuggingFaceConfig {
                    api_token: config.api_key.clone(),
                    endpoint: config.hf_endpoint.clone(),
                    classifier_model: config.classifier_model.clone(),
                    generator_model: config.generator_model.clone(),
                })?);
                Ok(Self::new(client.clone(), client))
            }
            Provider::Anthropic => {
                let classifier = Arc::new(AnthropicClient::new(AnthropicConfig::new(
                    config.api_key.clone(),
                    config.classifier_model.clone(),
                )));
                let generator = Arc::new(AnthropicClient::new(AnthropicConfig::new(
                    config.api_key.clone(),
                    config.generator_model.clone(),
                )));
                Ok(Self::new(classifier, generator))
            }
        }
    }
}
