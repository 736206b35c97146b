use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use notetaker::{
    Capabilities, CapabilityError, GenerationParams, TextGenerator, ZeroShotClassifier,
};

#[allow(dead_code)]
pub const FULL_TRANSCRIPT: &str = include_str!("../fixtures/jones_consultation.txt");

/// Always ranks the first candidate label on top, counting calls
#[derive(Default)]
pub struct FirstLabelClassifier {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ZeroShotClassifier for FirstLabelClassifier {
    async fn classify(&self, _text: &str, labels: &[&str]) -> Result<Vec<String>, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(labels.iter().map(|l| l.to_string()).collect())
    }
}

/// Answers every prompt with a fixed quoted sentence, counting calls
#[derive(Default)]
pub struct CountingGenerator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("\"Stand-in summary.\"".to_string())
    }
}

/// Fails every call as an unavailable model would
pub struct UnavailableModel;

#[async_trait]
impl ZeroShotClassifier for UnavailableModel {
    async fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<String>, CapabilityError> {
        Err(CapabilityError::Api {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for UnavailableModel {
    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, CapabilityError> {
        Err(CapabilityError::Api {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

pub struct StandIns {
    pub classifier: Arc<FirstLabelClassifier>,
    pub generator: Arc<CountingGenerator>,
}

impl StandIns {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(FirstLabelClassifier::default()),
            generator: Arc::new(CountingGenerator::default()),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.classifier.clone(), self.generator.clone())
    }

    pub fn classifier_calls(&self) -> usize {
        self.classifier.calls.load(Ordering::SeqCst)
    }

    pub fn generator_calls(&self) -> usize {
        self.generator.calls.load(Ordering::SeqCst)
    }
}
