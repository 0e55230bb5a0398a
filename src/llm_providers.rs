//! LLM completion providers
//!
//! The pipeline talks to language models through the [`LLMProvider`] trait:
//! one prompt in, raw completion text out. Parsing the text into structured
//! data is the caller's job.

use crate::llm_config::CohereConfig;
use crate::PipelineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Stop sequence the prompts ask the model to emit after its JSON
pub const END_MARKER: &str = "--END--";

/// A single completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: 1000,
            temperature: 0.7,
            stop_sequences: vec![END_MARKER.to_string()],
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the name of the provider
    fn name(&self) -> &str;

    /// Run one completion and return the generated text
    async fn complete(&self, request: CompletionRequest) -> Result<String, PipelineError>;
}

#[derive(Serialize)]
struct CohereGenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    stop_sequences: &'a [String],
}

#[derive(Deserialize)]
struct CohereGenerateResponse {
    #[serde(default)]
    generations: Vec<CohereGeneration>,
}

#[derive(Deserialize)]
struct CohereGeneration {
    text: String,
}

/// Cohere `generate` endpoint provider
pub struct CohereProvider {
    client: reqwest::Client,
    config: CohereConfig,
}

impl CohereProvider {
    pub fn new(config: CohereConfig) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PipelineError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LLMProvider for CohereProvider {
    fn name(&self) -> &str {
        "cohere"
    }

    #[instrument(level = "debug", skip(self, request), fields(model = %self.config.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, PipelineError> {
        let body = CohereGenerateBody {
            model: &self.config.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stop_sequences: &request.stop_sequences,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PipelineError::TimeoutError(e.to_string())
                } else {
                    PipelineError::ExternalServiceError {
                        service: "Cohere".to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Cohere returned a non-success status");
            return Err(PipelineError::ExternalServiceError {
                service: "Cohere".to_string(),
                message: format!("API error ({status}): {error_text}"),
            });
        }

        let parsed: CohereGenerateResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::ParseError(e.to_string()))?;

        let text = parsed
            .generations
            .into_iter()
            .next()
            .map(|g| g.text)
            .ok_or_else(|| PipelineError::ExternalServiceError {
                service: "Cohere".to_string(),
                message: "No generations in response".to_string(),
            })?;

        debug!(chars = text.len(), "Received completion");
        Ok(text)
    }
}

/// Mock LLM provider for testing
///
/// Replays scripted responses in order; once the script runs out it keeps
/// returning the last entry. Every prompt is recorded.
pub struct MockProvider {
    name: String,
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    prompts: Mutex<Vec<CompletionRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    fn push(&self, entry: Result<String, String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, PipelineError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request);
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let entry = match next {
            Some(entry) => {
                if let Ok(mut last) = self.last.lock() {
                    *last = Some(entry.clone());
                }
                Some(entry)
            }
            None => self.last.lock().ok().and_then(|l| l.clone()),
        };

        match entry {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(PipelineError::ExternalServiceError {
                service: "mock".to_string(),
                message,
            }),
            None => Ok("{}".to_string()),
        }
    }
}
