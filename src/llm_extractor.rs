//! LLM-based structured data extraction from free text
//!
//! Turns a typed or transcribed description of a business into an
//! [`LlmExtractedRecord`] with a single completion call.

use crate::business_type::BusinessType;
use crate::llm_providers::{CompletionRequest, LLMProvider, END_MARKER};
use crate::records::LlmExtractedRecord;
use crate::utils::extract_json_from_text;
use crate::PipelineError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Configuration for LLM extraction
#[derive(Clone, Debug)]
pub struct LLMExtractorConfig {
    /// Maximum number of input characters sent to the model
    pub max_input_chars: usize,
    /// Completion token cap
    pub max_tokens: u32,
    /// Sampling temperature; extraction wants low variance
    pub temperature: f32,
}

impl Default for LLMExtractorConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 8_000,
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

/// Anything that can turn free text into business facts
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_from_text(&self, text: &str) -> Result<LlmExtractedRecord, PipelineError>;
}

/// Main LLM extractor
pub struct LLMExtractor {
    /// LLM provider
    provider: Arc<dyn LLMProvider>,
    /// Configuration
    config: LLMExtractorConfig,
}

impl LLMExtractor {
    /// Create a new LLM extractor
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            config: LLMExtractorConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(provider: Arc<dyn LLMProvider>, config: LLMExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// Build prompt for LLM
    fn build_prompt(&self, text: &str) -> String {
        let input: String = text.chars().take(self.config.max_input_chars).collect();
        let types = BusinessType::ALL
            .iter()
            .map(|bt| bt.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Extract business information from the description below.\n\n\
            Description:\n\"\"\"\n{input}\n\"\"\"\n\n\
            Return ONLY a JSON object with these keys (omit any key the description does not state):\n\
            - businessName: string\n\
            - description: string, one or two sentences\n\
            - businessType: one of [{types}]\n\
            - industry: string\n\
            - category: string\n\
            - services: array of strings\n\
            - features: array of strings\n\
            - phone, email, address: strings\n\
            - socialLinks: object with optional instagram, facebook, twitter, linkedin URLs\n\
            - preferredColors: object with optional primary and secondary hex colors\n\
            - targetAudience: string\n\
            - tone: string\n\
            - uniqueSellingPoints: array of strings\n\
            - keyMessages: array of strings\n\
            - callToAction: string\n\n\
            Do not invent facts. After the JSON write {END_MARKER} on its own line."
        )
    }

    /// Parse LLM output into a record
    pub fn parse_response(raw: &str) -> Result<LlmExtractedRecord, PipelineError> {
        let json = extract_json_from_text(raw).ok_or_else(|| {
            PipelineError::ParseError("No JSON object in extraction response".to_string())
        })?;
        let record: LlmExtractedRecord = serde_json::from_str(json)?;
        Ok(record.normalized())
    }
}

#[async_trait]
impl TextExtractor for LLMExtractor {
    #[instrument(
        level = "debug",
        skip(self, text),
        fields(provider = self.provider.name(), chars = text.len())
    )]
    async fn extract_from_text(&self, text: &str) -> Result<LlmExtractedRecord, PipelineError> {
        if text.trim().is_empty() {
            return Ok(LlmExtractedRecord::default());
        }

        let request = CompletionRequest::new(self.build_prompt(text))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let raw = self.provider.complete(request).await?;
        let record = Self::parse_response(&raw).map_err(|e| {
            warn!(error = %e, "LLM extraction response could not be parsed");
            e
        })?;

        debug!(
            business_name = record.business_name.as_deref().unwrap_or("-"),
            services = record.services.len(),
            "Extracted business facts from text"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_providers::MockProvider;

    #[test]
    fn test_default_config() {
        let config = LLMExtractorConfig::default();
        assert_eq!(config.max_input_chars, 8_000);
        assert_eq!(config.temperature, 0.3);
    }

    #[test]
    fn test_parse_response_with_fences() {
        let raw = "```json\n{\"businessName\": \"Luna Spa\", \"businessType\": \"spa\", \"tone\": \"\"}\n```";
        let record = LLMExtractor::parse_response(raw).unwrap();
        assert_eq!(record.business_name.as_deref(), Some("Luna Spa"));
        assert_eq!(record.business_type, Some(BusinessType::Spa));
        assert_eq!(record.tone, None);
    }

    #[test]
    fn test_parse_response_rejects_prose() {
        assert!(matches!(
            LLMExtractor::parse_response("I could not find anything."),
            Err(PipelineError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_truncates_input_and_uses_low_temperature() {
        let provider = Arc::new(MockProvider::new().with_response("{\"businessName\": \"Acme\"}"));
        let extractor = LLMExtractor::with_config(
            provider.clone(),
            LLMExtractorConfig {
                max_input_chars: 10,
                ..Default::default()
            },
        );

        let record = extractor
            .extract_from_text("abcdefghijklmnopqrstuvwxyz")
            .await
            .unwrap();
        assert_eq!(record.business_name.as_deref(), Some("Acme"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("abcdefghij"));
        assert!(!requests[0].prompt.contains("abcdefghijk"));
        assert_eq!(requests[0].temperature, 0.3);
    }

    #[tokio::test]
    async fn test_blank_text_skips_the_provider() {
        let provider = Arc::new(MockProvider::new());
        let extractor = LLMExtractor::new(provider.clone());
        let record = extractor.extract_from_text("   ").await.unwrap();
        assert_eq!(record, LlmExtractedRecord::default());
        assert!(provider.requests().is_empty());
    }
}
