//! LLM configuration and validation utilities

use crate::PipelineError;

pub const DEFAULT_COHERE_ENDPOINT: &str = "https://api.cohere.ai/v1/generate";
pub const DEFAULT_COHERE_MODEL: &str = "command";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// API key validation utilities
pub struct ApiKeyValidator;

impl ApiKeyValidator {
    /// Validate Cohere API key format
    pub fn validate_cohere_key(api_key: &str) -> Result<(), PipelineError> {
        if api_key.is_empty() {
            return Err(PipelineError::InvalidConfiguration(
                "Cohere API key cannot be empty".to_string(),
            ));
        }

        if api_key.chars().any(char::is_whitespace) {
            return Err(PipelineError::InvalidConfiguration(
                "Cohere API key must not contain whitespace".to_string(),
            ));
        }

        if api_key.len() < 20 {
            return Err(PipelineError::InvalidConfiguration(
                "Cohere API key appears to be too short".to_string(),
            ));
        }

        Ok(())
    }
}

/// Credentials and endpoint for the Cohere completion API
#[derive(Clone, PartialEq)]
pub struct CohereConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl CohereConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PipelineError> {
        let api_key = api_key.into();
        ApiKeyValidator::validate_cohere_key(&api_key)?;
        Ok(Self {
            api_key,
            model: DEFAULT_COHERE_MODEL.to_string(),
            endpoint: DEFAULT_COHERE_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// Keys are never printed in full.
impl std::fmt::Debug for CohereConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(4).collect();
        f.debug_struct("CohereConfig")
            .field("api_key", &format!("{visible}…"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohere_key_validation() {
        // Valid key
        assert!(ApiKeyValidator::validate_cohere_key("abcdefghij1234567890XYZ").is_ok());

        // Invalid keys
        assert!(ApiKeyValidator::validate_cohere_key("").is_err());
        assert!(ApiKeyValidator::validate_cohere_key("short").is_err());
        assert!(ApiKeyValidator::validate_cohere_key("abcdefghij 1234567890XYZ").is_err());
    }

    #[test]
    fn test_cohere_config_defaults() {
        let config = CohereConfig::new("abcdefghij1234567890XYZ")
            .unwrap()
            .with_model("command-light");
        assert_eq!(config.model, "command-light");
        assert_eq!(config.endpoint, DEFAULT_COHERE_ENDPOINT);
        assert_eq!(config.timeout_secs, 30);
        assert!(!format!("{config:?}").contains("1234567890"));
    }
}
