//! Pipeline configuration, built once at startup and passed in explicitly.

use crate::fetcher::{
    FetcherConfig, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_USER_AGENT,
};
use crate::llm_config::{
    CohereConfig, DEFAULT_COHERE_ENDPOINT, DEFAULT_COHERE_MODEL, DEFAULT_LLM_TIMEOUT_SECS,
};
use crate::security::UrlValidationConfig;
use crate::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What the orchestrator does when a requested source fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFailurePolicy {
    /// Abandon the run and return the generic fallback result
    #[default]
    Fallback,
    /// Drop the failed source, keep the other one and add a warning
    Degrade,
}

impl FromStr for SourceFailurePolicy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(SourceFailurePolicy::Fallback),
            "degrade" => Ok(SourceFailurePolicy::Degrade),
            other => Err(PipelineError::InvalidConfiguration(format!(
                "Unknown source failure policy: {other} (expected 'fallback' or 'degrade')"
            ))),
        }
    }
}

impl fmt::Display for SourceFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFailurePolicy::Fallback => f.write_str("fallback"),
            SourceFailurePolicy::Degrade => f.write_str("degrade"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub fetcher: FetcherConfig,
    pub url_validation: UrlValidationConfig,
    /// `None` disables LLM extraction and LLM copywriting
    pub cohere: Option<CohereConfig>,
    pub failure_policy: SourceFailurePolicy,
}

impl PipelineConfig {
    /// Load `.env` (if present), then read the process environment
    pub fn from_env() -> Result<Self, PipelineError> {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Read the process environment without touching `.env` files
    pub fn from_process_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let parse_u64 = |key: &str, default: u64| -> Result<u64, PipelineError> {
            get(key).map_or(Ok(default), |raw| {
                raw.parse::<u64>().map_err(|e| {
                    PipelineError::InvalidConfiguration(format!("{key}: {e}"))
                })
            })
        };
        let parse_u32 = |key: &str, default: u32| -> Result<u32, PipelineError> {
            get(key).map_or(Ok(default), |raw| {
                raw.parse::<u32>().map_err(|e| {
                    PipelineError::InvalidConfiguration(format!("{key}: {e}"))
                })
            })
        };

        let llm_timeout_secs = parse_u64("PAGESMITH_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
        let cohere = match get("COHERE_API_KEY") {
            Some(key) => Some(
                CohereConfig::new(key)?
                    .with_model(or_default("COHERE_MODEL", DEFAULT_COHERE_MODEL))
                    .with_endpoint(or_default("COHERE_API_URL", DEFAULT_COHERE_ENDPOINT))
                    .with_timeout_secs(llm_timeout_secs),
            ),
            None => None,
        };

        let fetcher = FetcherConfig::default()
            .with_timeout(Duration::from_secs(parse_u64(
                "PAGESMITH_SCRAPER_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?))
            .with_user_agent(or_default("PAGESMITH_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT))
            .with_max_retries(parse_u32("PAGESMITH_SCRAPER_MAX_RETRIES", DEFAULT_MAX_RETRIES)?)
            .with_retry_delay(Duration::from_millis(parse_u64(
                "PAGESMITH_SCRAPER_RETRY_DELAY_MS",
                DEFAULT_RETRY_DELAY_MS,
            )?));

        let failure_policy = get("PAGESMITH_SOURCE_FAILURE_POLICY")
            .map(|raw| raw.parse::<SourceFailurePolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            fetcher,
            url_validation: UrlValidationConfig::default(),
            cohere,
            failure_policy,
        })
    }

    pub fn with_cohere(mut self, cohere: CohereConfig) -> Self {
        self.cohere = Some(cohere);
        self
    }

    pub fn with_failure_policy(mut self, policy: SourceFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_url_validation(mut self, url_validation: UrlValidationConfig) -> Self {
        self.url_validation = url_validation;
        self
    }

    pub fn with_fetcher(mut self, fetcher: FetcherConfig) -> Self {
        self.fetcher = fetcher;
        self
    }
}
