use crate::security::ContentLimits;
use crate::PipelineError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; pagesmith/0.3)";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Options for the website fetcher
///
/// # Examples
/// ```ignore
/// let fetcher = Fetcher::new(
///     FetcherConfig::default()
///         .with_timeout(Duration::from_secs(5))
///         .with_max_retries(0),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub retry_delay: Duration,
    pub max_redirects: usize,
    pub content_limits: ContentLimits,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_redirects: 5,
            content_limits: ContentLimits::default(),
        }
    }
}

impl FetcherConfig {
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_content_limits(mut self, content_limits: ContentLimits) -> Self {
        self.content_limits = content_limits;
        self
    }
}

#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

/// Outcome of a single attempt, before retry bookkeeping
enum Attempt {
    Done(String),
    Retry(PipelineError),
    Fatal(PipelineError),
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, PipelineError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to create HTTP client");
                PipelineError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        debug!(
            timeout_ms = config.timeout.as_millis() as u64,
            max_retries = config.max_retries,
            "Fetcher initialized"
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch a page body, retrying transient failures with a doubling delay.
    ///
    /// Network errors, 5xx and 429 are retried. Other statuses, a wrong
    /// content type or an oversized body fail immediately.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_html(&self, url: &str) -> Result<String, PipelineError> {
        let mut delay = self.config.retry_delay;
        let attempts = self.config.max_retries + 1;

        for attempt in 1..=attempts {
            debug!(attempt, "Attempting to fetch URL");

            match self.attempt(url).await {
                Attempt::Done(body) => {
                    debug!(url = %url, content_length = body.len(), "Successfully fetched page");
                    return Ok(body);
                }
                Attempt::Fatal(e) => return Err(e),
                Attempt::Retry(e) if attempt < attempts => {
                    warn!(error = %e, attempt, "Request failed, retrying after delay");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Attempt::Retry(e) => {
                    error!(error = %e, "Max retries exceeded");
                    return Err(e);
                }
            }
        }

        Err(PipelineError::FetchError("Max retries exceeded".to_string()))
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Retry(PipelineError::TimeoutError(e.to_string()))
            }
            Err(e) => return Attempt::Retry(PipelineError::FetchError(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let err = PipelineError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            };
            return if is_retryable(status) {
                Attempt::Retry(err)
            } else {
                Attempt::Fatal(err)
            };
        }

        let limits = &self.config.content_limits;
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !limits.accepts_content_type(content_type) {
                return Attempt::Fatal(PipelineError::InvalidContentType(
                    content_type.to_string(),
                ));
            }
        }

        if let Some(length) = response.content_length() {
            if length as usize > limits.max_content_size {
                return Attempt::Fatal(PipelineError::ContentTooLarge {
                    size: length as usize,
                    max: limits.max_content_size,
                });
            }
        }

        match response.bytes().await {
            Ok(bytes) if bytes.len() > limits.max_content_size => {
                Attempt::Fatal(PipelineError::ContentTooLarge {
                    size: bytes.len(),
                    max: limits.max_content_size,
                })
            }
            Ok(bytes) => Attempt::Done(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                error!(error = %e, url = %url, "Failed to read response body");
                Attempt::Retry(PipelineError::FetchError(e.to_string()))
            }
        }
    }
}
