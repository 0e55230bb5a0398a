use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL scheme not allowed: {0}")]
    InvalidUrlScheme(String),

    #[error("Localhost URLs are not allowed")]
    LocalhostBlocked,

    #[error("Private IP address not allowed: {0}")]
    PrivateIpBlocked(String),

    #[error("Domain is blocked: {0}")]
    DomainBlocked(String),

    #[error("Domain is not in the allow list: {0}")]
    DomainNotAllowed(String),

    #[error("Failed to fetch content: {0}")]
    FetchError(String),

    #[error("Request timeout: {0}")]
    TimeoutError(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Content too large: {size} bytes (max: {max} bytes)")]
    ContentTooLarge { size: usize, max: usize },

    #[error("Failed to extract site data: {0}")]
    ExtractError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("External service error: {service} - {message}")]
    ExternalServiceError { service: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Data source '{source_name}' failed: {reason}")]
    SourceFailed { source_name: String, reason: String },
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::ParseError(e.to_string())
    }
}

impl PipelineError {
    pub fn log(&self) {
        match self {
            PipelineError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            PipelineError::InvalidUrl(e)
            | PipelineError::InvalidUrlScheme(e)
            | PipelineError::PrivateIpBlocked(e)
            | PipelineError::DomainBlocked(e)
            | PipelineError::DomainNotAllowed(e) => {
                warn!(error = %e, "URL rejected by validation policy");
            }
            PipelineError::LocalhostBlocked => {
                warn!("Localhost URL rejected by validation policy");
            }
            PipelineError::FetchError(e) => {
                error!(error = %e, "Content fetch failed");
            }
            PipelineError::TimeoutError(e) => {
                warn!(error = %e, "Request timed out");
            }
            PipelineError::HttpStatus { status, url } => {
                warn!(status = status, url = %url, "Unexpected HTTP status");
            }
            PipelineError::InvalidContentType(e) => {
                warn!(error = %e, "Invalid content type received");
            }
            PipelineError::ContentTooLarge { size, max } => {
                warn!(size = size, max = max, "Response body exceeded size limit");
            }
            PipelineError::ExtractError(e) => {
                error!(error = %e, "Site extraction failed");
            }
            PipelineError::ParseError(e) => {
                warn!(error = %e, "Response parsing failed");
            }
            PipelineError::ExternalServiceError { service, message } => {
                error!(
                    service = %service,
                    error = %message,
                    "External service error occurred"
                );
            }
            PipelineError::InvalidConfiguration(e) => {
                error!(error = %e, "Invalid configuration");
            }
            PipelineError::SourceFailed {
                source_name,
                reason,
            } => {
                error!(source = %source_name, error = %reason, "Data source failed");
            }
        }
    }
}
