use crate::extractor::SiteExtractor;
use crate::fetcher::{Fetcher, FetcherConfig};
use crate::records::ScrapedRecord;
use crate::security::{UrlValidationConfig, UrlValidator};
use crate::PipelineError;
use async_trait::async_trait;
use tracing::{info, instrument};

/// Anything that can turn a website URL into scraped business facts
#[async_trait]
pub trait WebsiteScraper: Send + Sync {
    async fn scrape_website(&self, url: &str) -> Result<ScrapedRecord, PipelineError>;
}

/// Validates, fetches and extracts a single page over HTTP
#[derive(Clone)]
pub struct HttpSiteScraper {
    validator: UrlValidator,
    fetcher: Fetcher,
    extractor: SiteExtractor,
}

impl HttpSiteScraper {
    pub fn new(
        fetcher_config: FetcherConfig,
        validation: UrlValidationConfig,
    ) -> Result<Self, PipelineError> {
        Ok(Self::with_fetcher(Fetcher::new(fetcher_config)?, validation))
    }

    pub fn with_fetcher(fetcher: Fetcher, validation: UrlValidationConfig) -> Self {
        Self {
            validator: UrlValidator::new(validation),
            fetcher,
            extractor: SiteExtractor::new(),
        }
    }
}

#[async_trait]
impl WebsiteScraper for HttpSiteScraper {
    #[instrument(level = "debug", skip(self), err)]
    async fn scrape_website(&self, url: &str) -> Result<ScrapedRecord, PipelineError> {
        let url = self.validator.validate(url)?;
        let html = self.fetcher.fetch_html(url.as_str()).await?;
        let record = self.extractor.extract(&html, url.as_str())?;

        info!(
            url = %url,
            confidence = record.confidence.as_str(),
            "Scraped website"
        );
        Ok(record)
    }
}
