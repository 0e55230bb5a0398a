//! The landing page pipeline: acquire, merge, backfill, assemble.

use crate::config::{PipelineConfig, SourceFailurePolicy};
use crate::content_generator::{ContentContext, ContentField, ContentGenerator, GeneratedContent};
use crate::landing_page::LandingPageData;
use crate::llm_extractor::{LLMExtractor, TextExtractor};
use crate::llm_providers::{CohereProvider, LLMProvider};
use crate::merge::{merge_data, DEFAULT_BUSINESS_NAME};
use crate::missing_fields::{
    identify_generated_fields, identify_missing_fields, FIELD_ABOUT_CONTENT, FIELD_CONTACT_INFO,
    FIELD_DESCRIPTION, FIELD_FEATURES, FIELD_GALLERY_IMAGES, FIELD_HERO_IMAGE, FIELD_LOGO,
    FIELD_SERVICES, FIELD_TESTIMONIALS,
};
use crate::records::{Confidence, EnrichedRecord, LlmExtractedRecord, MergedRecord, ScrapedRecord};
use crate::site_scraper::{HttpSiteScraper, WebsiteScraper};
use crate::template_fields::generate_template_fields;
use crate::utils::display_host;
use crate::PipelineError;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

pub const FALLBACK_WARNING: &str = "Pipeline failed. Using fallback data.";
pub const LOW_CONFIDENCE_WARNING: &str =
    "Low confidence in extracted data. Consider providing more information.";
pub const MISSING_LOGO_WARNING: &str = "No logo found. Consider uploading your logo.";
pub const MISSING_HERO_WARNING: &str = "No hero image found. A placeholder will be used.";
pub const MISSING_GALLERY_WARNING: &str =
    "No gallery images found. Consider adding photos of your business.";
pub const MISSING_CONTACT_WARNING: &str =
    "No contact information found. Add a phone number or email so visitors can reach you.";

/// What the caller knows about the business
///
/// Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineInput {
    pub url: Option<String>,
    pub text: Option<String>,
    /// Transcribed voice description; used when `text` is absent
    pub voice: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PipelineInput {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn source_url(&self) -> Option<&str> {
        present(&self.url)
    }

    /// The text handed to the extractor: typed text, else the transcript
    pub fn extraction_text(&self) -> Option<&str> {
        present(&self.text).or_else(|| present(&self.voice))
    }
}

/// Result of one acquisition branch
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    /// The input did not ask for this source
    NotRequested,
    /// The input asked for it, but no adapter is configured
    Unavailable,
    Found(T),
    Failed(String),
}

impl<T> SourceOutcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SourceOutcome::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SourceOutcome::Found(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFlags {
    pub scraped: bool,
    pub llm: bool,
    pub ai_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMeta {
    pub sources: SourceFlags,
    pub confidence: Confidence,
    pub missing_fields: Vec<String>,
    pub generated_fields: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub data: LandingPageData,
    pub meta: PipelineMeta,
    pub warnings: Vec<String>,
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// The generic result returned when a run cannot complete
pub fn fallback_result(url: Option<&str>, started: Instant) -> PipelineResult {
    let name = url
        .and_then(|u| {
            display_host(u)
                .or_else(|_| display_host(&format!("https://{u}")))
                .ok()
        })
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string());

    PipelineResult {
        data: LandingPageData::minimal(&name),
        meta: PipelineMeta {
            sources: SourceFlags::default(),
            confidence: Confidence::Low,
            missing_fields: Vec::new(),
            generated_fields: Vec::new(),
            timestamp: Utc::now(),
            processing_time_ms: elapsed_ms(started),
        },
        warnings: vec![FALLBACK_WARNING.to_string()],
    }
}

/// Content keys to request for a set of missing record fields. Hero and SEO
/// copy is always requested.
pub fn content_fields_for(missing: &[String]) -> Vec<ContentField> {
    let mut fields = vec![
        ContentField::Headline,
        ContentField::Subheadline,
        ContentField::Tagline,
        ContentField::CtaText,
        ContentField::Stats,
        ContentField::MetaDescription,
    ];
    for name in missing {
        let field = match name.as_str() {
            FIELD_ABOUT_CONTENT => ContentField::AboutText,
            FIELD_SERVICES => ContentField::Services,
            FIELD_FEATURES => ContentField::Features,
            FIELD_TESTIMONIALS => ContentField::Testimonials,
            _ => continue,
        };
        fields.push(field);
    }
    fields
}

/// Overlay generated copy onto the record. Returns the names of the fields
/// that were filled.
pub fn apply_generated_content(
    enriched: &mut EnrichedRecord,
    missing: &[String],
    content: GeneratedContent,
) -> Vec<String> {
    let is_missing = |field: &str| missing.iter().any(|m| m == field);
    let record = &mut enriched.record;
    let copy = &mut enriched.copy;
    let mut filled = Vec::new();

    if is_missing(FIELD_DESCRIPTION) {
        if let Some(meta) = content.meta_description.clone() {
            record.description = meta;
            filled.push(FIELD_DESCRIPTION.to_string());
        }
    }
    if is_missing(FIELD_ABOUT_CONTENT) {
        if let Some(about) = content.about_text {
            record.about_content = Some(about);
            filled.push(FIELD_ABOUT_CONTENT.to_string());
        }
    }
    if let Some(services) = content.services.filter(|_| record.services.is_empty()) {
        record.services = services;
        filled.push(FIELD_SERVICES.to_string());
    }
    if let Some(features) = content.features.filter(|_| record.features.is_empty()) {
        record.features = features;
        filled.push(FIELD_FEATURES.to_string());
    }
    if let Some(testimonials) = content.testimonials.filter(|_| record.testimonials.is_empty()) {
        record.testimonials = testimonials;
        filled.push(FIELD_TESTIMONIALS.to_string());
    }

    if record.key_messages.is_empty() {
        record.key_messages = [&content.headline, &content.tagline]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        if !record.key_messages.is_empty() {
            filled.push("keyMessages".to_string());
        }
    }
    if record.call_to_action.is_none() {
        if let Some(cta) = &content.cta_text {
            record.call_to_action = Some(cta.clone());
            filled.push("callToAction".to_string());
        }
    }

    for (field, has_value) in [
        (ContentField::Headline, content.headline.is_some()),
        (ContentField::Subheadline, content.subheadline.is_some()),
        (ContentField::Tagline, content.tagline.is_some()),
        (ContentField::CtaText, content.cta_text.is_some()),
        (ContentField::Stats, content.stats.is_some()),
        (ContentField::MetaDescription, content.meta_description.is_some()),
    ] {
        if has_value {
            filled.push(field.as_str().to_string());
        }
    }
    copy.headline = content.headline;
    copy.subheadline = content.subheadline;
    copy.tagline = content.tagline;
    copy.cta_text = content.cta_text;
    copy.meta_description = content.meta_description;
    copy.stats = content.stats.unwrap_or_default();

    filled
}

/// Informational warnings about the final record
pub fn build_warnings(record: &MergedRecord) -> Vec<String> {
    let mut warnings = Vec::new();
    if record.confidence == Confidence::Low {
        warnings.push(LOW_CONFIDENCE_WARNING.to_string());
    }
    let missing = identify_missing_fields(record);
    for (field, warning) in [
        (FIELD_LOGO, MISSING_LOGO_WARNING),
        (FIELD_HERO_IMAGE, MISSING_HERO_WARNING),
        (FIELD_GALLERY_IMAGES, MISSING_GALLERY_WARNING),
        (FIELD_CONTACT_INFO, MISSING_CONTACT_WARNING),
    ] {
        if missing.iter().any(|m| m == field) {
            warnings.push(warning.to_string());
        }
    }
    warnings
}

/// Orchestrates one landing page generation per call
///
/// Holds only shared, immutable collaborators, so a single instance can
/// serve concurrent calls.
#[derive(Clone, Default)]
pub struct LandingPagePipeline {
    scraper: Option<Arc<dyn WebsiteScraper>>,
    extractor: Option<Arc<dyn TextExtractor>>,
    generator: ContentGenerator,
    failure_policy: SourceFailurePolicy,
}

impl LandingPagePipeline {
    /// Wire the HTTP scraper and, when Cohere is configured, LLM extraction
    /// and copywriting.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let scraper = HttpSiteScraper::new(config.fetcher, config.url_validation)?;
        let provider: Option<Arc<dyn LLMProvider>> = match config.cohere {
            Some(cohere) => Some(Arc::new(CohereProvider::new(cohere)?)),
            None => {
                info!("No Cohere API key configured, LLM features disabled");
                None
            }
        };

        let mut pipeline = Self::default()
            .with_scraper(Arc::new(scraper))
            .with_content_generator(ContentGenerator::new(provider.clone()))
            .with_failure_policy(config.failure_policy);
        if let Some(provider) = provider {
            pipeline = pipeline.with_extractor(Arc::new(LLMExtractor::new(provider)));
        }
        Ok(pipeline)
    }

    /// Shorthand for `LandingPagePipeline::new(PipelineConfig::from_env()?)`
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::new(PipelineConfig::from_env()?)
    }

    pub fn with_scraper(mut self, scraper: Arc<dyn WebsiteScraper>) -> Self {
        self.scraper = Some(scraper);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_content_generator(mut self, generator: ContentGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_failure_policy(mut self, policy: SourceFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn failure_policy(&self) -> SourceFailurePolicy {
        self.failure_policy
    }

    /// Generate landing page data. Never fails: any error or panic yields
    /// [`fallback_result`].
    #[instrument(
        level = "debug",
        skip(self, input),
        fields(url = input.url.as_deref().unwrap_or("-"))
    )]
    pub async fn generate_landing_page(&self, input: PipelineInput) -> PipelineResult {
        let started = Instant::now();

        match AssertUnwindSafe(self.run(&input, started))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => {
                info!(
                    name = %result.data.brand.name,
                    confidence = result.meta.confidence.as_str(),
                    missing = result.meta.missing_fields.len(),
                    elapsed_ms = result.meta.processing_time_ms,
                    "Landing page generated"
                );
                result
            }
            Ok(Err(e)) => {
                e.log();
                warn!("Pipeline failed, returning fallback data");
                fallback_result(input.source_url(), started)
            }
            Err(_) => {
                error!("Pipeline panicked, returning fallback data");
                fallback_result(input.source_url(), started)
            }
        }
    }

    async fn run(
        &self,
        input: &PipelineInput,
        started: Instant,
    ) -> Result<PipelineResult, PipelineError> {
        let (scrape, extract) = futures::join!(self.scrape(input), self.extract(input));
        debug!(
            scraped = scrape.is_found(),
            extracted = extract.is_found(),
            "Acquisition finished"
        );

        let mut warnings = Vec::new();
        let scraped = self.resolve("scraper", "Website scraping", scrape, &mut warnings)?;
        let llm = self.resolve("llm_extractor", "Text extraction", extract, &mut warnings)?;

        let mut record = merge_data(scraped.as_ref(), llm.as_ref());
        record.raw_text = input.extraction_text().map(str::to_string);

        let missing_fields = identify_missing_fields(&record);
        let context = ContentContext::from(&record);
        let mut enriched = EnrichedRecord::from(record);

        let mut generated_fields = Vec::new();
        if !missing_fields.is_empty() {
            debug!(missing = ?missing_fields, "Backfilling missing fields");
            let fields = content_fields_for(&missing_fields);
            let content = self
                .generator
                .generate_missing_content(&context, &fields)
                .await;
            generated_fields = apply_generated_content(&mut enriched, &missing_fields, content);
        }

        let data = generate_template_fields(&enriched);

        for field in identify_generated_fields(&enriched.record, scraped.as_ref(), llm.as_ref()) {
            if !generated_fields.contains(&field) {
                generated_fields.push(field);
            }
        }
        warnings.extend(build_warnings(&enriched.record));

        Ok(PipelineResult {
            data,
            meta: PipelineMeta {
                sources: SourceFlags {
                    scraped: scraped.is_some(),
                    llm: llm.is_some(),
                    ai_generated: !missing_fields.is_empty(),
                },
                confidence: enriched.record.confidence,
                missing_fields,
                generated_fields,
                timestamp: Utc::now(),
                processing_time_ms: elapsed_ms(started),
            },
            warnings,
        })
    }

    async fn scrape(&self, input: &PipelineInput) -> SourceOutcome<ScrapedRecord> {
        let Some(url) = input.source_url() else {
            return SourceOutcome::NotRequested;
        };
        let Some(scraper) = &self.scraper else {
            return SourceOutcome::Unavailable;
        };
        match scraper.scrape_website(url).await {
            Ok(record) => SourceOutcome::Found(record),
            Err(e) => {
                e.log();
                SourceOutcome::Failed(e.to_string())
            }
        }
    }

    async fn extract(&self, input: &PipelineInput) -> SourceOutcome<LlmExtractedRecord> {
        let Some(text) = input.extraction_text() else {
            return SourceOutcome::NotRequested;
        };
        let Some(extractor) = &self.extractor else {
            return SourceOutcome::Unavailable;
        };
        match extractor.extract_from_text(text).await {
            Ok(record) => SourceOutcome::Found(record),
            Err(e) => {
                e.log();
                SourceOutcome::Failed(e.to_string())
            }
        }
    }

    fn resolve<T>(
        &self,
        source: &str,
        label: &str,
        outcome: SourceOutcome<T>,
        warnings: &mut Vec<String>,
    ) -> Result<Option<T>, PipelineError> {
        match outcome {
            SourceOutcome::Found(value) => Ok(Some(value)),
            SourceOutcome::NotRequested => Ok(None),
            SourceOutcome::Unavailable => {
                warn!(source, "Source requested but not configured");
                warnings.push(format!("{label} is not configured, so that input was ignored."));
                Ok(None)
            }
            SourceOutcome::Failed(reason) => match self.failure_policy {
                SourceFailurePolicy::Fallback => Err(PipelineError::SourceFailed {
                    source_name: source.to_string(),
                    reason,
                }),
                SourceFailurePolicy::Degrade => {
                    warnings.push(format!("{label} failed ({reason}). Continuing without it."));
                    Ok(None)
                }
            },
        }
    }
}
