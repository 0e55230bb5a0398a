//! Turn a business website and/or a free-text description into
//! landing-page data with a lead-capture form.
//!
//! ```ignore
//! let pipeline = LandingPagePipeline::new(PipelineConfig::from_env()?)?;
//! let result = pipeline
//!     .generate_landing_page(PipelineInput::from_url("https://example-bakery.com"))
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

mod business_type;
mod config;
mod content_generator;
mod error;
mod extractor;
mod fallback_templates;
mod fetcher;
mod landing_page;
mod llm_config;
mod llm_extractor;
mod llm_providers;
mod logging;
mod merge;
mod missing_fields;
mod pipeline;
mod records;
mod security;
mod site_scraper;
mod template_fields;
mod utils;

pub use business_type::{BusinessType, ColorPalette, TemplateCategory};
pub use config::{PipelineConfig, SourceFailurePolicy};
pub use content_generator::{
    build_generation_prompt, generate_fallback_content, ContentContext, ContentField,
    ContentGenerator, GeneratedContent,
};
pub use error::PipelineError;
pub use extractor::SiteExtractor;
pub use fallback_templates::{fill_placeholders, template_for, ContentTemplate, SampleTestimonial};
pub use fetcher::{Fetcher, FetcherConfig};
pub use landing_page::{
    lead_form_fields, AboutSection, BrandSection, CtaSection, FeatureItem, FeaturesSection,
    FooterContact, FooterSection, FormField, FormFieldKind, GallerySection, HeroSection,
    LandingPageData, NavItem, SeoSection, ServiceItem, ServicesSection, SocialLink,
    TestimonialsSection,
};
pub use llm_config::{ApiKeyValidator, CohereConfig};
pub use llm_extractor::{LLMExtractor, LLMExtractorConfig, TextExtractor};
pub use llm_providers::{CohereProvider, CompletionRequest, LLMProvider, MockProvider, END_MARKER};
pub use logging::{log_error_card, log_pipeline_card};
#[cfg(feature = "logging")]
pub use logging::{setup_logging, LogConfig, LogLevelGuard};
pub use merge::{
    calculate_confidence, merge_arrays, merge_data, DEFAULT_BUSINESS_NAME, DEFAULT_DESCRIPTION,
    DEFAULT_MERGE_LIMIT, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};
pub use missing_fields::{identify_generated_fields, identify_missing_fields};
pub use pipeline::{
    fallback_result, LandingPagePipeline, PipelineInput, PipelineMeta, PipelineResult,
    SourceFlags, SourceOutcome, FALLBACK_WARNING, LOW_CONFIDENCE_WARNING,
};
pub use records::{
    Confidence, ContactInfo, EnrichedRecord, LlmExtractedRecord, LlmSocialLinks, MergedRecord,
    PageCopy, PreferredColors, Product, ScrapedRecord, SocialLinks, Stat, Testimonial,
};
pub use security::{ContentLimits, UrlValidationConfig, UrlValidator};
pub use site_scraper::{HttpSiteScraper, WebsiteScraper};
pub use template_fields::generate_template_fields;
