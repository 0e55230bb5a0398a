use async_trait::async_trait;
use pagesmith::{
    BusinessType, Confidence, ContentGenerator, LLMExtractor, LandingPagePipeline, MockProvider,
    PipelineError, PipelineInput, ScrapedRecord, SourceFailurePolicy, WebsiteScraper,
    FALLBACK_WARNING, LOW_CONFIDENCE_WARNING,
};
use std::sync::Arc;

struct FailingScraper;

#[async_trait]
impl WebsiteScraper for FailingScraper {
    async fn scrape_website(&self, url: &str) -> Result<ScrapedRecord, PipelineError> {
        Err(PipelineError::FetchError(format!("connection refused: {url}")))
    }
}

struct PanickingScraper;

#[async_trait]
impl WebsiteScraper for PanickingScraper {
    async fn scrape_website(&self, _url: &str) -> Result<ScrapedRecord, PipelineError> {
        panic!("scraper blew up")
    }
}

struct FixedScraper(ScrapedRecord);

#[async_trait]
impl WebsiteScraper for FixedScraper {
    async fn scrape_website(&self, _url: &str) -> Result<ScrapedRecord, PipelineError> {
        Ok(self.0.clone())
    }
}

fn luna_spa_extractor() -> Arc<LLMExtractor> {
    let provider = MockProvider::new().with_response(
        r#"{"businessName":"Luna Spa","businessType":"spa","services":["Massages","Facials"]}"#,
    );
    Arc::new(LLMExtractor::new(Arc::new(provider)))
}

fn bakery_record() -> ScrapedRecord {
    ScrapedRecord {
        name: Some("Crumb & Co".into()),
        description: Some("Small-batch sourdough and pastries baked every morning.".into()),
        logo: Some("https://crumb.example/logo.png".into()),
        hero_image: Some("https://crumb.example/hero.jpg".into()),
        gallery_images: vec!["https://crumb.example/g1.jpg".into()],
        business_type: Some(BusinessType::Bakery),
        services: vec!["Sourdough".into(), "Croissants".into(), "Cakes".into()],
        confidence: Confidence::High,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_failed_scrape_returns_fallback() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FailingScraper))
        .with_content_generator(ContentGenerator::fallback_only());

    let result = pipeline
        .generate_landing_page(PipelineInput::from_url("https://example-bakery.com"))
        .await;

    assert_eq!(result.data.brand.name, "example-bakery.com");
    assert_eq!(result.meta.confidence, Confidence::Low);
    assert!(result.warnings.contains(&FALLBACK_WARNING.to_string()));
    assert!(!result.meta.sources.scraped);
    assert!(result.meta.missing_fields.is_empty());
}

#[tokio::test]
async fn test_text_only_spa() {
    let pipeline = LandingPagePipeline::default()
        .with_extractor(luna_spa_extractor())
        .with_content_generator(ContentGenerator::fallback_only());

    let result = pipeline
        .generate_landing_page(PipelineInput::from_text(
            "Luna Spa offers massages and facials in a calm space downtown.",
        ))
        .await;

    assert_eq!(result.data.brand.name, "Luna Spa");
    assert_eq!(result.data.brand.business_type, BusinessType::Spa);
    for field in ["logo", "heroImage", "galleryImages", "testimonials"] {
        assert!(
            result.meta.missing_fields.contains(&field.to_string()),
            "{field} should be missing"
        );
    }
    let services: Vec<_> = result
        .data
        .services
        .items
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert!(services.contains(&"Massages"));
    assert!(services.contains(&"Facials"));
    assert!(result.data.gallery.images.is_empty());
    assert!(!result.meta.sources.scraped);
    assert!(result.meta.sources.llm);
    assert!(result.meta.sources.ai_generated);
    assert!(!result.warnings.contains(&FALLBACK_WARNING.to_string()));
    assert!(result.warnings.contains(&LOW_CONFIDENCE_WARNING.to_string()));
    assert!(!result.data.hero.headline.is_empty());
    assert!(result
        .data
        .cta
        .form_fields
        .iter()
        .any(|f| f.name == "preferredDate"));
}

#[tokio::test]
async fn test_scraped_and_text_sources_merge() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FixedScraper(bakery_record())))
        .with_extractor(Arc::new(LLMExtractor::new(Arc::new(
            MockProvider::new().with_response(
                r#"{"businessName":"Crumb and Company","services":["sourdough","Wedding Cakes"]}"#,
            ),
        ))))
        .with_content_generator(ContentGenerator::fallback_only());

    let input = PipelineInput::from_url("https://crumb.example").with_voice("We bake bread.");
    let result = pipeline.generate_landing_page(input).await;

    assert_eq!(result.data.brand.name, "Crumb and Company");
    assert_eq!(result.data.brand.logo.as_deref(), Some("https://crumb.example/logo.png"));
    assert!(result.meta.sources.scraped);
    assert!(result.meta.sources.llm);
    let services: Vec<_> = result
        .data
        .services
        .items
        .iter()
        .map(|s| s.name.to_lowercase())
        .collect();
    assert_eq!(
        services.iter().filter(|s| s.as_str() == "sourdough").count(),
        1
    );
    assert!(services.contains(&"wedding cakes".to_string()));
}

#[tokio::test]
async fn test_degrade_policy_keeps_surviving_source() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FailingScraper))
        .with_extractor(luna_spa_extractor())
        .with_content_generator(ContentGenerator::fallback_only())
        .with_failure_policy(SourceFailurePolicy::Degrade);

    let input = PipelineInput::from_text("Luna Spa, massages and facials.")
        .with_url("https://luna-spa.example");
    let result = pipeline.generate_landing_page(input).await;

    assert_eq!(result.data.brand.name, "Luna Spa");
    assert!(!result.meta.sources.scraped);
    assert!(result.meta.sources.llm);
    assert!(!result.warnings.contains(&FALLBACK_WARNING.to_string()));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.starts_with("Website scraping failed")));
}

#[tokio::test]
async fn test_fallback_policy_abandons_on_any_failure() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FailingScraper))
        .with_extractor(luna_spa_extractor())
        .with_content_generator(ContentGenerator::fallback_only());

    let input = PipelineInput::from_text("Luna Spa, massages and facials.")
        .with_url("https://luna-spa.example");
    let result = pipeline.generate_landing_page(input).await;

    assert_eq!(result.data.brand.name, "luna-spa.example");
    assert_eq!(result.warnings, vec![FALLBACK_WARNING.to_string()]);
}

#[tokio::test]
async fn test_panicking_scraper_yields_fallback() {
    let pipeline = LandingPagePipeline::default().with_scraper(Arc::new(PanickingScraper));

    let result = pipeline
        .generate_landing_page(PipelineInput::from_url("https://crumb.example"))
        .await;

    assert_eq!(result.data.brand.name, "crumb.example");
    assert_eq!(result.warnings, vec![FALLBACK_WARNING.to_string()]);
}

#[tokio::test]
async fn test_text_without_extractor_is_ignored_with_warning() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FixedScraper(bakery_record())))
        .with_content_generator(ContentGenerator::fallback_only());

    let input = PipelineInput::from_url("https://crumb.example").with_voice("We bake bread.");
    let result = pipeline.generate_landing_page(input).await;

    assert_eq!(result.data.brand.name, "Crumb & Co");
    assert!(!result.meta.sources.llm);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.starts_with("Text extraction is not configured")));
}

#[tokio::test]
async fn test_empty_input_still_produces_a_page() {
    let result = LandingPagePipeline::default()
        .generate_landing_page(PipelineInput::default())
        .await;

    assert_eq!(result.data.brand.name, "Business Name");
    assert_eq!(result.meta.confidence, Confidence::Low);
    assert!(result.meta.generated_fields.contains(&"name".to_string()));
    assert!(!result.data.cta.form_fields.is_empty());
}

#[tokio::test]
async fn test_concurrent_runs_share_one_pipeline() {
    let pipeline = LandingPagePipeline::default()
        .with_scraper(Arc::new(FixedScraper(bakery_record())))
        .with_content_generator(ContentGenerator::fallback_only());

    let runs = (0..8).map(|i| {
        let pipeline = pipeline.clone();
        tokio::spawn(async move {
            let input = PipelineInput::from_url(format!("https://crumb.example/{i}"));
            pipeline.generate_landing_page(input).await
        })
    });

    for handle in futures::future::join_all(runs).await {
        let result = handle.unwrap();
        assert_eq!(result.data.brand.name, "Crumb & Co");
        assert!(result.meta.sources.scraped);
    }
}

#[tokio::test]
async fn test_result_serializes_camel_case() {
    let result = LandingPagePipeline::default()
        .with_extractor(luna_spa_extractor())
        .with_content_generator(ContentGenerator::fallback_only())
        .generate_landing_page(PipelineInput::from_text("Luna Spa"))
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["meta"]["missingFields"].is_array());
    assert!(json["meta"]["processingTimeMs"].is_u64());
    assert!(json["meta"]["sources"]["aiGenerated"].is_boolean());
    assert_eq!(json["data"]["brand"]["name"], "Luna Spa");
}
