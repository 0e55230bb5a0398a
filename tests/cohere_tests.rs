use pagesmith::{
    generate_fallback_content, BusinessType, CohereConfig, CohereProvider, CompletionRequest,
    ContentContext, ContentField, ContentGenerator, LLMExtractor, LLMProvider, PipelineError,
    TextExtractor,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "test-key-0123456789abcdef";

fn provider_for(server: &MockServer) -> CohereProvider {
    let config = CohereConfig::new(TEST_KEY)
        .unwrap()
        .with_endpoint(format!("{}/v1/generate", server.uri()))
        .with_timeout_secs(5);
    CohereProvider::new(config).unwrap()
}

fn generation(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "gen-1",
        "generations": [{ "id": "g-1", "text": text }]
    }))
}

fn cafe_context() -> ContentContext {
    ContentContext {
        name: "Bean There".into(),
        business_type: BusinessType::Cafe,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_cohere_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/generate"))
        .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "command",
            "max_tokens": 200,
            "stop_sequences": ["--END--"]
        })))
        .respond_with(generation("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider_for(&server)
        .complete(CompletionRequest::new("Say hello").with_max_tokens(200))
        .await
        .unwrap();
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn test_cohere_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(CompletionRequest::new("anything"))
        .await
        .unwrap_err();
    match err {
        PipelineError::ExternalServiceError { service, message } => {
            assert_eq!(service, "Cohere");
            assert!(message.contains("429"));
            assert!(message.contains("slow down"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_cohere_empty_generations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generations": [] })))
        .mount(&server)
        .await;

    let result = provider_for(&server)
        .complete(CompletionRequest::new("anything"))
        .await;
    assert!(matches!(
        result,
        Err(PipelineError::ExternalServiceError { .. })
    ));
}

#[tokio::test]
async fn test_generator_uses_llm_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(generation(
            "Here you go:\n{\"headline\": \"Coffee worth the detour\", \"tagline\": \"Roasted down the street\", \"features\": [\"ignored\"]}\n--END--",
        ))
        .mount(&server)
        .await;

    let generator = ContentGenerator::new(Some(Arc::new(provider_for(&server))));
    let fields = [
        ContentField::Headline,
        ContentField::Tagline,
        ContentField::CtaText,
    ];
    let content = generator
        .generate_missing_content(&cafe_context(), &fields)
        .await;

    assert_eq!(content.headline.as_deref(), Some("Coffee worth the detour"));
    assert_eq!(content.tagline.as_deref(), Some("Roasted down the street"));
    // Not requested, so dropped.
    assert!(content.features.is_none());
    // Omitted by the model, so taken from the template.
    let fallback = generate_fallback_content(&cafe_context(), &[ContentField::CtaText]);
    assert_eq!(content.cta_text, fallback.cta_text);
}

#[tokio::test]
async fn test_generator_falls_back_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let generator = ContentGenerator::new(Some(Arc::new(provider_for(&server))));
    let fields = [ContentField::Headline, ContentField::Services];
    let content = generator
        .generate_missing_content(&cafe_context(), &fields)
        .await;

    assert_eq!(content, generate_fallback_content(&cafe_context(), &fields));
}

#[tokio::test]
async fn test_generator_falls_back_on_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(generation("{\"headline\": \"unterminated"))
        .mount(&server)
        .await;

    let generator = ContentGenerator::new(Some(Arc::new(provider_for(&server))));
    let fields = [ContentField::AboutText];
    let content = generator
        .generate_missing_content(&cafe_context(), &fields)
        .await;

    assert_eq!(content, generate_fallback_content(&cafe_context(), &fields));
    assert!(content.about_text.is_some());
}

#[tokio::test]
async fn test_extractor_over_cohere() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(generation(
            "```json\n{\"businessName\": \"Luna Spa\", \"businessType\": \"spa\", \"services\": [\"Massages\", \"Facials\"]}\n```",
        ))
        .mount(&server)
        .await;

    let extractor = LLMExtractor::new(Arc::new(provider_for(&server)));
    let record = extractor
        .extract_from_text("Luna Spa does massages and facials.")
        .await
        .unwrap();

    assert_eq!(record.business_name.as_deref(), Some("Luna Spa"));
    assert_eq!(record.business_type, Some(BusinessType::Spa));
    assert_eq!(record.services, vec!["Massages".to_string(), "Facials".to_string()]);
}

#[tokio::test]
async fn test_extractor_surfaces_unparseable_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(generation("I could not find any business here."))
        .mount(&server)
        .await;

    let extractor = LLMExtractor::new(Arc::new(provider_for(&server)));
    let result = extractor.extract_from_text("hmm").await;
    assert!(matches!(result, Err(PipelineError::ParseError(_))));
}
