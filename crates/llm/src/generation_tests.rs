use std::sync::Arc;

use sitepilot_core::{QuestionType, WebsiteInfo};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::LlmClient;
use crate::suggestions::{SuggestionContext, SuggestionGenerator};

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "content": content,
                "role": "assistant"
            }
        }]
    })
}

fn test_generator(server: &MockServer) -> SuggestionGenerator {
    let client = LlmClient::new("test-key".to_owned(), server.uri())
        .unwrap()
        .with_model("test-model".to_owned());
    SuggestionGenerator::new(Arc::new(client))
}

fn test_context() -> SuggestionContext {
    SuggestionContext {
        url: "https://example.com".to_owned(),
        website_info: Some(WebsiteInfo {
            title: "Example Shop".to_owned(),
            description: "An online shop".to_owned(),
            meta_description: None,
            main_headings: vec!["Welcome".to_owned()],
            main_content: "We sell things".to_owned(),
        }),
    }
}

#[tokio::test]
async fn full_batch_is_returned_in_original_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Fast checkout\nFree shipping\nEasy returns")),
        )
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Benefits, &test_context()).await;
    assert_eq!(batch, vec!["Fast checkout", "Free shipping", "Easy returns"]);
}

#[tokio::test]
async fn partial_batch_is_discarded_entirely() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("Only one\nAnd two")),
        )
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Audience, &test_context()).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn competitors_obey_the_same_all_or_nothing_rule() {
    let server = MockServer::start().await;
    // "Alpha Inc." is filtered for its period, leaving 2 of 3 lines.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Alpha Inc.\nBeta Corp\nGamma LLC")),
        )
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Competitors, &test_context()).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn competitor_calls_use_the_tight_token_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"max_tokens": 50, "temperature": 0.5})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Shopify\nBigCommerce\nWooCommerce")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Competitors, &test_context()).await;
    assert_eq!(batch, vec!["Shopify", "BigCommerce", "WooCommerce"]);
}

#[tokio::test]
async fn server_error_degrades_to_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Keywords, &test_context()).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn malformed_body_degrades_to_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Objections, &test_context()).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn empty_choices_degrade_to_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let batch = test_generator(&server).generate(QuestionType::Benefits, &test_context()).await;
    assert!(batch.is_empty());
}

#[tokio::test]
async fn describe_website_returns_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"temperature": 0.7, "max_tokens": 100})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("An online shop selling things.")),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new("test-key".to_owned(), server.uri())
        .unwrap()
        .with_model("test-model".to_owned());
    let ctx = test_context();
    let description =
        client.describe_website(&ctx.url, ctx.website_info.as_ref().unwrap()).await.unwrap();
    assert_eq!(description, "An online shop selling things.");
}

#[tokio::test]
async fn describe_website_surfaces_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = LlmClient::new("test-key".to_owned(), server.uri())
        .unwrap()
        .with_model("test-model".to_owned());
    let ctx = test_context();
    let err = client.describe_website(&ctx.url, ctx.website_info.as_ref().unwrap()).await;
    assert!(err.is_err());
}
