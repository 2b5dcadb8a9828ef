//! Integration tests for the Gemini insight client
//!
//! The API is served by a local wiremock server; no network access needed.

mod common;

use common::{api_responses, sample_input, ENGINE};
use marketplace_pricing::insight::{EMPTY_RESPONSE_MESSAGE, GENERATOR_ERROR_MESSAGE};
use marketplace_pricing::{
    generate_insight, CalculationMode, GeminiClient, InsightGenerator, InsightSnapshot, PricingError,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.0-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn snapshot() -> InsightSnapshot {
    let input = sample_input();
    let results = ENGINE.calculate_all(&input, CalculationMode::MarginTarget);
    InsightSnapshot::new(input, CalculationMode::MarginTarget, results)
}

#[tokio::test]
async fn test_generate_joins_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("Target margin: 30,00%"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(api_responses::GENERATED, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), "test-key", MODEL).expect("Failed to create client");
    let report = generate_insight(&client, &snapshot()).await;

    assert!(report.generated);
    assert_eq!(report.text, "### Verdict\nAmazon leaves the **highest profit**.");
}

#[tokio::test]
async fn test_no_candidates_is_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(api_responses::NO_CANDIDATES, "application/json"),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), "test-key", MODEL).unwrap();

    let text = client.generate("prompt").await.unwrap();
    assert!(text.is_empty());

    let report = generate_insight(&client, &snapshot()).await;
    assert!(!report.generated);
    assert_eq!(report.text, EMPTY_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), "bad-key", MODEL).unwrap();

    let err = client.generate("prompt").await.unwrap_err();
    match err {
        PricingError::InvalidResponse(message) => {
            assert!(message.contains("403"), "{}", message);
            assert!(message.contains("API key not valid"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let report = generate_insight(&client, &snapshot()).await;
    assert!(!report.generated);
    assert_eq!(report.text, GENERATOR_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_failure_leaves_results_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snapshot = snapshot();
    let before = snapshot.results.clone();

    let client = GeminiClient::new(&server.uri(), "test-key", MODEL).unwrap();
    let _ = generate_insight(&client, &snapshot).await;

    assert_eq!(snapshot.results, before);
    assert_eq!(
        snapshot.results,
        ENGINE.calculate_all(&sample_input(), CalculationMode::MarginTarget)
    );
}
