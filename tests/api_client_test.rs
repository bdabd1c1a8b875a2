//! Integration tests for the Deckgen API client against a mock HTTP server
//!
//! Covers the gateway contract (credential header, fail-fast error handling),
//! the signed-URL upload/download round trip, and the async polling workflows.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deckgen_client::types::{
    CreateTemplateRequest, DeckRequest, DeckSlide, GenerateSlideRequest, OperationStatus,
    SlideData, TemplateMetadata,
};
use deckgen_client::{ClientError, DeckgenApiClient, DeckgenApiConfig, PollConfig};

const TEST_API_KEY: &str = "key_test_abc123";

fn test_client(server: &MockServer) -> DeckgenApiClient {
    DeckgenApiClient::new(DeckgenApiConfig {
        base_url: format!("{}/api/v1", server.uri()),
        api_key: TEST_API_KEY.to_string(),
        ..Default::default()
    })
    .expect("client creation failed")
}

fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig::new(Duration::from_millis(10), max_attempts)
}

fn deck_request() -> DeckRequest {
    DeckRequest {
        slides: vec![DeckSlide {
            template_slide_id: "slide_1".to_string(),
            slide_data: SlideData {
                title: Some("Quarterly Review".to_string()),
                ..Default::default()
            },
            options: None,
        }],
        options: None,
    }
}

#[tokio::test]
async fn create_template_sends_credential_and_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/templates"))
        .and(header("X-API-Key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template_id": "tmpl_abc123xyz",
            "upload_url": format!("{}/storage/tmpl_abc123xyz", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let created = client
        .create_template(&CreateTemplateRequest {
            filename: "quarterly.pptx".to_string(),
            file_size: 4096,
            metadata: TemplateMetadata::default(),
        })
        .await
        .unwrap();

    assert_eq!(created.template_id, "tmpl_abc123xyz");
    assert!(created.upload_url.ends_with("/storage/tmpl_abc123xyz"));
}

#[tokio::test]
async fn client_error_surfaces_as_api_error_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/templates"))
        .respond_with(ResponseTemplate::new(403).set_body_string("organization mismatch"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.list_templates().await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("organization mismatch"));
        }
        other => panic!("expected API error, got {:?}", other),
    }

    // Fail fast: exactly one request reached the server
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn upload_handshake_transfers_bytes_unmodified_without_credential() {
    let server = MockServer::start().await;
    let template_bytes = b"PK\x03\x04 fake pptx payload for upload".to_vec();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let template_path = temp_dir.path().join("demo_template.pptx");
    std::fs::write(&template_path, &template_bytes).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template_id": "tmpl_1",
            "upload_url": format!("{}/storage/tmpl_1", server.uri()),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/storage/tmpl_1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/templates/tmpl_1/upload/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "validated"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let created = client
        .upload_template(&template_path, TemplateMetadata::default())
        .await
        .unwrap();
    assert_eq!(created.template_id, "tmpl_1");

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.url.path() == "/storage/tmpl_1")
        .expect("no storage upload request received");

    // Byte-identical transfer, and the signed URL gets no API credential
    assert_eq!(put.body, template_bytes);
    assert!(!put.headers.contains_key("x-api-key"));
}

#[tokio::test]
async fn download_round_trip_is_byte_identical() {
    let server = MockServer::start().await;
    let deck_bytes = b"PK\x03\x04 generated deck bytes".to_vec();

    Mock::given(method("GET"))
        .and(path("/api/v1/presentations/gen_42/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(deck_bytes.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let output_path = temp_dir.path().join("deck.pptx");

    let client = test_client(&server);
    let written = client.download_to_file("gen_42", &output_path).await.unwrap();

    assert_eq!(written, deck_bytes.len() as u64);
    assert_eq!(std::fs::read(&output_path).unwrap(), deck_bytes);
}

#[tokio::test]
async fn generate_slide_synchronous_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/presentations/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "pages_generated": 2,
            "download_url": "https://storage.example.com/slide.pptx"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .generate_slide(&GenerateSlideRequest {
            template_slide_id: "slide_1".to_string(),
            slide_data: SlideData {
                title: Some("API Demo Slide".to_string()),
                ..Default::default()
            },
            options: None,
        })
        .await
        .unwrap();

    assert_eq!(result.status, Some(OperationStatus::Completed));
    assert_eq!(result.pages_generated, 2);
    assert!(result.download_url.is_some());
}

#[tokio::test]
async fn deck_generation_polls_until_completed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/presentations/generate-deck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generation_id": "gen_42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // processing on the first two polls, completed on the third
    Mock::given(method("GET"))
        .and(path("/api/v1/presentations/gen_42/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processing",
            "progress": 50
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/presentations/gen_42/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total_pages_generated": 3,
            "slide_results": [
                {"slide_index": 0, "status": "completed", "pages_generated": 2},
                {"slide_index": 1, "status": "completed", "pages_generated": 1}
            ],
            "download_url": "https://storage.example.com/gen_42.pptx"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .generate_deck(&deck_request(), &fast_poll(5))
        .await
        .unwrap();

    assert_eq!(result.status, OperationStatus::Completed);
    assert_eq!(result.total_pages_generated, 3);
    assert_eq!(result.slide_results.len(), 2);

    let status_polls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/v1/presentations/gen_42/status")
        .count();
    assert_eq!(status_polls, 3);
}

#[tokio::test]
async fn deck_generation_times_out_after_attempt_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/presentations/generate-deck"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generation_id": "gen_9"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/presentations/gen_9/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processing"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .generate_deck(&deck_request(), &fast_poll(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout { .. }));

    // No additional request after the last attempt
    let status_polls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/v1/presentations/gen_9/status")
        .count();
    assert_eq!(status_polls, 2);
}

#[tokio::test]
async fn unassigned_slide_ids_fail_before_any_request() {
    let server = MockServer::start().await;

    let mut request = deck_request();
    request.slides[0].template_slide_id = String::new();

    let client = test_client(&server);
    let err = client
        .generate_deck(&request, &fast_poll(2))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn analyze_template_returns_discovered_slides() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/templates/tmpl_1/analysis"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/templates/tmpl_1/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "results": {
                "slides": [
                    {"slideId": "slide_1", "slideNumber": 1, "name": "Title Slide"},
                    {"slideId": "slide_2", "slideNumber": 2, "name": "Content with Table"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let analysis = client
        .analyze_template("tmpl_1", Default::default(), &fast_poll(5))
        .await
        .unwrap();

    assert_eq!(analysis.status, OperationStatus::Completed);
    let slides = analysis.slides();
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].slide_id, "slide_1");
    assert_eq!(slides[1].name.as_deref(), Some("Content with Table"));
}
