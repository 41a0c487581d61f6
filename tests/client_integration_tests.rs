use review_analyzer::api::{
    AnalysisClient, AnalysisRequest, ClientError, HttpAnalysisClient,
};
use review_analyzer::coordinator::analyze_once;
use review_analyzer::core::render::render;
use review_analyzer::core::state::{ANALYSIS_FAILED_MESSAGE, App, DisplayState, FormInput};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn sample_request() -> AnalysisRequest {
    AnalysisRequest {
        product_name: "Aurora Headphones".to_string(),
        review_text: "Comfortable for hours, but the case feels cheap.".to_string(),
    }
}

async fn mount_analysis(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/analyze-review"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Analyze
// ============================================================================

#[tokio::test]
async fn test_analyze_success_sends_both_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/analyze-review"))
        .and(body_json(json!({
            "product_name": "Aurora Headphones",
            "review_text": "Comfortable for hours, but the case feels cheap."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "product_name": "Aurora Headphones",
            "review_text": "Comfortable for hours, but the case feels cheap.",
            "sentiment": "POSITIVE",
            "key_points": "Comfortable for long sessions\nCase feels cheap",
            "created_at": "2024-03-02T10:15:00.000123"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let result = client.analyze(&sample_request()).await.unwrap();

    assert_eq!(result.sentiment, "POSITIVE");
    assert_eq!(result.id, Some(12));
    assert_eq!(
        render(&result).points,
        vec!["Comfortable for long sessions", "Case feels cheap"]
    );
}

#[tokio::test]
async fn test_analyze_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"sentiment": "NEUTRAL", "key_points": "Fine"})),
    )
    .await;

    let client = HttpAnalysisClient::new(format!("{}/", mock_server.uri()));
    let result = client.analyze(&sample_request()).await.unwrap();
    assert_eq!(result.sentiment, "NEUTRAL");
}

#[tokio::test]
async fn test_analyze_server_error_is_api_error() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let err = client.analyze(&sample_request()).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_analyze_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let err = client.analyze(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_analyze_missing_sentiment_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({"key_points": "Only points"})),
    )
    .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let err = client.analyze(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_analyze_missing_key_points_reads_as_empty() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({"sentiment": "NEGATIVE"})),
    )
    .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let result = client.analyze(&sample_request()).await.unwrap();
    assert_eq!(result.key_points, "");
    assert!(render(&result).points.is_empty());
}

#[tokio::test]
async fn test_analyze_unreachable_backend_is_network_error() {
    // Nothing listens on port 1
    let client = HttpAnalysisClient::new("http://127.0.0.1:1");
    let err = client.analyze(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {:?}", err);
}

// ============================================================================
// History and Health
// ============================================================================

#[tokio::test]
async fn test_list_reviews() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "product_name": "Kettle",
                "review_text": "Boils fast.",
                "sentiment": "POSITIVE",
                "key_points": "Boils fast",
                "created_at": "2024-03-02T10:15:00"
            },
            {
                "id": 1,
                "product_name": "Toaster",
                "review_text": "Burns everything.",
                "sentiment": "NEGATIVE",
                "key_points": null,
                "created_at": "2024-03-01T08:00:00"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let reviews = client.list_reviews().await.unwrap();

    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].product_name.as_deref(), Some("Kettle"));
    assert_eq!(reviews[1].key_points, "");
    assert_eq!(
        reviews[0].created_at_display().as_deref(),
        Some("2024-03-02 10:15")
    );
}

#[tokio::test]
async fn test_health_returns_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Review Analyzer API is running"})),
        )
        .mount(&mock_server)
        .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    assert_eq!(
        client.health().await.unwrap(),
        "Review Analyzer API is running"
    );
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_analyze_once_reaches_result_state() {
    let mock_server = MockServer::start().await;
    mount_analysis(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({
            "sentiment": "NEGATIVE",
            "key_points": "Arrived scratched\n\nSupport never replied"
        })),
    )
    .await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let mut app = App::new(mock_server.uri());

    let display = analyze_once(
        &mut app,
        &client,
        FormInput::new("Desk Lamp", "Arrived scratched and support never replied."),
    )
    .await;

    let payload = display.result().expect("expected Result state");
    let breakdown = render(payload);
    assert_eq!(breakdown.sentiment_label, "NEGATIVE");
    assert_eq!(
        breakdown.points,
        vec!["Arrived scratched", "Support never replied"]
    );
}

#[tokio::test]
async fn test_analyze_once_failure_reaches_error_state() {
    let mock_server = MockServer::start().await;
    mount_analysis(&mock_server, ResponseTemplate::new(503)).await;

    let client = HttpAnalysisClient::new(mock_server.uri());
    let mut app = App::new(mock_server.uri());

    let display = analyze_once(
        &mut app,
        &client,
        FormInput::new("Desk Lamp", "Bright enough."),
    )
    .await;

    assert_eq!(
        display,
        &DisplayState::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string()
        }
    );
    assert!(display.result().is_none());
}
