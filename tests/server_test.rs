mod common;

use common::{sample_itinerary, spawn_server, spawn_server_with_origin, RecordingProvider};
use local_living_itinerary::ItineraryComposer;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

fn assert_cors(response: &reqwest::Response, origin: &str) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], origin);
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_options_preflight() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider.clone()).await;

    let response = Client::new()
        .request(Method::OPTIONS, &url)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response, "*");
    assert!(response.text().await.unwrap().is_empty());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider.clone()).await;
    let client = Client::new();

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = client.request(method.clone(), &url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(&response, "*");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_missing_user_request() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider.clone()).await;
    let client = Client::new();

    let bodies = [
        "{}".to_string(),
        r#"{"user_request": ""}"#.to_string(),
        r#"{"style_preference": "Budget"}"#.to_string(),
        "{definitely not json".to_string(),
        String::new(),
    ];

    for body in bodies {
        let response = client.post(&url).body(body.clone()).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_cors(&response, "*");
        let payload: Value = response.json().await.unwrap();
        assert_eq!(payload, json!({"error": "Missing user_request"}));
    }

    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_post_relays_provider_json() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider.clone()).await;

    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": "5 day trip, budget"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response, "*");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, sample_itinerary());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "gpt-4o-mini");
    assert_eq!(requests[0]["temperature"], 0.4);
    assert_eq!(requests[0]["max_tokens"], 1200);
    assert_eq!(requests[0]["response_format"]["type"], "json_object");

    let prompt = provider.prompt(0);
    assert!(prompt.contains("\"5 day trip, budget\""));
    assert!(prompt.contains("\"trip_length_days\": 5,"));
    assert!(prompt.contains("USER STYLE PREFERENCE: \"Auto\""));
    assert!(prompt.contains("\"Auto\": infer from text or create a balanced Local Living trip."));
}

#[tokio::test]
async fn test_style_preference_reaches_prompt() {
    let provider = RecordingProvider::returning(json!({"title": "ok"}));
    let url = spawn_server(provider.clone()).await;

    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": "a 30 day dive trip", "style_preference": "Adventurous"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prompt = provider.prompt(0);
    assert!(prompt.contains("USER STYLE PREFERENCE: \"Adventurous\""));
    assert!(prompt.contains("\"trip_length_days\": 21,"));
}

#[tokio::test]
async fn test_string_encoded_body_matches_object_body() {
    let provider = RecordingProvider::returning(json!({"title": "ten days"}));
    let url = spawn_server(provider.clone()).await;
    let client = Client::new();

    let object = client
        .post(&url)
        .json(&json!({"user_request": "10 days"}))
        .send()
        .await
        .unwrap();
    let encoded = client
        .post(&url)
        .header("Content-Type", "text/plain")
        .body(json!(r#"{"user_request":"10 days"}"#).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(object.status(), StatusCode::OK);
    assert_eq!(encoded.status(), StatusCode::OK);
    let object_body: Value = object.json().await.unwrap();
    let encoded_body: Value = encoded.json().await.unwrap();
    assert_eq!(object_body, encoded_body);

    assert_eq!(provider.requests().len(), 2);
    assert_eq!(provider.prompt(0), provider.prompt(1));
    assert!(provider.prompt(1).contains("\"trip_length_days\": 10,"));
}

#[tokio::test]
async fn test_provider_failure_maps_to_server_error() {
    let provider = RecordingProvider::failing("upstream exploded");
    let url = spawn_server(provider.clone()).await;

    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": "7 days"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response, "*");
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Server error", "details": "upstream exploded"})
    );
}

#[tokio::test]
async fn test_malformed_provider_json_maps_to_server_error() {
    let provider = RecordingProvider::returning_text("Here is your trip! {");
    let url = spawn_server(provider.clone()).await;

    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": "7 days"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Server error");
    let parse_error = serde_json::from_str::<Value>("Here is your trip! {").unwrap_err();
    assert_eq!(body["details"], parse_error.to_string());
}

#[tokio::test]
async fn test_schema_validation_rejects_partial_itinerary() {
    let provider = RecordingProvider::returning(json!({"title": "only a title"}));
    let composer = ItineraryComposer::new(provider.clone()).with_schema_validation(true);
    let url = spawn_server_with_origin(composer, "*").await;

    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": "7 days"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("does not match `Itinerary` schema"));
}

#[tokio::test]
async fn test_configured_origin_on_every_path() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let composer = ItineraryComposer::new(provider);
    let url = spawn_server_with_origin(composer, "https://localliving.co").await;
    let client = Client::new();

    let preflight = client.request(Method::OPTIONS, &url).send().await.unwrap();
    assert_cors(&preflight, "https://localliving.co");

    let rejected = client.get(&url).send().await.unwrap();
    assert_cors(&rejected, "https://localliving.co");

    let accepted = client
        .post(&url)
        .json(&json!({"user_request": "5 days"}))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::OK);
    assert_cors(&accepted, "https://localliving.co");
}

#[tokio::test]
async fn test_oversized_body_rejection_keeps_cors() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider.clone()).await;

    let padding = "a".repeat(3 * 1024 * 1024);
    let response = Client::new()
        .post(&url)
        .json(&json!({"user_request": padding}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_cors(&response, "*");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_health_probe() {
    let provider = RecordingProvider::returning(sample_itinerary());
    let url = spawn_server(provider).await;
    let health_url = url.replace("/api/local-living-itinerary", "/healthz");

    let response = reqwest::get(&health_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response, "*");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"ok": true, "service": "local-living-itinerary"}));
}
