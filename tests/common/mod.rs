//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::HeaderValue;
use local_living_itinerary::{
    server::{self, ITINERARY_PATH},
    AppState, ChatCompletionRequest, CompletionProvider, ItineraryComposer, ItineraryError,
    Result,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug)]
enum Reply {
    Content(String),
    Fail(String),
}

/// Stub provider that records every request body and answers from a script.
#[derive(Debug)]
pub struct RecordingProvider {
    reply: Reply,
    requests: Mutex<Vec<Value>>,
}

impl RecordingProvider {
    /// Answer with `itinerary` serialized as the assistant message content
    pub fn returning(itinerary: Value) -> Arc<Self> {
        Self::returning_text(itinerary.to_string())
    }

    pub fn returning_text(content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Content(content.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of the `n`th recorded request
    pub fn prompt(&self, n: usize) -> String {
        self.requests()[n]["messages"][0]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.to_value());
        match &self.reply {
            Reply::Content(content) => Ok(json!({
                "id": "chatcmpl-test",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            })),
            Reply::Fail(message) => Err(ItineraryError::Provider(message.clone())),
        }
    }
}

/// Bind to a random port and serve `composer` with the given origin.
/// Returns the itinerary endpoint URL.
pub async fn spawn_server_with_origin(composer: ItineraryComposer, origin: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(composer, HeaderValue::from_static(origin));
    tokio::spawn(server::run_serve_on_listener(listener, state));
    format!("http://{}{}", addr, ITINERARY_PATH)
}

pub async fn spawn_server(provider: Arc<RecordingProvider>) -> String {
    spawn_server_with_origin(ItineraryComposer::new(provider), "*").await
}

pub fn sample_itinerary() -> Value {
    json!({
        "title": "Five slow days on Maafushi",
        "trip_length_days": 5,
        "style_used": "Budget",
        "hotel_name": "Arora Inn",
        "island": "Maafushi",
        "price_level": "$",
        "days": [
            {"title": "Day 1", "desc": "Public ferry from Male, harbour walk at dusk."},
            {"title": "Day 2", "desc": "Slow Local Living day: bakery, mosque, fishing jetty."}
        ],
        "recommended_activities": [
            {"name": "Sandbank picnic", "why": "Cheap half-day trip with locals."}
        ],
        "signature_experiences": [
            {"title": "Tuna market morning", "desc": "Follow the catch from boat to kitchen."}
        ],
        "estimated_cost": {
            "currency": "USD",
            "approx_total_per_person": 480,
            "breakdown": [{"label": "Guesthouse", "amount": "$240"}],
            "notes": "Ferries skip Fridays."
        },
        "transfers": [
            {"day": "Day 1", "mode": "Public ferry", "route": "Male → Maafushi", "details": "1.5h"}
        ],
        "map_query": "Maafushi Maldives"
    })
}
