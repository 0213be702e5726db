//! Inbound request payload and the parameters derived from it.

use serde_json::{Map, Value};

use crate::{
    core::duration::detect_days,
    error::{ItineraryError, Result},
};

pub const DEFAULT_STYLE: &str = "Auto";

/// Fields read from the POST body. Both are optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    pub user_request: Option<String>,
    pub style_preference: Option<String>,
}

impl IncomingRequest {
    /// Parse a raw request body.
    ///
    /// A body that is a JSON string is decoded a second time. Anything that
    /// fails to parse, or is not an object, is read as an empty object.
    pub fn from_body(body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
        let parsed = match parsed {
            Value::String(inner) => serde_json::from_str::<Value>(&inner).unwrap_or(Value::Null),
            other => other,
        };

        match parsed {
            Value::Object(map) => Self::from_map(&map),
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            user_request: non_empty_str(map.get("user_request")),
            style_preference: non_empty_str(map.get("style_preference")),
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Per-request values the prompt is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryParameters {
    pub user_request: String,
    pub style: String,
    pub days: u32,
}

impl ItineraryParameters {
    pub fn new(user_request: impl Into<String>, style: Option<String>) -> Self {
        let user_request = user_request.into();
        let days = detect_days(&user_request);
        Self {
            user_request,
            style: style
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            days,
        }
    }
}

impl TryFrom<IncomingRequest> for ItineraryParameters {
    type Error = ItineraryError;

    fn try_from(request: IncomingRequest) -> Result<Self> {
        let user_request = request
            .user_request
            .ok_or(ItineraryError::MissingUserRequest)?;
        Ok(Self::new(user_request, request.style_preference))
    }
}
