use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the itinerary service
#[derive(Error, Debug)]
pub enum ItineraryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing user_request")]
    MissingUserRequest,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion provider error: {0}")]
    Provider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ItineraryError>;

impl ItineraryError {
    /// Get the error code for structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ItineraryError::Config(_) => "CONFIG_ERROR",
            ItineraryError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ItineraryError::MissingUserRequest => "MISSING_USER_REQUEST",
            ItineraryError::Http(_) => "HTTP_ERROR",
            ItineraryError::Provider(_) => "PROVIDER_ERROR",
            ItineraryError::Serialization(_) => "SERIALIZATION_ERROR",
            ItineraryError::Validation(_) => "VALIDATION_ERROR",
            ItineraryError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// HTTP status this error maps to at the endpoint boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItineraryError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ItineraryError::MissingUserRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The underlying message, without the variant label
    pub fn details(&self) -> String {
        match self {
            ItineraryError::Config(message)
            | ItineraryError::Provider(message)
            | ItineraryError::Validation(message)
            | ItineraryError::Unknown(message) => message.clone(),
            ItineraryError::Http(err) => err.to_string(),
            ItineraryError::Serialization(err) => err.to_string(),
            ItineraryError::MethodNotAllowed | ItineraryError::MissingUserRequest => {
                self.to_string()
            }
        }
    }

    /// Convert to the JSON body returned to the caller.
    ///
    /// Client errors carry only their label; everything else collapses to the
    /// generic server error with the underlying message as `details`.
    pub fn to_error_payload(&self) -> serde_json::Value {
        match self {
            ItineraryError::MethodNotAllowed | ItineraryError::MissingUserRequest => {
                serde_json::json!({ "error": self.to_string() })
            }
            _ => serde_json::json!({
                "error": "Server error",
                "details": self.details()
            }),
        }
    }
}
