use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, warn};

use super::AppState;
use crate::{
    core::request::{IncomingRequest, ItineraryParameters},
    error::{ItineraryError, Result},
};

enum Reply {
    Preflight,
    Itinerary(Value),
}

/// Request gate for the itinerary endpoint. CORS headers are added by the router layer.
pub(crate) async fn itinerary(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    match handle(&state, &method, &body).await {
        Ok(Reply::Preflight) => StatusCode::OK.into_response(),
        Ok(Reply::Itinerary(itinerary)) => (StatusCode::OK, Json(itinerary)).into_response(),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(code = err.error_code(), "itinerary request failed: {}", err);
            } else {
                warn!(%method, code = err.error_code(), "rejected itinerary request");
            }
            (status, Json(err.to_error_payload())).into_response()
        }
    }
}

async fn handle(state: &AppState, method: &Method, body: &[u8]) -> Result<Reply> {
    if *method == Method::OPTIONS {
        return Ok(Reply::Preflight);
    }

    if *method != Method::POST {
        return Err(ItineraryError::MethodNotAllowed);
    }

    let params = ItineraryParameters::try_from(IncomingRequest::from_body(body))?;
    let itinerary = state.composer.compose(&params).await?;
    Ok(Reply::Itinerary(itinerary))
}
