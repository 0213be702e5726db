use axum::{
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue,
    },
    response::Response,
};

use super::AppState;

/// Cross-origin headers attached to every itinerary response.
pub(crate) fn cors_headers(allowed_origin: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

/// Response layer: runs after the handler and after any extractor rejection.
pub(crate) async fn with_cors(State(state): State<AppState>, mut response: Response) -> Response {
    response
        .headers_mut()
        .extend(cors_headers(&state.allowed_origin));
    response
}
