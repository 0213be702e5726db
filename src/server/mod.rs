//! HTTP surface for the itinerary endpoint (axum).
//!
//! Routes:
//! - `/api/local-living-itinerary`: every method, through the request gate
//! - `GET /healthz`: liveness probe
//!
//! Every response, extractor rejections included, carries the CORS headers.
//!
//! **Public API**: [`router`], [`run_serve`], [`run_serve_on_listener`].

mod cors;
mod gate;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::Config, core::ItineraryComposer, error::Result};

pub const ITINERARY_PATH: &str = "/api/local-living-itinerary";

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub(crate) composer: Arc<ItineraryComposer>,
    pub(crate) allowed_origin: HeaderValue,
}

impl AppState {
    pub fn new(composer: ItineraryComposer, allowed_origin: HeaderValue) -> Self {
        Self {
            composer: Arc::new(composer),
            allowed_origin,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.build_composer(),
            config.allowed_origin_header()?,
        ))
    }
}

#[derive(Serialize)]
struct Health {
    ok: bool,
    service: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/healthz",
            get(|| async {
                Json(Health {
                    ok: true,
                    service: "local-living-itinerary",
                })
            }),
        )
        .route(ITINERARY_PATH, any(gate::itinerary))
        .layer(middleware::map_response_with_state(
            state.clone(),
            cors::with_cors,
        ))
        .with_state(state)
}

/// Serve on an already-bound listener. Tests bind `127.0.0.1:0` and pass it in.
pub async fn run_serve_on_listener(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("listening on http://{}{}", addr, ITINERARY_PATH);
    axum::serve(listener, router(state)).await
}

/// Bind `config.bind_addr` and serve until the process exits.
pub async fn run_serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    info!(
        model = %config.model,
        base_url = %config.base_url,
        allowed_origin = %config.allowed_origin,
        validate_schema = config.validate_schema,
        "starting itinerary server"
    );
    let listener = TcpListener::bind(config.bind_addr).await?;
    run_serve_on_listener(listener, state).await?;
    Ok(())
}
