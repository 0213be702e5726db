//! local-living-itinerary: a single HTTP endpoint that turns a free-text
//! Maldives travel request into a structured itinerary.
//!
//! The request gate validates the call, the duration heuristic reads a trip
//! length out of the text, and the composer renders the concierge prompt and
//! relays one completion from an OpenAI-compatible provider as JSON.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use local_living_itinerary::{server, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     server::run_serve(&config).await
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::Config;
pub use self::core::{
    detect_days, render_prompt, IncomingRequest, ItineraryComposer, ItineraryParameters,
};
pub use error::{ItineraryError, Result};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use server::{router, AppState};
pub use services::{ChatCompletionRequest, CompletionProvider, OpenAIClient};
pub use types::Itinerary;

#[cfg(feature = "cli")]
pub mod cli;
