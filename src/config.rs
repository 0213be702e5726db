use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::http::HeaderValue;

use crate::{
    core::composer::ItineraryComposer,
    error::{ItineraryError, Result},
    services::openai_client::OpenAIClient,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Service configuration, built once at startup and injected everywhere else.
#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the completion provider
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier sent with every completion request
    pub model: String,
    /// Value of `Access-Control-Allow-Origin` on every response
    pub allowed_origin: String,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Outbound request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    /// Check provider output against the itinerary JSON schema
    pub validate_schema: bool,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000))),
            timeout: None,
            validate_schema: false,
        }
    }

    /// Load `.env` and read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ItineraryError::Config(
                    "OPENAI_API_KEY environment variable must be set".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(origin) = lookup("ALLOWED_ORIGIN") {
            config.allowed_origin = origin;
        }

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = parse_bind_addr(&addr)?;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| ItineraryError::Config(format!("Invalid PORT value: {port}")))?;
            config.bind_addr = SocketAddr::from(([0, 0, 0, 0], port));
        }

        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ItineraryError::Config(format!("Invalid REQUEST_TIMEOUT_SECS value: {secs}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(flag) = lookup("VALIDATE_ITINERARY") {
            config.validate_schema = parse_flag(&flag);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ItineraryError::Config("API key is required".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(ItineraryError::Config("Model identifier is required".to_string()));
        }

        self.allowed_origin_header()?;
        Ok(())
    }

    pub fn allowed_origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.allowed_origin).map_err(|_| {
            ItineraryError::Config(format!(
                "Allowed origin is not a valid header value: {}",
                self.allowed_origin
            ))
        })
    }

    /// Wire the HTTP completion client and composer described by this configuration.
    pub fn build_composer(&self) -> ItineraryComposer {
        let mut client = OpenAIClient::new(self.api_key.clone()).with_timeout(self.timeout);
        client.set_base_url(self.base_url.clone());

        ItineraryComposer::new(Arc::new(client))
            .with_model(self.model.clone())
            .with_schema_validation(self.validate_schema)
    }
}

pub fn parse_bind_addr(value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|_| ItineraryError::Config(format!("Invalid bind address: {value}")))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
