use crate::config::ApiConfig;
use crate::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("tournament-notifier/", env!("CARGO_PKG_VERSION"));

/// Where a cycle gets its raw tournament listing from
#[async_trait]
pub trait TournamentSource: Send + Sync {
    /// Fetch the top-level key → record mapping
    async fn fetch(&self) -> Result<Map<String, Value>>;
}

/// Build the HTTP client shared by the fetcher and the webhook
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Fetches the tournament information page from the content API
pub struct TournamentFetcher {
    client: Client,
    url: String,
}

impl TournamentFetcher {
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self { client, url: config.url.clone() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TournamentSource for TournamentFetcher {
    async fn fetch(&self) -> Result<Map<String, Value>> {
        debug!("Fetching tournaments from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Status { endpoint: self.url.clone(), status });
        }

        let body: Value = response.json().await?;
        let entries = into_entries(body)?;

        info!("Fetched {} top-level entries", entries.len());
        Ok(entries)
    }
}

/// The API answers with a JSON object; anything else aborts the cycle
fn into_entries(body: Value) -> Result<Map<String, Value>> {
    match body {
        Value::Object(entries) => Ok(entries),
        Value::Null => Err(NotifierError::unexpected_payload("expected a JSON object, got null")),
        Value::Bool(_) => Err(NotifierError::unexpected_payload("expected a JSON object, got a boolean")),
        Value::Number(_) => Err(NotifierError::unexpected_payload("expected a JSON object, got a number")),
        Value::String(_) => Err(NotifierError::unexpected_payload("expected a JSON object, got a string")),
        Value::Array(_) => Err(NotifierError::unexpected_payload("expected a JSON object, got an array")),
    }
}
