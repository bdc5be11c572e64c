//! Dgraph backend over the HTTP `/alter` endpoint.

use log::{debug, trace};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use crate::config::StoreConfig;

use super::{SchemaStore, StoreError};

/// A Dgraph alpha reached over HTTP.
///
/// # Examples
///
/// ```rust,no_run
/// use cimgraph::config::StoreConfig;
/// use cimgraph::store::{apply_schema, dgraph::DgraphStore};
///
/// let config = StoreConfig::new("http://localhost:8080", 30);
/// let mut store = DgraphStore::new(&config).expect("Failed to build client");
/// apply_schema(&mut store, "<rdf.about>: string .\n").expect("Failed to apply");
/// ```
#[derive(Debug, Clone)]
pub struct DgraphStore {
    client: Client,
    alter_url: String,
}

impl DgraphStore {
    /// Creates a store client for the configured endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let alter_url = format!("{}/alter", config.url().trim_end_matches('/'));
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| StoreError::Transport {
                url: alter_url.clone(),
                source,
            })?;

        Ok(Self { client, alter_url })
    }

    /// Returns the full URL of the alteration endpoint.
    pub fn alter_url(&self) -> &str {
        &self.alter_url
    }

    fn send(&self, request: RequestBuilder) -> Result<(), StoreError> {
        let transport = |source| StoreError::Transport {
            url: self.alter_url.clone(),
            source,
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        trace!(status = status.as_u16(), body = body; "Alter response");

        check_response(status.is_success(), status.as_u16(), &body)
    }
}

impl SchemaStore for DgraphStore {
    fn drop_all(&mut self) -> Result<(), StoreError> {
        debug!(url = self.alter_url; "Sending drop_all");
        let request = self
            .client
            .post(&self.alter_url)
            .json(&json!({ "drop_all": true }));
        self.send(request)
    }

    fn alter(&mut self, schema: &str) -> Result<(), StoreError> {
        debug!(url = self.alter_url, bytes = schema.len(); "Sending schema alteration");
        let request = self
            .client
            .post(&self.alter_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(schema.to_string());
        self.send(request)
    }
}

/// Body of an `/alter` response. Only the error list matters.
#[derive(Debug, Default, Deserialize)]
struct AlterResponse {
    #[serde(default)]
    errors: Vec<AlterError>,
}

#[derive(Debug, Deserialize)]
struct AlterError {
    message: String,
}

/// Classify an `/alter` response.
///
/// An `errors` array in the body is a rejection regardless of the status code.
fn check_response(success: bool, status: u16, body: &str) -> Result<(), StoreError> {
    let response: AlterResponse = serde_json::from_str(body).unwrap_or_default();

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(StoreError::Rejected(messages.join("; ")));
    }

    if !success {
        return Err(StoreError::Status {
            status,
            body: body.to_string(),
        });
    }

    Ok(())
}
