//! Configuration types for schema generation.
//!
//! This module provides configuration structures that control where the graph
//! store lives, where dump files are written, how the identity predicate looks,
//! and how strictly model references are resolved. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining all sections.
//! - [`StoreConfig`] - Graph store endpoint and request timeout.
//! - [`OutputConfig`] - Paths of the schema and profile dumps.
//! - [`SchemaConfig`] - Identity predicate name and index.
//! - [`ResolveConfig`] - The [`ResolvePolicy`] used while resolving the model.
//!
//! # Example
//!
//! ```
//! # use cimgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.store().url(), "http://localhost:8080");
//! assert_eq!(config.schema().identity_predicate(), "rdf.about");
//! ```

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

use cimgraph_core::{profile::ResolvePolicy, schema::DEFAULT_IDENTITY_PREDICATE};

const DEFAULT_STORE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SCHEMA_DUMP: &str = "data/schema.txt";
const DEFAULT_PROFILE_DUMP: &str = "data/output.txt";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph store section.
    #[serde(default)]
    store: StoreConfig,

    /// Dump file section.
    #[serde(default)]
    output: OutputConfig,

    /// Schema derivation section.
    #[serde(default)]
    schema: SchemaConfig,

    /// Reference resolution section.
    #[serde(default)]
    resolve: ResolveConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        store: StoreConfig,
        output: OutputConfig,
        schema: SchemaConfig,
        resolve: ResolveConfig,
    ) -> Self {
        Self {
            store,
            output,
            schema,
            resolve,
        }
    }

    /// Returns the configuration with the store URL replaced.
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store.url = url.into();
        self
    }

    /// Returns the store configuration.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the schema configuration.
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Returns the resolution configuration.
    pub fn resolve(&self) -> &ResolveConfig {
        &self.resolve
    }
}

/// Graph store endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the Dgraph HTTP endpoint.
    #[serde(default = "default_store_url")]
    url: String,

    /// Timeout of a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl StoreConfig {
    /// Creates a new [`StoreConfig`].
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the store, without the `/alter` path.
    /// * `timeout_secs` - Request timeout in seconds.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url: url.into(),
            timeout_secs,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_URL, DEFAULT_TIMEOUT_SECS)
    }
}

/// Paths of the dump files written by a run.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Schema dump, in the store's alteration syntax.
    #[serde(default = "default_schema_dump")]
    schema_dump: PathBuf,

    /// Human-readable audit of the resolved profile.
    #[serde(default = "default_profile_dump")]
    profile_dump: PathBuf,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(schema_dump: impl Into<PathBuf>, profile_dump: impl Into<PathBuf>) -> Self {
        Self {
            schema_dump: schema_dump.into(),
            profile_dump: profile_dump.into(),
        }
    }

    pub fn schema_dump(&self) -> &PathBuf {
        &self.schema_dump
    }

    pub fn profile_dump(&self) -> &PathBuf {
        &self.profile_dump
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA_DUMP, DEFAULT_PROFILE_DUMP)
    }
}

/// Settings of the derived schema.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Name of the string predicate every node type carries.
    #[serde(default = "default_identity_predicate")]
    identity_predicate: String,

    /// Whether the identity predicate gets an exact-match index.
    #[serde(default)]
    index_identity: bool,
}

impl SchemaConfig {
    /// Creates a new [`SchemaConfig`].
    pub fn new(identity_predicate: impl Into<String>, index_identity: bool) -> Self {
        Self {
            identity_predicate: identity_predicate.into(),
            index_identity,
        }
    }

    pub fn identity_predicate(&self) -> &str {
        &self.identity_predicate
    }

    pub fn index_identity(&self) -> bool {
        self.index_identity
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_PREDICATE, false)
    }
}

/// Reference resolution settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    policy: ResolvePolicy,
}

impl ResolveConfig {
    pub fn new(policy: ResolvePolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured [`ResolvePolicy`].
    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_schema_dump() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_DUMP)
}

fn default_profile_dump() -> PathBuf {
    PathBuf::from(DEFAULT_PROFILE_DUMP)
}

fn default_identity_predicate() -> String {
    DEFAULT_IDENTITY_PREDICATE.to_string()
}
