//! cimgraph - Derive Dgraph schemas from CIM UML profiles.
//!
//! Reads a UML model exported as XMI, flattens its class hierarchy into a CIM
//! profile, derives a graph schema from it, and applies that schema to a
//! Dgraph store.

pub mod config;
pub mod render;
pub mod store;

mod derive;
mod error;

pub use cimgraph_core::{profile, schema};

pub use derive::derive_schema;
pub use error::CimGraphError;

use std::path::Path;

use log::{debug, info, trace};

use cimgraph_core::{profile::CimProfile, schema::Schema};

use config::AppConfig;
use store::{SchemaStore, dgraph::DgraphStore};

/// Builder for turning XMI documents into applied graph schemas.
///
/// This provides an API for processing a model through parsing, schema
/// derivation, rendering and application.
///
/// # Examples
///
/// ```rust,no_run
/// use cimgraph::{SchemaBuilder, config::AppConfig};
///
/// let builder = SchemaBuilder::new(AppConfig::default());
///
/// // Parse and resolve the model
/// let profile = builder.parse_file("data/schema.xmi")
///     .expect("Failed to parse");
///
/// // Derive and render the schema
/// let schema = builder.derive(&profile);
/// let text = builder.render(&schema);
///
/// // Keep an audit trail, then replace the store's schema
/// builder.write_dumps(&profile, &text).expect("Failed to write dumps");
/// builder.apply(&text).expect("Failed to apply schema");
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    config: AppConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including store, output and resolution settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration of this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse an XMI file into a resolved profile.
    ///
    /// # Errors
    ///
    /// Returns `CimGraphError::Parse` if the file cannot be read, decoded, or
    /// resolved under the configured policy.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<CimProfile, CimGraphError> {
        let profile = cimgraph_parser::parse_file(path, self.config.resolve().policy())?;
        debug!(classes = profile.classes.len(); "Profile parsed successfully");
        trace!(profile:?; "Parsed profile");
        Ok(profile)
    }

    /// Parse in-memory XMI content into a resolved profile.
    ///
    /// # Errors
    ///
    /// Returns `CimGraphError::Parse` if the content cannot be decoded or resolved.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<CimProfile, CimGraphError> {
        let profile = cimgraph_parser::parse_bytes(bytes, self.config.resolve().policy())?;
        debug!(classes = profile.classes.len(); "Profile parsed successfully");
        Ok(profile)
    }

    /// Derive the graph schema of a resolved profile.
    pub fn derive(&self, profile: &CimProfile) -> Schema {
        info!(identity = self.config.schema().identity_predicate(); "Deriving schema");
        derive_schema(profile, self.config.schema())
    }

    /// Render a schema in the store's alteration syntax.
    pub fn render(&self, schema: &Schema) -> String {
        render::render_schema(schema)
    }

    /// Write the profile audit and the rendered schema to the configured dump paths.
    ///
    /// # Errors
    ///
    /// Returns `CimGraphError::Io` naming the file that could not be written.
    pub fn write_dumps(&self, profile: &CimProfile, schema_text: &str) -> Result<(), CimGraphError> {
        let output = self.config.output();

        let profile_dump = output.profile_dump();
        render::write_dump(profile_dump, &render::render_profile(profile))
            .map_err(|err| CimGraphError::io(profile_dump, err))?;

        let schema_dump = output.schema_dump();
        render::write_dump(schema_dump, schema_text)
            .map_err(|err| CimGraphError::io(schema_dump, err))?;

        Ok(())
    }

    /// Replace the schema of the configured Dgraph store.
    ///
    /// # Errors
    ///
    /// Returns `CimGraphError::Store` if the client cannot be built, the store is
    /// unreachable, or it rejects the wipe or the alteration.
    pub fn apply(&self, schema_text: &str) -> Result<(), CimGraphError> {
        info!(url = self.config.store().url(); "Connecting to store");
        let mut store = DgraphStore::new(self.config.store())?;
        self.apply_to(&mut store, schema_text)
    }

    /// Replace the schema of the given store.
    ///
    /// # Errors
    ///
    /// Returns `CimGraphError::Store` with the first error raised by the store.
    pub fn apply_to(
        &self,
        store: &mut impl SchemaStore,
        schema_text: &str,
    ) -> Result<(), CimGraphError> {
        store::apply_schema(store, schema_text)?;
        Ok(())
    }
}
