//! cimgraph CLI library
//!
//! This module contains the core CLI logic for the cimgraph tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};
pub use error_adapter::ErrorAdapter;

use log::{info, warn};

use cimgraph::{CimGraphError, SchemaBuilder};

/// Run the cimgraph CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CimGraphError` for:
/// - Configuration loading errors
/// - Reading, decoding or resolution errors of the XMI document
/// - Dump file write errors
/// - Store errors
pub fn run(args: &Args) -> Result<(), CimGraphError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(url) = &args.url {
        app_config = app_config.with_store_url(url);
    }

    match &args.command {
        Command::Create {
            schemapath,
            dry_run,
        } => create(SchemaBuilder::new(app_config), schemapath, *dry_run),
        Command::Import { importpath } => {
            warn!(
                path = importpath,
                url = app_config.store().url();
                "Import is not implemented"
            );
            Ok(())
        }
        Command::Export { exportpath } => {
            warn!(
                path = exportpath,
                url = app_config.store().url();
                "Export is not implemented"
            );
            Ok(())
        }
    }
}

/// Derive the schema of the model at `schemapath`, write the dumps, and apply
/// it unless `dry_run` is set.
///
/// Nothing reaches the store before the schema is fully derived and rendered.
fn create(builder: SchemaBuilder, schemapath: &str, dry_run: bool) -> Result<(), CimGraphError> {
    info!(
        path = schemapath,
        url = builder.config().store().url(),
        dry_run = dry_run;
        "Creating schema"
    );

    let profile = builder.parse_file(schemapath)?;
    let schema = builder.derive(&profile);
    let text = builder.render(&schema);
    info!(
        classes = profile.classes.len(),
        predicates = schema.predicate_count(),
        nodes = schema.node_count();
        "Schema rendered"
    );

    builder.write_dumps(&profile, &text)?;

    if dry_run {
        info!("Dry run, store not contacted");
        return Ok(());
    }

    builder.apply(&text)
}
