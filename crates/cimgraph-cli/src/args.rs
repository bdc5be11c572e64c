//! Command-line argument definitions for the cimgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file, the store
//! URL and logging verbosity; the [`Command`] selects the operation.

use clap::{Parser, Subcommand};

/// Command-line arguments for the cimgraph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Dgraph URL, overriding the configured one
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations of the cimgraph tool
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the graph schema from an XMI model
    #[command(alias = "s")]
    Create {
        /// Path to the XMI document
        #[arg(default_value = "./data/schema.xmi")]
        schemapath: String,

        /// Write the dumps without contacting the store
        #[arg(long)]
        dry_run: bool,
    },

    /// Import data into the graph store
    #[command(alias = "i")]
    Import {
        /// Directory to import from
        #[arg(default_value = "./data/")]
        importpath: String,
    },

    /// Export data from the graph store
    #[command(alias = "e")]
    Export {
        /// Directory to export to
        #[arg(default_value = "./data/")]
        exportpath: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let args = Args::try_parse_from(["cimgraph", "create"]).unwrap();

        assert_eq!(
            args.command,
            Command::Create {
                schemapath: "./data/schema.xmi".to_string(),
                dry_run: false,
            }
        );
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }

    #[test]
    fn test_aliases_and_global_flags() {
        let args = Args::try_parse_from([
            "cimgraph", "s", "model.xmi", "--dry-run", "-u", "http://dgraph:8080",
        ])
        .unwrap();

        assert_eq!(args.url.as_deref(), Some("http://dgraph:8080"));
        assert!(matches!(args.command, Command::Create { dry_run: true, .. }));

        let args = Args::try_parse_from(["cimgraph", "-c", "cfg.toml", "i"]).unwrap();
        assert_eq!(args.config.as_deref(), Some("cfg.toml"));
        assert_eq!(
            args.command,
            Command::Import {
                importpath: "./data/".to_string()
            }
        );

        let args = Args::try_parse_from(["cimgraph", "e", "out/"]).unwrap();
        assert_eq!(
            args.command,
            Command::Export {
                exportpath: "out/".to_string()
            }
        );
    }

    #[test]
    fn test_command_required() {
        assert!(Args::try_parse_from(["cimgraph"]).is_err());
    }
}
