//! Locating and reading the TOML configuration file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use cimgraph::{CimGraphError, config::AppConfig};

/// Local configuration path, relative to the working directory.
const LOCAL_CONFIG: &str = "config/config.toml";

/// Errors locating or reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<ConfigError> for CimGraphError {
    fn from(err: ConfigError) -> Self {
        CimGraphError::Config(err.to_string())
    }
}

/// Load the application configuration.
///
/// An explicit path must exist. Without one, `config/config.toml` in the
/// working directory wins over the platform config directory; with neither
/// present the defaults apply.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CimGraphError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Using configuration file");
        return load_config_file(path);
    }

    match discover_config() {
        Some(path) => {
            info!(path = path.display().to_string(); "Using discovered configuration file");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn discover_config() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    let system = ProjectDirs::from("org", "cimgraph", "cimgraph")?
        .config_dir()
        .join("config.toml");
    if system.exists() {
        Some(system)
    } else {
        debug!(path = system.display().to_string(); "No system configuration file");
        None
    }
}

fn load_config_file(path: &Path) -> Result<AppConfig, CimGraphError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cimgraph::profile::ResolvePolicy;

    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[store]
url = "http://dgraph:8080"
timeout_secs = 5

[output]
schema_dump = "out/schema.txt"
profile_dump = "out/output.txt"

[schema]
identity_predicate = "cim.mRID"
index_identity = true

[resolve]
policy = "strict"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.store().url(), "http://dgraph:8080");
        assert_eq!(config.store().timeout(), Duration::from_secs(5));
        assert_eq!(config.output().schema_dump(), &PathBuf::from("out/schema.txt"));
        assert_eq!(config.schema().identity_predicate(), "cim.mRID");
        assert!(config.schema().index_identity());
        assert_eq!(config.resolve().policy(), ResolvePolicy::Strict);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store]\nurl = \"http://other:9080\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.store().url(), "http://other:9080");
        assert_eq!(config.store().timeout(), Duration::from_secs(30));
        assert_eq!(config.schema().identity_predicate(), "rdf.about");
        assert_eq!(config.resolve().policy(), ResolvePolicy::Lenient);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CimGraphError::Config(ref msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_policy_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[resolve]\npolicy = \"sloppy\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }
}
