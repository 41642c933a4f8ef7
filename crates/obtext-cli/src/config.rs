//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use obtext::{ObtextError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ObtextError {
    fn from(err: ConfigError) -> Self {
        ObtextError::Io(io::Error::other(err.to_string()))
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (obtext/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ObtextError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("obtext/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "obtext", "obtext") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ObtextError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, ObtextError> {
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").expect("empty config is valid");

        assert_eq!(config.parser().max_depth(), obtext::DEFAULT_MAX_DEPTH);
        assert!(config.render().code_dir().is_none());
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [parser]
            max_depth = 16

            [render]
            code_dir = "snippets"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.parser().max_depth(), 16);
        assert_eq!(config.render().code_dir(), Some(Path::new("snippets")));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[parser]\nmax_depth = \"deep\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[parser]\nmax_depth = 8\n").expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert_eq!(config.parser().max_depth(), 8);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = load_config(Some(dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
