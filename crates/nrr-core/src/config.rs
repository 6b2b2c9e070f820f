// Configuration loading and parsing (config/nrr.toml).
//
// The file is optional: when it is missing every setting takes its default,
// which points the engine at the embedded seed table.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Upper bound on `league.max_overs`; one-day cricket is the longest format
/// the engine models.
const MAX_CONFIGURABLE_OVERS: u32 = 50;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub league: LeagueConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub name: String,
    /// CSV seed table. `None` uses the table embedded in the crate.
    pub seed_path: Option<String>,
    /// Longest innings a scenario may request.
    pub max_overs: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            name: "Indian Premier League".into(),
            seed_path: None,
            max_overs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "nrr_core=info,nrr=info,warn".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Path of the config file under `base_dir`.
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join("nrr.toml")
}

/// Load and validate `config/nrr.toml` relative to `base_dir`, or the
/// defaults when the file does not exist. A relative `seed_path` is resolved
/// against `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(base_dir);

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
            path: path.clone(),
        })?;
        parse_config(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        info!("No config at {}, using defaults", path.display());
        Config::default()
    };

    if let Some(seed) = &config.league.seed_path {
        let seed = Path::new(seed);
        if seed.is_relative() {
            config.league.seed_path = Some(base_dir.join(seed).display().to_string());
        }
    }

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    let max_overs = config.league.max_overs;
    if max_overs == 0 || max_overs > MAX_CONFIGURABLE_OVERS {
        return Err(ConfigError::ValidationError {
            field: "league.max_overs".into(),
            message: format!("must be between 1 and {MAX_CONFIGURABLE_OVERS}, got {max_overs}"),
        });
    }

    if config.league.seed_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "league.seed_path".into(),
            message: "must not be empty when set".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
