use std::path::Path;
use std::{env, fs, io};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "HELLO_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Search path the session starts with. `path set` with no value still resets to `bin`.
    pub search_path: String,
    /// Size of the line buffer; one byte is reserved, as for a terminator.
    pub line_max: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: "hello$ ".to_string(),
            search_path: crate::executor::DEFAULT_SEARCH_PATH.to_string(),
            line_max: 100,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(src)?;
        if config.line_max < 2 {
            return Err(ConfigError::Invalid(format!(
                "line_max must be at least 2, got {}",
                config.line_max
            )));
        }
        if config.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level: {}",
                config.log_level
            )));
        }
        Ok(config)
    }

    /// Reads the file named by `HELLO_CONFIG`, or returns the defaults when it is unset.
    pub fn load_default() -> Result<Config, ConfigError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default_config()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}
