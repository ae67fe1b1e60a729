//! Runtime configuration for the `toa` command-line tool.
//!
//! Configuration is read from the environment:
//! - `TOA_FORMAT`: output format, `human` (default) or `json`
//! - `TOA_LOG`: default log filter (`warn` if unset); `RUST_LOG` still wins
//!
//! # Example
//!
//! ```
//! use lorawan_toa::config::{Config, OutputFormat};
//!
//! let config = Config::from_lookup(|key| match key {
//!     "TOA_FORMAT" => Some("json".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(config.format, OutputFormat::Json);
//! assert_eq!(config.log_filter, "warn");
//! ```

use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the output format.
pub const FORMAT_ENV: &str = "TOA_FORMAT";

/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "TOA_LOG";

/// Log filter used when `TOA_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per result, durations in human units.
    #[default]
    Human,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    /// `env_logger` filter directives, e.g. `info` or `lorawan_toa=trace`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps variable names to
    /// values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(format) = lookup(FORMAT_ENV) {
            config.format = format.parse()?;
        }
        if let Some(filter) = lookup(LOG_ENV) {
            config.log_filter = filter;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Every `target=level` directive of the log filter must name a known
    /// level. Bare directives may be a level or a module path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        for directive in self.log_filter.split(',') {
            if let Some((_, level)) = directive.split_once('=') {
                if log::LevelFilter::from_str(level.trim()).is_err() {
                    return Err(ConfigError::InvalidLogLevel(level.trim().to_string()));
                }
            }
        }
        Ok(())
    }
}

/// Errors that can occur while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TOA_FORMAT` is not a known output format.
    UnknownFormat(String),
    /// `TOA_LOG` is set but empty.
    EmptyLogFilter,
    /// A log directive names an unknown level.
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(s) => write!(
                f,
                "unknown output format in {}: {:?} (expected human or json)",
                FORMAT_ENV, s
            ),
            Self::EmptyLogFilter => write!(f, "{} is set but empty", LOG_ENV),
            Self::InvalidLogLevel(level) => {
                write!(f, "invalid log level in {}: {:?}", LOG_ENV, level)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_format_from_env() {
        let config = Config::from_lookup(lookup(&[("TOA_FORMAT", " JSON ")])).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format() {
        assert_eq!(
            Config::from_lookup(lookup(&[("TOA_FORMAT", "xml")])),
            Err(ConfigError::UnknownFormat("xml".into()))
        );
    }

    #[test]
    fn test_log_filter_from_env() {
        let config =
            Config::from_lookup(lookup(&[("TOA_LOG", "info,lorawan_toa=trace")])).unwrap();
        assert_eq!(config.log_filter, "info,lorawan_toa=trace");
    }

    #[test]
    fn test_empty_log_filter() {
        assert_eq!(
            Config::from_lookup(lookup(&[("TOA_LOG", "  ")])),
            Err(ConfigError::EmptyLogFilter)
        );
    }

    #[test]
    fn test_invalid_log_level() {
        assert_eq!(
            Config::from_lookup(lookup(&[("TOA_LOG", "lorawan_toa=loud")])),
            Err(ConfigError::InvalidLogLevel("loud".into()))
        );
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Human.to_string(), "human");
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    }
}
