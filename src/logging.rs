//! Subscriber setup for applications embedding the kernel.
//!
//! The geometry code is silent; chain traversal and file export emit
//! `tracing` events under the `trackspline` target.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, Result};

/// Environment variable holding raw filter directives. Overrides [`LogConfig`].
pub const LOG_ENV: &str = "TRACKSPLINE_LOG";

const TARGET: &str = env!("CARGO_PKG_NAME");

/// Verbosity accepted on the command line of host applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Critical,
    Off,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Critical => "error",
            Self::Off => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "critical" | "error" => Ok(Self::Critical),
            "off" => Ok(Self::Off),
            _ => Err(ConfigError::InvalidLogLevel(s.to_owned())),
        }
    }
}

/// How the subscriber filters events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Verbosity for the crate's own events.
    pub level: Option<LogLevel>,
    /// Raw `EnvFilter` directives; take precedence over `level`.
    pub rules: Option<String>,
}

impl LogConfig {
    /// Builds a config from a level name such as `"warning"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for unknown names.
    pub fn from_level(level: &str) -> Result<Self> {
        Ok(Self {
            level: Some(level.parse()?),
            rules: None,
        })
    }

    /// Resolves the filter directives, preferring `env` over the config.
    #[must_use]
    pub fn directives(&self, env: Option<&str>) -> String {
        if let Some(env) = env.filter(|e| !e.trim().is_empty()) {
            return env.to_owned();
        }
        if let Some(rules) = self.rules.as_ref().filter(|r| !r.trim().is_empty()) {
            return rules.clone();
        }
        let level = self.level.unwrap_or(LogLevel::Info);
        format!("{TARGET}={}", level.directive())
    }

    /// Builds the filter for the resolved directives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFilter`] if the directives do not parse.
    pub fn filter(&self, env: Option<&str>) -> Result<EnvFilter> {
        let directives = self.directives(env);
        EnvFilter::try_new(&directives)
            .map_err(|e| ConfigError::InvalidFilter(format!("{directives}: {e}")).into())
    }
}

/// Installs a formatting subscriber on stderr.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
///
/// # Errors
///
/// Returns an error if the filter directives are invalid.
pub fn init(config: &LogConfig) -> Result<bool> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = config.filter(env.as_deref())?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(target: TARGET, "logging initialized");
    }
    Ok(installed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("critical".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn level_maps_to_crate_directive() {
        let config = LogConfig::from_level("warning").unwrap();
        assert_eq!(config.directives(None), "trackspline=warn");
        assert_eq!(LogConfig::default().directives(None), "trackspline=info");
    }

    #[test]
    fn rules_override_level_and_env_overrides_rules() {
        let config = LogConfig {
            level: Some(LogLevel::Debug),
            rules: Some("trackspline=trace".into()),
        };
        assert_eq!(config.directives(None), "trackspline=trace");
        assert_eq!(config.directives(Some("off")), "off");
        assert_eq!(config.directives(Some("  ")), "trackspline=trace");
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let config = LogConfig {
            level: None,
            rules: Some("trackspline=loud".into()),
        };
        assert!(config.filter(None).is_err());
        assert!(LogConfig::default().filter(None).is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = LogConfig::from_level("off").unwrap();
        init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
