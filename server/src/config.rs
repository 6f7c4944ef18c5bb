//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `FRONTDESK_BACKEND_URL`: base URL of the hosted backend (`http(s)://`)
//! - `FRONTDESK_BACKEND_ANON_KEY`: public API key handed to the browser
//!
//! Optional:
//! - `PORT`: listen port, default 3000

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use frontdesk::BackendConfig;
use thiserror::Error;

pub const BACKEND_URL_VAR: &str = "FRONTDESK_BACKEND_URL";
pub const BACKEND_ANON_KEY_VAR: &str = "FRONTDESK_BACKEND_ANON_KEY";
pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: BackendConfig,
    pub port: u16,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build typed server config from any variable source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] for an absent or blank required variable;
    /// [`ConfigError::Invalid`] for a non-HTTP backend URL or unparsable port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = required(&lookup, BACKEND_URL_VAR)?;
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: BACKEND_URL_VAR, value: url });
        }
        let anon_key = required(&lookup, BACKEND_ANON_KEY_VAR)?;
        let port = parse_port(lookup(PORT_VAR))?;

        Ok(Self { backend: BackendConfig::new(&url, &anon_key), port })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { var: PORT_VAR, value }),
    }
}
