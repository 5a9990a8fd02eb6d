// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and frozen
//! into an [`AppConfig`] that is shared read-only through `AppState`.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC secret used to sign bearer tokens | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `TOKEN_TTL_HOURS` | Bearer token lifetime in hours | `24` |
//! | `STATIC_DIR` | Directory holding the browser client | Unset (API only) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable for the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the token lifetime.
pub const TOKEN_TTL_HOURS_ENV: &str = "TOKEN_TTL_HOURS";

/// Environment variable pointing at the static client files.
///
/// When set, `/` serves `login.html` from this directory and unknown paths
/// fall back to files beneath it.
pub const STATIC_DIR_ENV: &str = "STATIC_DIR";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Tokens expire 24 hours after issuance unless overridden.
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

/// Upper bound on `TOKEN_TTL_HOURS` (100 years), keeping expiry timestamps
/// well inside `i64` seconds.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 100;

/// Secrets shorter than this still work but are logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse from the `LOG_FORMAT` value (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let host = lookup(HOST_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let ttl_hours = match lookup(TOKEN_TTL_HOURS_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(hours) if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: TOKEN_TTL_HOURS_ENV,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        let ttl_secs = ttl_hours.checked_mul(3600).ok_or_else(|| ConfigError::Invalid {
            name: TOKEN_TTL_HOURS_ENV,
            value: ttl_hours.to_string(),
        })?;

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw).ok_or(ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            static_dir: lookup(STATIC_DIR_ENV)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            log_format,
        })
    }

    /// Configuration for tests and embedding: defaults plus the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: secret.into(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS * 3600),
            static_dir: None,
            log_format: LogFormat::default(),
        }
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: HOST_ENV,
                value: self.host.clone(),
            })
    }

    pub fn has_weak_secret(&self) -> bool {
        self.jwt_secret.len() < RECOMMENDED_SECRET_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn secret_is_required() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_SECRET_ENV));

        let err = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(JWT_SECRET_ENV));
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl, Duration::from_secs(24 * 3600));
        assert!(config.static_dir.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.has_weak_secret());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "0123456789abcdef0123456789abcdef"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8081"),
            (TOKEN_TTL_HOURS_ENV, "2"),
            (STATIC_DIR_ENV, "./public"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.token_ttl, Duration::from_secs(2 * 3600));
        assert_eq!(config.static_dir, Some(PathBuf::from("./public")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.has_weak_secret());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s"), (PORT_ENV, "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: PORT_ENV, .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s"),
            (TOKEN_TTL_HOURS_ENV, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: TOKEN_TTL_HOURS_ENV, .. }));

        let err = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s"), (LOG_FORMAT_ENV, "xml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: LOG_FORMAT_ENV, .. }));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        for hours in ["18446744073709551615", "2562047788015215", "876001"] {
            let err = AppConfig::from_lookup(lookup_from(&[
                (JWT_SECRET_ENV, "s"),
                (TOKEN_TTL_HOURS_ENV, hours),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: TOKEN_TTL_HOURS_ENV, .. }), "{hours}");
        }

        let config = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s"),
            (TOKEN_TTL_HOURS_ENV, "876000"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(MAX_TOKEN_TTL_HOURS * 3600));
    }
}
