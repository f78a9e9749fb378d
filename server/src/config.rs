//! Environment-driven server configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `127.0.0.1`)
//! - `PORT`: bind port (default: `3000`)
//! - `ITEM_NAME_MAX_LENGTH`: maximum item name length in characters (default: `40`)
//! - `SEED`: load demo data at startup, `1`/`true`/`yes`/`on` (default: off)
//! - `RUST_LOG`: log filter, see [`crate::telemetry`]
//!
//! Empty or whitespace-only values fall back to the default.

use thiserror::Error;
use todo_core::ItemRules;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub item_rules: ItemRules,
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            item_rules: ItemRules::default(),
            seed: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let host = value("HOST").unwrap_or(defaults.host);

        let port = match value("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| invalid("PORT", &raw, e.to_string()))?,
            None => defaults.port,
        };

        let item_rules = match value("ITEM_NAME_MAX_LENGTH") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(invalid(
                        "ITEM_NAME_MAX_LENGTH",
                        &raw,
                        "must be greater than 0",
                    ))
                }
                Ok(n) => ItemRules::with_name_max_length(n),
                Err(e) => {
                    return Err(invalid("ITEM_NAME_MAX_LENGTH", &raw, e.to_string()))
                }
            },
            None => defaults.item_rules,
        };

        let seed = match value("SEED") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| invalid("SEED", &raw, "expected a boolean"))?,
            None => defaults.seed,
        };

        Ok(Self {
            host,
            port,
            item_rules,
            seed,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
        assert_eq!(cfg.item_rules.name_max_length, 40);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("ITEM_NAME_MAX_LENGTH", "25"),
            ("SEED", "yes"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.item_rules.name_max_length, 25);
        assert_eq!(cfg.item_rules.description_max_length, 200);
        assert!(cfg.seed);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("PORT", "  "), ("SEED", "")]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert!(!cfg.seed);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for PORT: \"http\""));
    }

    #[test]
    fn rejects_zero_name_length() {
        let err = config(&[("ITEM_NAME_MAX_LENGTH", "0")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "ITEM_NAME_MAX_LENGTH",
                value: "0".to_string(),
                reason: "must be greater than 0".to_string(),
            }
        );
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(config(&[("SEED", "maybe")]).is_err());
    }
}
