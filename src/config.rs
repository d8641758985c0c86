// Copyright (c) 2025 - Cowboy AI, Inc.
//! Environment-driven application configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `COOKBOOK_HOST` | `0.0.0.0` |
//! | `COOKBOOK_PORT` | `8080` |
//! | `NATS_URL` | unset (NATS publication disabled) |
//! | `NATS_SUBJECT_PREFIX` | `cookbook.recipes` |
//! | `COOKBOOK_SEED` | `false` |

use std::net::SocketAddr;

use crate::errors::{InfrastructureError, InfrastructureResult};
use crate::nats::DEFAULT_SUBJECT_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub nats_url: Option<String>,
    pub nats_subject_prefix: String,
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            nats_url: None,
            nats_subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            seed: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> InfrastructureResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> InfrastructureResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match value("COOKBOOK_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                InfrastructureError::Configuration(format!("COOKBOOK_PORT is not a port: {raw}"))
            })?,
            None => defaults.port,
        };

        let seed = match value("COOKBOOK_SEED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                InfrastructureError::Configuration(format!("COOKBOOK_SEED is not a boolean: {raw}"))
            })?,
            None => defaults.seed,
        };

        Ok(Self {
            host: value("COOKBOOK_HOST").unwrap_or(defaults.host),
            port,
            nats_url: value("NATS_URL"),
            nats_subject_prefix: value("NATS_SUBJECT_PREFIX")
                .unwrap_or(defaults.nats_subject_prefix),
            seed,
        })
    }

    /// Socket address to bind the HTTP server to
    pub fn bind_address(&self) -> InfrastructureResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| InfrastructureError::Configuration(format!("invalid bind address: {e}")))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
