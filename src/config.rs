// src/config.rs
//! Command-line and environment configuration for both binaries.
//!
//! Every flag falls back to an environment variable, and the binaries load a
//! `.env` file first, so a deployment can be configured either way.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::{
    error::RelayError,
    services::{relay_client::RelayClient, reply_policy::ReplyPolicy},
};

pub const DEFAULT_RELAY_PATH: &str = "/webhook-test/e9ce502d-cb24-49b8-be18-96c2daf41b7f";
pub const DEFAULT_RELAY_PORT: u16 = 5678;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the forward policy needs --upstream-url (RELAY_UPSTREAM_URL)")]
    MissingUpstream,

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("could not build upstream client: {0}")]
    Client(#[from] RelayError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    Echo,
    Forward,
}

/// Settings for the `chat-relay` server.
#[derive(Clone, Debug, Parser)]
#[command(name = "chat-relay", version, about = "Relay chat widget messages to a reply backend")]
pub struct ServerConfig {
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "RELAY_PORT", default_value_t = DEFAULT_RELAY_PORT)]
    pub port: u16,

    /// Path the widget posts messages to.
    #[arg(long, env = "RELAY_PATH", default_value = DEFAULT_RELAY_PATH)]
    pub path: String,

    #[arg(long, env = "RELAY_POLICY", value_enum, default_value_t = PolicyKind::Echo)]
    pub policy: PolicyKind,

    /// Automation webhook used by the forward policy.
    #[arg(long, env = "RELAY_UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    #[arg(long, env = "RELAY_UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub upstream_timeout_secs: u64,

    /// Serve the built site from this directory for any other path.
    #[arg(long, env = "RELAY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The relay path with exactly one leading slash.
    pub fn route_path(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }

    pub fn reply_policy(&self) -> Result<ReplyPolicy, ConfigError> {
        match self.policy {
            PolicyKind::Echo => Ok(ReplyPolicy::Echo),
            PolicyKind::Forward => {
                let url = self
                    .upstream_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or(ConfigError::MissingUpstream)?;
                let timeout = timeout_from_secs(self.upstream_timeout_secs)?;
                Ok(ReplyPolicy::Forward(RelayClient::new(url, timeout)?))
            }
        }
    }
}

/// Settings for the `chat` terminal client.
#[derive(Clone, Debug, Parser)]
#[command(name = "chat", version, about = "Talk to a chat relay from the terminal")]
pub struct ClientConfig {
    #[arg(long, env = "RELAY_URL", default_value_t = default_relay_url())]
    pub relay_url: String,

    #[arg(long, env = "RELAY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn relay_client(&self) -> Result<RelayClient, ConfigError> {
        let timeout = timeout_from_secs(self.timeout_secs)?;
        Ok(RelayClient::new(&self.relay_url, timeout)?)
    }
}

pub fn default_relay_url() -> String {
    format!("http://localhost:{DEFAULT_RELAY_PORT}{DEFAULT_RELAY_PATH}")
}

fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(Duration::from_secs(secs))
}
