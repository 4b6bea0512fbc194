// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{session, teleport};
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Settings shared by every cloud collaborator. Built once at startup and
/// passed down to whatever needs it; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub region: String,
    pub max_retries: u32,
    /// Upper bound for a single external command, if any
    pub command_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            region: session::DEFAULT_REGION.to_string(),
            max_retries: session::DEFAULT_CLIENT_RETRIES,
            command_timeout: None,
        }
    }
}

impl SessionConfig {
    /// Load session settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let region = lookup("AWS_REGION")
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| session::DEFAULT_REGION.to_string());

        let max_retries = match lookup("AWS_CLIENT_RETRIES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("AWS_CLIENT_RETRIES is not a number: {}", v))?,
            None => session::DEFAULT_CLIENT_RETRIES,
        };

        let command_timeout = match lookup("COMMAND_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(
                v.parse()
                    .with_context(|| format!("COMMAND_TIMEOUT_SECS is not a number: {}", v))?,
            )),
            None => None,
        };

        Ok(SessionConfig {
            region,
            max_retries,
            command_timeout,
        })
    }
}

/// What the binary should do with the utility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateOrUpgrade,
    Destroy,
}

/// Provisioner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_id: String,
    /// Chart version to install; empty means the latest available
    pub teleport_version: String,
    pub teleport_values_path: String,
    pub action: Action,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cluster_id =
            lookup("CLUSTER_ID").context("CLUSTER_ID environment variable not set")?;
        let teleport_version = lookup("TELEPORT_VERSION").unwrap_or_default();
        let teleport_values_path = lookup("TELEPORT_VALUES_PATH")
            .unwrap_or_else(|| teleport::DEFAULT_VALUES_PATH.to_string());

        let action = match lookup("PROVISIONER_ACTION").as_deref() {
            None | Some("create-or-upgrade") => Action::CreateOrUpgrade,
            Some("destroy") => Action::Destroy,
            Some(other) => bail!("unknown PROVISIONER_ACTION: {}", other),
        };

        Ok(Config {
            cluster_id,
            teleport_version,
            teleport_values_path,
            action,
        })
    }
}
