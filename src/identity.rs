// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Environment and resource naming derived from the cloud account.

use crate::aws::AccountMetadata;
use crate::constants::account::ALIAS_CLOUD_SEGMENT;
use crate::error::{ProvisionerError, Result};
use tracing::{debug, instrument};

/// Resolve the environment tag from aliases shaped `<product>-cloud-<env>`.
///
/// Recomputed on every call; the provider may point at a different account
/// each time.
#[instrument(skip(accounts))]
pub async fn resolve_environment(accounts: &dyn AccountMetadata, product: &str) -> Result<String> {
    let aliases = accounts.list_account_aliases().await?;
    let environment = environment_from_aliases(product, &aliases)?;
    debug!("Resolved environment {}", environment);
    Ok(environment)
}

/// Pick the environment out of the first alias shaped `<product>-cloud-<env>`.
pub fn environment_from_aliases<S: AsRef<str>>(product: &str, aliases: &[S]) -> Result<String> {
    if aliases.is_empty() {
        return Err(ProvisionerError::NoAccountAlias);
    }

    aliases
        .iter()
        .find_map(|alias| {
            let parts: Vec<&str> = alias.as_ref().split('-').collect();
            match parts.as_slice() {
                [p, c, env] if *p == product && *c == ALIAS_CLOUD_SEGMENT => Some(env.to_string()),
                _ => None,
            }
        })
        .ok_or(ProvisionerError::EnvironmentUnresolved)
}

/// Stable key for everything a utility owns in one cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    environment: String,
    cluster_id: String,
}

impl ResourceIdentity {
    pub fn new(environment: impl Into<String>, cluster_id: impl Into<String>) -> Result<Self> {
        let environment = environment.into();
        let cluster_id = cluster_id.into();
        if environment.is_empty() {
            return Err(ProvisionerError::InvalidIdentity(
                "environment is empty".to_string(),
            ));
        }
        if cluster_id.is_empty() {
            return Err(ProvisionerError::InvalidIdentity(
                "cluster id is empty".to_string(),
            ));
        }
        Ok(Self {
            environment,
            cluster_id,
        })
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    /// Name of the bucket, the state table and the utility's cluster
    pub fn name(&self) -> String {
        format!("cloud-{}-{}", self.environment, self.cluster_id)
    }

    pub fn events_table_name(&self) -> String {
        format!("{}-events", self.name())
    }
}
