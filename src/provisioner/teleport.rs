// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Teleport: audit and access gateway backed by S3 and DynamoDB.

use super::{teardown, ClusterUtility};
use crate::aws::{AccountMetadata, StorageBackend};
use crate::config::SessionConfig;
use crate::constants::account::ALIAS_PRODUCT;
use crate::constants::teleport::{
    CANONICAL_NAME, CHART_NAME, DEFAULT_VALUES_PATH, NAMESPACE, RELEASE_NAME, VERSION_PREFIX,
};
use crate::error::{ProvisionerError, Result};
use crate::helm::{DeploymentBackend, HelmDeployment};
use crate::identity::{resolve_environment, ResourceIdentity};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Handle for one Teleport installation in one cluster.
///
/// Built per reconciliation request and dropped afterwards. Calls for the
/// same cluster must not run concurrently.
pub struct Teleport {
    identity: ResourceIdentity,
    region: String,
    values_path: String,
    desired_version: String,
    actual_version: String,
    deployer: Arc<dyn DeploymentBackend>,
    storage: Arc<dyn StorageBackend>,
}

impl Teleport {
    /// Resolve the environment from the account and bind the handle to `cluster_id`.
    pub async fn new(
        cluster_id: &str,
        desired_version: &str,
        session: &SessionConfig,
        accounts: &dyn AccountMetadata,
        deployer: Arc<dyn DeploymentBackend>,
        storage: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let environment = resolve_environment(accounts, ALIAS_PRODUCT).await?;
        if environment.is_empty() {
            return Err(ProvisionerError::EmptyEnvironment(CANONICAL_NAME.to_string()));
        }

        Ok(Self {
            identity: ResourceIdentity::new(environment, cluster_id)?,
            region: session.region.clone(),
            values_path: DEFAULT_VALUES_PATH.to_string(),
            desired_version: desired_version.to_string(),
            actual_version: String::new(),
            deployer,
            storage,
        })
    }

    pub fn with_values_path(mut self, values_path: impl Into<String>) -> Self {
        self.values_path = values_path.into();
        self
    }

    pub fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    /// Overrides handed to the chart. Must stay byte-stable for a given
    /// identity and region; values may not contain commas.
    pub fn set_argument(&self) -> String {
        let name = self.identity.name();
        let region = &self.region;
        [
            format!("config.auth_service.cluster_name={}", name),
            format!("config.teleport.storage.region={}", region),
            format!("config.teleport.storage.table_name={}", name),
            format!("config.teleport.storage.audit_events_uri=dynamodb://{}-events", name),
            format!(
                "config.teleport.storage.audit_sessions_uri=s3://{}/records?region={}",
                name, region
            ),
        ]
        .join(",")
    }

    pub fn helm_deployment(&self) -> HelmDeployment {
        HelmDeployment {
            release_name: RELEASE_NAME.to_string(),
            chart_name: CHART_NAME.to_string(),
            namespace: NAMESPACE.to_string(),
            set_argument: self.set_argument(),
            values_path: self.values_path.clone(),
            desired_version: self.desired_version.clone(),
        }
    }
}

#[async_trait]
impl ClusterUtility for Teleport {
    fn name(&self) -> &'static str {
        CANONICAL_NAME
    }

    fn desired_version(&self) -> &str {
        &self.desired_version
    }

    fn actual_version(&self) -> &str {
        self.actual_version
            .strip_prefix(VERSION_PREFIX)
            .unwrap_or(self.actual_version.as_str())
    }

    #[instrument(
        skip(self),
        fields(cluster_utility = CANONICAL_NAME, identity = %self.identity.name())
    )]
    async fn create_or_upgrade(&mut self) -> Result<()> {
        let deployment = self.helm_deployment();
        self.deployer.apply(&deployment).await?;
        self.actual_version = self.deployer.installed_version(&deployment).await?;

        info!(
            desired = %self.desired_version,
            actual = %self.actual_version(),
            "Teleport deployed"
        );
        Ok(())
    }

    #[instrument(
        skip(self),
        fields(cluster_utility = CANONICAL_NAME, identity = %self.identity.name())
    )]
    async fn destroy(&self) -> Result<()> {
        teardown::destroy_storage(self.storage.as_ref(), &self.identity).await
    }
}
