// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Chart releases: the deployment descriptor and the helm-backed deployer.

use crate::command;
use crate::error::{ProvisionerError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, instrument};

/// Everything needed to install or upgrade one chart release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmDeployment {
    pub release_name: String,
    pub chart_name: String,
    pub namespace: String,
    /// Comma separated `key=value` overrides passed as one `--set`
    pub set_argument: String,
    pub values_path: String,
    /// Chart version to install; empty lets helm pick the latest
    pub desired_version: String,
}

/// Applies chart releases and reports what is installed
#[async_trait]
pub trait DeploymentBackend: Send + Sync {
    /// Install the release, or upgrade it if it already exists
    async fn apply(&self, deployment: &HelmDeployment) -> Result<()>;

    /// Chart version string reported for the release, e.g. `teleport-4.2.1`
    async fn installed_version(&self, deployment: &HelmDeployment) -> Result<String>;
}

#[derive(Deserialize)]
struct HelmRelease {
    name: String,
    chart: String,
}

/// Drives the `helm` binary
#[derive(Debug, Clone)]
pub struct HelmCli {
    binary: String,
    timeout: Option<Duration>,
}

impl HelmCli {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            binary: "helm".to_string(),
            timeout,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

fn upgrade_args(deployment: &HelmDeployment) -> Vec<String> {
    let mut args: Vec<String> = [
        "upgrade",
        deployment.release_name.as_str(),
        deployment.chart_name.as_str(),
        "--install",
        "--create-namespace",
        "--namespace",
        deployment.namespace.as_str(),
        "-f",
        deployment.values_path.as_str(),
        "--set",
        deployment.set_argument.as_str(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if !deployment.desired_version.is_empty() {
        args.push("--version".to_string());
        args.push(deployment.desired_version.clone());
    }
    args
}

fn list_args(deployment: &HelmDeployment) -> Vec<String> {
    vec![
        "list".to_string(),
        "--namespace".to_string(),
        deployment.namespace.clone(),
        "--filter".to_string(),
        format!("^{}$", deployment.release_name),
        "--output".to_string(),
        "json".to_string(),
    ]
}

/// Find the chart string of `release` in `helm list -o json` output
fn installed_chart(list_output: &str, release: &str) -> Result<String> {
    let releases: Vec<HelmRelease> = serde_json::from_str(list_output).map_err(|e| {
        ProvisionerError::VersionQueryError(format!("unexpected helm list output: {}", e))
    })?;

    releases
        .into_iter()
        .find(|r| r.name == release)
        .map(|r| r.chart)
        .ok_or_else(|| {
            ProvisionerError::VersionQueryError(format!("release {} not found", release))
        })
}

#[async_trait]
impl DeploymentBackend for HelmCli {
    #[instrument(skip(self, deployment), fields(release = %deployment.release_name))]
    async fn apply(&self, deployment: &HelmDeployment) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(upgrade_args(deployment));

        command::run(cmd, self.timeout).await.map_err(|e| {
            ProvisionerError::DeploymentError(format!(
                "unable to upgrade release {} in namespace {}: {}",
                deployment.release_name, deployment.namespace, e
            ))
        })?;

        info!(
            chart = %deployment.chart_name,
            namespace = %deployment.namespace,
            "Release upgraded"
        );
        Ok(())
    }

    #[instrument(skip(self, deployment), fields(release = %deployment.release_name))]
    async fn installed_version(&self, deployment: &HelmDeployment) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(list_args(deployment));

        let stdout = command::run(cmd, self.timeout).await.map_err(|e| {
            ProvisionerError::VersionQueryError(format!(
                "unable to list releases in namespace {}: {}",
                deployment.namespace, e
            ))
        })?;
        installed_chart(&stdout, &deployment.release_name)
    }
}
