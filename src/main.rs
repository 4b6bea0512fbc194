// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use utility_provisioner::aws::AwsCli;
use utility_provisioner::config::{Action, Config, SessionConfig};
use utility_provisioner::helm::HelmCli;
use utility_provisioner::provisioner::{ClusterUtility, Teleport};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let session = SessionConfig::from_env()?;
    info!(
        "Configuration loaded: cluster_id={}, region={}, action={:?}",
        config.cluster_id, session.region, config.action
    );

    let aws = Arc::new(AwsCli::new(session.clone()));
    let helm = Arc::new(HelmCli::new(session.command_timeout));

    let mut teleport = Teleport::new(
        &config.cluster_id,
        &config.teleport_version,
        &session,
        aws.as_ref(),
        helm,
        aws.clone(),
    )
    .await
    .context("Failed to prepare Teleport handle")?
    .with_values_path(&config.teleport_values_path);

    match config.action {
        Action::CreateOrUpgrade => {
            teleport
                .create_or_upgrade()
                .await
                .with_context(|| format!("Failed to create or upgrade {}", teleport.name()))?;
            info!(
                "{} ready: desired version '{}', actual version '{}'",
                teleport.name(),
                teleport.desired_version(),
                teleport.actual_version()
            );
        }
        Action::Destroy => {
            teleport
                .destroy()
                .await
                .with_context(|| format!("Failed to destroy {}", teleport.name()))?;
            info!("{} destroyed for cluster {}", teleport.name(), config.cluster_id);
        }
    }

    Ok(())
}
