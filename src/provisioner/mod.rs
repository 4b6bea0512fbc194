// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster utilities and their lifecycle.

pub mod teardown;
pub mod teleport;

pub use teardown::destroy_storage;
pub use teleport::Teleport;

use crate::error::Result;
use async_trait::async_trait;

/// An optional service deployed alongside a cluster's main workload
#[async_trait]
pub trait ClusterUtility: Send + Sync {
    /// Canonical identifier used in logs and registries
    fn name(&self) -> &'static str;
    fn desired_version(&self) -> &str;
    /// Version observed after the last successful deploy, without any chart prefix
    fn actual_version(&self) -> &str;
    async fn create_or_upgrade(&mut self) -> Result<()>;
    async fn destroy(&self) -> Result<()>;
}
