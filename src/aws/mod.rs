// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cloud account collaborators: account metadata and storage cleanup.

pub mod cli;

pub use cli::AwsCli;

use crate::error::Result;
use async_trait::async_trait;

/// Source of account metadata used to derive the environment
#[async_trait]
pub trait AccountMetadata: Send + Sync {
    async fn list_account_aliases(&self) -> Result<Vec<String>>;
}

/// Deletion of storage artifacts owned by a cluster utility.
///
/// Both operations succeed when the resource is already gone.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn ensure_bucket_deleted(&self, name: &str) -> Result<()>;
    async fn ensure_table_deleted(&self, name: &str) -> Result<()>;
}
