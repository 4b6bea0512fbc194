// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AWS collaborators backed by the `aws` command line client

use super::{AccountMetadata, StorageBackend};
use crate::command;
use crate::config::SessionConfig;
use crate::error::{ProvisionerError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, instrument};

const NO_SUCH_BUCKET: &[&str] = &["NoSuchBucket"];
const TABLE_NOT_FOUND: &[&str] = &["ResourceNotFoundException"];

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListAccountAliasesOutput {
    #[serde(default)]
    account_aliases: Vec<String>,
}

/// Runs `aws` with the region and retry settings of a session
#[derive(Debug, Clone)]
pub struct AwsCli {
    session: SessionConfig,
    binary: String,
}

impl AwsCli {
    pub fn new(session: SessionConfig) -> Self {
        Self {
            session,
            binary: "aws".to_string(),
        }
    }

    /// Use a different executable, e.g. a wrapper script
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// The CLI counts the first try as an attempt
    fn max_attempts(&self) -> u32 {
        self.session.max_retries.saturating_add(1)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .args(["--region", self.session.region.as_str(), "--output", "json"])
            .env("AWS_MAX_ATTEMPTS", self.max_attempts().to_string());
        cmd
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        command::run(self.command(args), self.session.command_timeout).await
    }
}

#[async_trait]
impl AccountMetadata for AwsCli {
    #[instrument(skip(self))]
    async fn list_account_aliases(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["iam", "list-account-aliases"]).await?;
        let output: ListAccountAliasesOutput =
            serde_json::from_str(&stdout).map_err(|e| ProvisionerError::CommandError {
                program: self.binary.clone(),
                message: format!("unexpected list-account-aliases output: {}", e),
            })?;
        debug!("Found {} account aliases", output.account_aliases.len());
        Ok(output.account_aliases)
    }
}

#[async_trait]
impl StorageBackend for AwsCli {
    #[instrument(skip(self))]
    async fn ensure_bucket_deleted(&self, name: &str) -> Result<()> {
        let bucket = format!("s3://{}", name);
        match self.run(&["s3", "rb", bucket.as_str(), "--force"]).await {
            Ok(_) => {
                info!("Bucket {} deleted", name);
                Ok(())
            }
            Err(e) if e.command_reported(NO_SUCH_BUCKET) => {
                debug!("Bucket {} does not exist", name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn ensure_table_deleted(&self, name: &str) -> Result<()> {
        match self
            .run(&["dynamodb", "delete-table", "--table-name", name])
            .await
        {
            Ok(_) => {
                info!("DynamoDB table {} deleted", name);
                Ok(())
            }
            Err(e) if e.command_reported(TABLE_NOT_FOUND) => {
                debug!("DynamoDB table {} does not exist", name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
