// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Execution of external CLI collaborators (helm, aws)

use crate::error::{ProvisionerError, Result};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Run a prepared command and return its stdout.
///
/// A non-zero exit status becomes a `CommandError` carrying stderr so callers
/// can inspect it. The child is killed if the returned future is dropped.
pub async fn run(mut command: Command, timeout: Option<Duration>) -> Result<String> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();
    debug!("Running {:?}", command.as_std());

    command.kill_on_drop(true);
    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, command.output())
            .await
            .map_err(|_| ProvisionerError::CommandError {
                program: program.clone(),
                message: format!("timed out after {:?}", limit),
            })?,
        None => command.output().await,
    }
    .map_err(|e| ProvisionerError::CommandError {
        program: program.clone(),
        message: format!("failed to run: {}", e),
    })?;

    if !output.status.success() {
        return Err(ProvisionerError::CommandError {
            program,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
