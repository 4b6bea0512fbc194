// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Account alias not defined")]
    NoAccountAlias,

    #[error("Account environment was not obtained")]
    EnvironmentUnresolved,

    #[error("Cannot create a connection to {0} if the environment is empty")]
    EmptyEnvironment(String),

    #[error("Namespace-scoped object {0} has no namespace")]
    MissingNamespace(String),

    #[error("Invalid resource identity: {0}")]
    InvalidIdentity(String),

    #[error("{program} failed: {message}")]
    CommandError { program: String, message: String },

    #[error("Chart deployment failed: {0}")]
    DeploymentError(String),

    #[error("Installed version query failed: {0}")]
    VersionQueryError(String),

    #[error("Unable to delete {step} {resource}: {source}")]
    TeardownError {
        step: TeardownStep,
        resource: String,
        #[source]
        source: Box<ProvisionerError>,
    },
}

impl ProvisionerError {
    /// True when a command failure reported one of the given markers on stderr
    pub fn command_reported(&self, markers: &[&str]) -> bool {
        match self {
            ProvisionerError::CommandError { message, .. } => {
                markers.iter().any(|m| message.contains(m))
            }
            _ => false,
        }
    }
}

/// Dependent cloud resources, in the order they are torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    Bucket,
    Table,
    EventsTable,
}

impl fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeardownStep::Bucket => write!(f, "bucket"),
            TeardownStep::Table => write!(f, "dynamodb table"),
            TeardownStep::EventsTable => write!(f, "dynamodb events table"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;
