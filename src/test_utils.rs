// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles: a mock Kubernetes API and recording cloud collaborators.

use crate::aws::{AccountMetadata, StorageBackend};
use crate::error::{ProvisionerError, Result};
use crate::helm::{DeploymentBackend, HelmDeployment};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it sees.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Requests received so far, as `"METHOD /path"`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<
            dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>>
                + Send,
        >,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path));
        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("object", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a failure Status body with the given code
pub fn status_json(code: u16, reason: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": reason.to_lowercase(),
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

fn failure(program: &str, message: &str) -> ProvisionerError {
    ProvisionerError::CommandError {
        program: program.to_string(),
        message: message.to_string(),
    }
}

/// Account metadata with a fixed answer
pub struct StaticAccounts {
    aliases: std::result::Result<Vec<String>, String>,
}

impl StaticAccounts {
    pub fn new(aliases: &[&str]) -> Self {
        Self {
            aliases: Ok(aliases.iter().map(|a| a.to_string()).collect()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            aliases: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl AccountMetadata for StaticAccounts {
    async fn list_account_aliases(&self) -> Result<Vec<String>> {
        self.aliases.clone().map_err(|m| failure("aws", &m))
    }
}

/// Storage backend that logs each deletion and can fail or hang on one of them
#[derive(Default)]
pub struct RecordingStorage {
    calls: Mutex<Vec<String>>,
    fail_on: Option<String>,
    hang_on: Option<String>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the deletion whose log entry equals `call`, e.g. `"table:foo"`
    pub fn failing_on(call: &str) -> Self {
        Self {
            fail_on: Some(call.to_string()),
            ..Default::default()
        }
    }

    /// Never complete the deletion whose log entry equals `call`
    pub fn hanging_on(call: &str) -> Self {
        Self {
            hang_on: Some(call.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.hang_on.as_deref() == Some(call.as_str()) {
            std::future::pending::<()>().await;
        }
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(failure("aws", "AccessDenied"));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for RecordingStorage {
    async fn ensure_bucket_deleted(&self, name: &str) -> Result<()> {
        self.record(format!("bucket:{}", name)).await
    }

    async fn ensure_table_deleted(&self, name: &str) -> Result<()> {
        self.record(format!("table:{}", name)).await
    }
}

/// Deployment backend that remembers what it was asked to apply
#[derive(Default)]
pub struct FakeDeployer {
    applied: Mutex<Vec<HelmDeployment>>,
    reported_version: Option<String>,
    fail_apply: bool,
    hang_apply: bool,
    version_queries: AtomicUsize,
}

impl FakeDeployer {
    /// Reports `version` as installed after any apply
    pub fn reporting(version: &str) -> Self {
        Self {
            reported_version: Some(version.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_apply() -> Self {
        Self {
            fail_apply: true,
            ..Default::default()
        }
    }

    /// Records the release, then never finishes applying it
    pub fn hanging_apply() -> Self {
        Self {
            hang_apply: true,
            ..Default::default()
        }
    }

    /// How many times the installed version was asked for
    pub fn version_queries(&self) -> usize {
        self.version_queries.load(Ordering::SeqCst)
    }

    pub fn applied(&self) -> Vec<HelmDeployment> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeploymentBackend for FakeDeployer {
    async fn apply(&self, deployment: &HelmDeployment) -> Result<()> {
        if self.fail_apply {
            return Err(ProvisionerError::DeploymentError("release failed".to_string()));
        }
        self.applied.lock().unwrap().push(deployment.clone());
        if self.hang_apply {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn installed_version(&self, deployment: &HelmDeployment) -> Result<String> {
        self.version_queries.fetch_add(1, Ordering::SeqCst);
        self.reported_version.clone().ok_or_else(|| {
            ProvisionerError::VersionQueryError(format!(
                "release {} not found",
                deployment.release_name
            ))
        })
    }
}
