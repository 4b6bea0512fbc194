// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update over any resource backend.
//!
//! The protocol is read-then-branch with no resourceVersion precondition:
//! a write landing between the read and the update is overwritten. Callers
//! that can race on the same object must serialize themselves.

use async_trait::async_trait;
use kube::{api::PostParams, Api, Resource};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Read, create and update for one resource kind in one scope
#[async_trait]
pub trait ResourceBackend: Send + Sync {
    type Object: Send + Sync;
    type Error: Send;

    async fn get(&self, name: &str) -> Result<Self::Object, Self::Error>;
    async fn create(&self, desired: &Self::Object) -> Result<Self::Object, Self::Error>;
    async fn update(&self, name: &str, desired: &Self::Object)
        -> Result<Self::Object, Self::Error>;

    /// Whether a failed `get` means the object does not exist
    fn is_not_found(err: &Self::Error) -> bool;
}

/// Ensure `name` exists with the desired content.
///
/// Creates it when the read reports not-found, replaces it when the read
/// succeeds, and returns any other read error untouched.
#[instrument(skip(backend, desired))]
pub async fn upsert<B: ResourceBackend>(
    backend: &B,
    name: &str,
    desired: &B::Object,
) -> Result<B::Object, B::Error> {
    match backend.get(name).await {
        Ok(_) => {
            debug!("{} exists, updating", name);
            backend.update(name, desired).await
        }
        Err(e) if B::is_not_found(&e) => {
            info!("{} not found, creating", name);
            backend.create(desired).await
        }
        Err(e) => Err(e),
    }
}

/// A kube `Api` as an upsert backend; the `Api` fixes scope and version
pub struct KubeApi<K> {
    api: Api<K>,
}

impl<K> KubeApi<K> {
    pub fn new(api: Api<K>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<K> ResourceBackend for KubeApi<K>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug + Send + Sync + 'static,
{
    type Object = K;
    type Error = kube::Error;

    async fn get(&self, name: &str) -> Result<K, kube::Error> {
        self.api.get(name).await
    }

    async fn create(&self, desired: &K) -> Result<K, kube::Error> {
        self.api.create(&PostParams::default(), desired).await
    }

    async fn update(&self, name: &str, desired: &K) -> Result<K, kube::Error> {
        self.api.replace(name, &PostParams::default(), desired).await
    }

    fn is_not_found(err: &kube::Error) -> bool {
        matches!(err, kube::Error::Api(e) if e.code == 404)
    }
}
