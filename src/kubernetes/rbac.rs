// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update for ClusterRoles and Roles in both RBAC API versions.
//!
//! `v1beta1` is served through `DynamicObject` since the typed bindings only
//! cover `rbac.authorization.k8s.io/v1`.

use crate::constants::rbac::{BETA_VERSION, GROUP};
use crate::error::{ProvisionerError, Result};
use crate::kubernetes::upsert::{upsert, KubeApi};
use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule, Role};
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use kube::{Api, Client, ResourceExt};
use tracing::instrument;

fn beta_resource(kind: &str, plural: &str) -> ApiResource {
    ApiResource::from_gvk_with_plural(&GroupVersionKind::gvk(GROUP, BETA_VERSION, kind), plural)
}

/// `rbac.authorization.k8s.io/v1beta1` ClusterRole
pub fn beta_cluster_role_resource() -> ApiResource {
    beta_resource("ClusterRole", "clusterroles")
}

/// `rbac.authorization.k8s.io/v1beta1` Role
pub fn beta_role_resource() -> ApiResource {
    beta_resource("Role", "roles")
}

/// Build a v1beta1 ClusterRole carrying `rules`
pub fn beta_cluster_role(name: &str, rules: &[PolicyRule]) -> DynamicObject {
    DynamicObject::new(name, &beta_cluster_role_resource())
        .data(serde_json::json!({ "rules": rules }))
}

/// Build a v1beta1 Role in `namespace` carrying `rules`
pub fn beta_role(name: &str, namespace: &str, rules: &[PolicyRule]) -> DynamicObject {
    DynamicObject::new(name, &beta_role_resource())
        .within(namespace)
        .data(serde_json::json!({ "rules": rules }))
}

/// Kubernetes client for the provisioner's own objects
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, role), fields(name = %role.name_any()))]
    pub async fn create_or_update_cluster_role_v1(
        &self,
        role: &ClusterRole,
    ) -> Result<ClusterRole> {
        let api: Api<ClusterRole> = Api::all(self.client.clone());
        Ok(upsert(&KubeApi::new(api), &role.name_any(), role).await?)
    }

    #[instrument(skip(self, role), fields(name = %role.name_any()))]
    pub async fn create_or_update_cluster_role_v1beta1(
        &self,
        role: &DynamicObject,
    ) -> Result<DynamicObject> {
        let api: Api<DynamicObject> =
            Api::all_with(self.client.clone(), &beta_cluster_role_resource());
        Ok(upsert(&KubeApi::new(api), &role.name_any(), role).await?)
    }

    #[instrument(skip(self, role), fields(name = %role.name_any()))]
    pub async fn create_or_update_role_v1(&self, role: &Role) -> Result<Role> {
        let namespace = required_namespace(role.namespace(), &role.name_any())?;
        let api: Api<Role> = Api::namespaced(self.client.clone(), &namespace);
        Ok(upsert(&KubeApi::new(api), &role.name_any(), role).await?)
    }

    #[instrument(skip(self, role), fields(name = %role.name_any()))]
    pub async fn create_or_update_role_v1beta1(
        &self,
        role: &DynamicObject,
    ) -> Result<DynamicObject> {
        let namespace = required_namespace(role.namespace(), &role.name_any())?;
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), &namespace, &beta_role_resource());
        Ok(upsert(&KubeApi::new(api), &role.name_any(), role).await?)
    }
}

fn required_namespace(namespace: Option<String>, name: &str) -> Result<String> {
    namespace
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| ProvisionerError::MissingNamespace(name.to_string()))
}
