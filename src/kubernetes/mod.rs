// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities: generic create-or-update and RBAC objects.

pub mod rbac;
pub mod upsert;

pub use rbac::KubeClient;
pub use upsert::{upsert, KubeApi, ResourceBackend};
