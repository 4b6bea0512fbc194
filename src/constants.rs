// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Account alias layout: `<product>-cloud-<environment>`
pub mod account {
    /// Product segment expected in account aliases
    pub const ALIAS_PRODUCT: &str = "mattermost";
    /// Fixed second segment of account aliases
    pub const ALIAS_CLOUD_SEGMENT: &str = "cloud";
}

/// Session defaults for the cloud collaborators
pub mod session {
    pub const DEFAULT_REGION: &str = "us-east-1";
    pub const DEFAULT_CLIENT_RETRIES: u32 = 3;
}

/// Teleport cluster utility
pub mod teleport {
    /// Canonical name used for logging and registries
    pub const CANONICAL_NAME: &str = "teleport";
    pub const CHART_NAME: &str = "chartmuseum/teleport";
    pub const RELEASE_NAME: &str = "teleport";
    pub const NAMESPACE: &str = "teleport";
    /// Prefix helm reports in front of the chart version
    pub const VERSION_PREFIX: &str = "teleport-";
    pub const DEFAULT_VALUES_PATH: &str = "helm-charts/teleport_values.yaml";
}

/// RBAC API groups
pub mod rbac {
    pub const GROUP: &str = "rbac.authorization.k8s.io";
    pub const BETA_VERSION: &str = "v1beta1";
}
