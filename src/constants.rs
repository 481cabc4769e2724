// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the extension
pub mod env {
    pub const ACTION: &str = "ESTAFETTE_EXTENSION_ACTION";
    /// Inline gcp-infra credentials, used when no credentials file is mounted
    pub const CREDENTIALS_JSON: &str = "ESTAFETTE_CREDENTIALS_GCP_INFRA";
    pub const SERVICE_ACCOUNT_KEYFILE: &str = "GOOGLE_APPLICATION_CREDENTIALS";
    pub const KIND_HOST: &str = "ESTAFETTE_EXTENSION_KIND_HOST";
    pub const KUBECONFIG_PATH: &str = "KUBECONFIG_PATH";
    pub const FILE: &str = "ESTAFETTE_EXTENSION_FILE";
    pub const LOG_LEVEL: &str = "ESTAFETTE_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "ESTAFETTE_LOG_FORMAT";
    pub const READINESS_TIMEOUT: &str = "ESTAFETTE_EXTENSION_READINESS_TIMEOUT";
    pub const HELM_VERSION: &str = "HELM_VERSION";
    pub const HELM_DIFF_VERSION: &str = "HELM_DIFF_VERSION";
    pub const HELM_GCS_VERSION: &str = "HELM_GCS_VERSION";
    pub const HELMFILE_VERSION: &str = "HELMFILE_VERSION";
}

/// Defaults for CLI flags
pub mod defaults {
    pub const CREDENTIALS_PATH: &str = "/credentials/gcp_infra.json";
    pub const KIND_HOST: &str = "kubernetes";
    pub const FILE: &str = "helmfile.yaml";
    pub const LOG_LEVEL: &str = "info";
    /// Kube config location relative to the home directory
    pub const KUBECONFIG_RELATIVE_PATH: &str = ".kube/config";
}

/// Kind host HTTP endpoints
pub mod kind {
    pub const PORT: u16 = 10080;
    pub const READY_PATH: &str = "/kubernetes-ready";
    pub const CONFIG_PATH: &str = "/config";
    /// Interval between readiness attempts in seconds
    pub const POLL_INTERVAL_SECS: u64 = 1;
    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 1;
    /// Literal replaced with the kind host in the served kubeconfig
    pub const LOCALHOST: &str = "localhost";
}

pub const HELMFILE_BINARY: &str = "helmfile";
