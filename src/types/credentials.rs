// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// Credential of type gcp-infra as injected into trusted extensions
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpInfraCredential {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub credential_type: String,
    #[serde(default)]
    pub additional_properties: GcpInfraCredentialProperties,
}

/// Non-standard fields of a gcp-infra credential
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpInfraCredentialProperties {
    /// Service account key, itself a JSON document stored as a string
    #[serde(default)]
    pub service_account_keyfile: String,
}

impl GcpInfraCredential {
    pub fn service_account_keyfile(&self) -> &str {
        &self.additional_properties.service_account_keyfile
    }
}
