// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{defaults, env};
use crate::logging::LogFormat;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Command line flags, each with an environment variable fallback
#[derive(Parser, Debug)]
#[command(name = "helmfile-extension", about = "Runs helmfile lint, diff or apply in a build step")]
pub struct Cli {
    /// Action to execute: lint, diff or apply
    #[arg(long, env = env::ACTION)]
    pub action: String,

    /// Path to file with GCP infra credentials, passed in to this trusted extension
    #[arg(long, default_value = defaults::CREDENTIALS_PATH)]
    pub credentials_path: PathBuf,

    /// Inline GCP infra credentials, used when no credentials file is mounted
    #[arg(long, env = env::CREDENTIALS_JSON, hide_env_values = true)]
    pub credentials_json: Option<String>,

    /// Path to store the service account keyfile
    #[arg(long, env = env::SERVICE_ACCOUNT_KEYFILE)]
    pub service_account_keyfile_path: PathBuf,

    /// Hostname of the kind container
    #[arg(long, env = env::KIND_HOST, default_value = defaults::KIND_HOST)]
    pub kind_host: String,

    /// Where to write the kubeconfig for the kind host; defaults to ~/.kube/config
    #[arg(long, env = env::KUBECONFIG_PATH)]
    pub kubeconfig_path: Option<PathBuf>,

    /// Yaml file to be used by helmfile
    #[arg(long, env = env::FILE, default_value = defaults::FILE)]
    pub file: String,

    /// The minimum level to output as logs
    #[arg(long, env = env::LOG_LEVEL, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[arg(long, env = env::LOG_FORMAT, value_enum, default_value_t = LogFormat::Plaintext)]
    pub log_format: LogFormat,

    /// Give up waiting for the kind host after this many seconds; 0 waits until cancelled
    #[arg(long, env = env::READINESS_TIMEOUT)]
    pub readiness_timeout_seconds: Option<u64>,

    #[arg(long, env = env::HELM_VERSION)]
    pub helm_version: Option<String>,

    #[arg(long, env = env::HELM_DIFF_VERSION)]
    pub helm_diff_version: Option<String>,

    #[arg(long, env = env::HELM_GCS_VERSION)]
    pub helm_gcs_version: Option<String>,

    #[arg(long, env = env::HELMFILE_VERSION)]
    pub helmfile_version: Option<String>,
}

/// Versions of the tools installed next to the extension
#[derive(Debug, Clone, Default)]
pub struct ToolVersions {
    pub helm: Option<String>,
    pub helm_diff: Option<String>,
    pub helm_gcs: Option<String>,
    pub helmfile: Option<String>,
}

impl ToolVersions {
    pub fn log(&self) {
        let unknown = "unknown";
        info!(
            helm = self.helm.as_deref().unwrap_or(unknown),
            helm_diff = self.helm_diff.as_deref().unwrap_or(unknown),
            helm_gcs = self.helm_gcs.as_deref().unwrap_or(unknown),
            helmfile = self.helmfile.as_deref().unwrap_or(unknown),
            "Installed tools..."
        );
    }
}

/// Extension configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub action: String,
    pub credentials_path: PathBuf,
    pub credentials_json: Option<String>,
    pub service_account_keyfile_path: PathBuf,
    pub kind_host: String,
    pub kubeconfig_path: PathBuf,
    pub file: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub readiness_timeout: Option<Duration>,
    pub tool_versions: ToolVersions,
}

impl Config {
    /// Load configuration from command line flags and environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let kubeconfig_path = match cli.kubeconfig_path {
            Some(path) => path,
            None => dirs_next::home_dir()
                .context("Could not determine home directory for the kubeconfig")?
                .join(defaults::KUBECONFIG_RELATIVE_PATH),
        };

        Ok(Config {
            action: cli.action,
            credentials_path: cli.credentials_path,
            credentials_json: cli.credentials_json,
            service_account_keyfile_path: cli.service_account_keyfile_path,
            kind_host: cli.kind_host,
            kubeconfig_path,
            file: cli.file,
            log_level: cli.log_level.to_lowercase(),
            log_format: cli.log_format,
            readiness_timeout: cli
                .readiness_timeout_seconds
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            tool_versions: ToolVersions {
                helm: cli.helm_version,
                helm_diff: cli.helm_diff_version,
                helm_gcs: cli.helm_gcs_version,
                helmfile: cli.helmfile_version,
            },
        })
    }
}
