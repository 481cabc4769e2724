// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Materializes the injected gcp-infra service account keyfile on disk.

use crate::error::{ExtensionError, Result};
use crate::types::GcpInfraCredential;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

#[allow(async_fn_in_trait)]
pub trait CredentialsClient {
    /// Extract the service account keyfile and store it at the configured path
    async fn init(&self) -> Result<()>;
}

/// Where the injected credentials were found
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    File(PathBuf),
    Inline(String),
}

#[derive(Debug, Clone)]
pub struct GcpCredentialsClient {
    credentials_path: Option<PathBuf>,
    inline_credentials: Option<String>,
    keyfile_path: PathBuf,
}

impl GcpCredentialsClient {
    pub fn new(
        credentials_path: Option<PathBuf>,
        inline_credentials: Option<String>,
        keyfile_path: PathBuf,
    ) -> Result<Self> {
        if keyfile_path.as_os_str().is_empty() {
            return Err(ExtensionError::Config(
                "service account keyfile path is empty".to_string(),
            ));
        }
        let credentials_path = credentials_path.filter(|p| !p.as_os_str().is_empty());
        let inline_credentials = inline_credentials.filter(|c| !c.trim().is_empty());
        if credentials_path.is_none() && inline_credentials.is_none() {
            return Err(ExtensionError::Config(
                "neither a credentials path nor inline credentials are configured".to_string(),
            ));
        }

        Ok(Self {
            credentials_path,
            inline_credentials,
            keyfile_path,
        })
    }

    /// A mounted credentials file takes precedence over inline credentials
    pub fn resolve_source(&self) -> Result<CredentialSource> {
        if let Some(path) = self.credentials_path.as_ref().filter(|p| p.is_file()) {
            return Ok(CredentialSource::File(path.clone()));
        }
        if let Some(json) = &self.inline_credentials {
            return Ok(CredentialSource::Inline(json.clone()));
        }

        Err(ExtensionError::Credentials(
            "credentials of type gcp-infra are not injected; configure this extension as trusted and inject credentials of type gcp-infra".to_string(),
        ))
    }

    async fn read_source(&self, source: CredentialSource) -> Result<String> {
        match source {
            CredentialSource::File(path) => {
                info!("Reading credentials from file at path {}...", path.display());
                Ok(tokio::fs::read_to_string(&path).await?)
            }
            CredentialSource::Inline(json) => {
                info!("Reading credentials from environment variable...");
                Ok(json)
            }
        }
    }
}

impl CredentialsClient for GcpCredentialsClient {
    #[instrument(skip(self), fields(keyfile = %self.keyfile_path.display()))]
    async fn init(&self) -> Result<()> {
        info!("Initializing credentials...");

        let source = self.resolve_source()?;
        let content = self.read_source(source).await?;
        let keyfile = service_account_keyfile(&content)?;

        store_keyfile(&keyfile, &self.keyfile_path).await?;

        if let Some(email) = client_email(&keyfile) {
            debug!("Stored keyfile for service account {} on disk", email);
        }

        Ok(())
    }
}

/// Parse the injected credentials and return the first record's keyfile
pub fn service_account_keyfile(json: &str) -> Result<String> {
    debug!("Unmarshalling injected gcp-infra credentials...");

    let credentials: Vec<GcpInfraCredential> = serde_json::from_str(json)?;
    let Some(credential) = credentials.into_iter().next() else {
        return Err(ExtensionError::Credentials(
            "no gcp-infra credentials injected".to_string(),
        ));
    };

    if credential.service_account_keyfile().is_empty() {
        return Err(ExtensionError::Credentials(format!(
            "credential '{}' has no serviceAccountKeyfile",
            credential.name
        )));
    }

    Ok(credential.additional_properties.service_account_keyfile)
}

/// Write the keyfile readable by the owner only
async fn store_keyfile(keyfile: &str, path: &Path) -> Result<()> {
    debug!("Storing gcp-infra credential service account keyfile on disk...");

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(keyfile.as_bytes()).await?;
    file.flush().await?;

    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }

    Ok(())
}

fn client_email(keyfile: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(keyfile)
        .ok()?
        .get("client_email")?
        .as_str()
        .map(|s| s.to_string())
}
