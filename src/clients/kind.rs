// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kind host readiness polling and kubeconfig preparation

use crate::constants::kind::{
    CONFIG_PATH, LOCALHOST, POLL_INTERVAL_SECS, PORT, READY_PATH, REQUEST_TIMEOUT_SECS,
};
use crate::error::{ExtensionError, Result};
use bytes::Bytes;
use http::{StatusCode, Uri};
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use kube::config::Kubeconfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

#[allow(async_fn_in_trait)]
pub trait KindClient {
    /// Block until the kind host reports kubernetes as ready, or `timeout` elapses
    async fn wait_for_readiness(&self, timeout: Option<Duration>) -> Result<()>;

    /// Fetch the kind host's kubeconfig, point it at the host and store it
    async fn prepare_kube_config(&self) -> Result<()>;
}

pub struct KindHostClient {
    host: String,
    port: u16,
    kubeconfig_path: PathBuf,
    poll_interval: Duration,
    request_timeout: Duration,
    http: Client<HttpConnector, Empty<Bytes>>,
}

impl KindHostClient {
    pub fn new(host: impl Into<String>, kubeconfig_path: PathBuf) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(ExtensionError::Config("kind host is empty".to_string()));
        }

        Ok(Self {
            host,
            port: PORT,
            kubeconfig_path,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            http: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_intervals(mut self, poll_interval: Duration, request_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.request_timeout = request_timeout;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}:{}{}", self.host, self.port, path)
    }

    /// GET a path on the kind host, bounded by the request timeout
    async fn get(&self, path: &str) -> Result<(StatusCode, Bytes)> {
        let url = self.url(path);
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| ExtensionError::Http {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let request = async {
            let response = self.http.get(uri).await.map_err(|e| e.to_string())?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| e.to_string())?
                .to_bytes();
            Ok::<_, String>((status, body))
        };

        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(message)) => Err(ExtensionError::Http { url, message }),
            Err(_) => Err(ExtensionError::Http {
                url,
                message: format!("timed out after {:?}", self.request_timeout),
            }),
        }
    }

    async fn poll_until_ready(&self) {
        loop {
            match self.get(READY_PATH).await {
                Ok((status, _)) if status.is_success() => {
                    info!("Kind host {} is ready", self.host);
                    return;
                }
                Ok((status, _)) => {
                    debug!("Kind host not ready yet, status {}", status);
                }
                Err(e) => {
                    debug!("Kind host not reachable yet: {}", e);
                }
            }

            sleep(self.poll_interval).await;
        }
    }
}

impl KindClient for KindHostClient {
    #[instrument(skip(self), fields(host = %self.host))]
    async fn wait_for_readiness(&self, timeout: Option<Duration>) -> Result<()> {
        info!("Waiting for kind host to be ready...");

        match timeout {
            Some(limit) => tokio::time::timeout(limit, self.poll_until_ready())
                .await
                .map_err(|_| ExtensionError::ReadinessTimeout(limit)),
            None => {
                self.poll_until_ready().await;
                Ok(())
            }
        }
    }

    #[instrument(skip(self), fields(host = %self.host))]
    async fn prepare_kube_config(&self) -> Result<()> {
        info!("Preparing kind host for using Helm...");

        let (status, body) = self.get(CONFIG_PATH).await?;
        if status != StatusCode::OK {
            return Err(ExtensionError::UnexpectedStatus {
                url: self.url(CONFIG_PATH),
                status: status.as_u16(),
            });
        }

        let body = String::from_utf8(body.to_vec()).map_err(|e| ExtensionError::Http {
            url: self.url(CONFIG_PATH),
            message: format!("kubeconfig is not valid UTF-8: {}", e),
        })?;
        let kube_config = rewrite_kube_config(&body, &self.host);

        match kube_config_servers(&kube_config) {
            Ok(servers) => {
                for server in servers {
                    debug!("Kubeconfig cluster server: {}", server);
                }
            }
            Err(e) => warn!("Kubeconfig served by kind host does not parse: {}", e),
        }

        write_kube_config(&kube_config, &self.kubeconfig_path).await?;
        info!("Stored kubeconfig at {}", self.kubeconfig_path.display());

        Ok(())
    }
}

/// Replace every literal `localhost` with the kind host
pub fn rewrite_kube_config(kube_config: &str, host: &str) -> String {
    kube_config.replace(LOCALHOST, host)
}

/// Server URLs of the clusters named in a kubeconfig document
pub fn kube_config_servers(kube_config: &str) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    let parsed: Kubeconfig = serde_yaml::from_str(kube_config)?;

    Ok(parsed
        .clusters
        .into_iter()
        .filter_map(|c| c.cluster.and_then(|cluster| cluster.server))
        .collect())
}

async fn write_kube_config(kube_config: &str, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(path, kube_config).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644)).await?;
    }

    Ok(())
}
