// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use helmfile_extension::clients::{GcpCredentialsClient, HelmfileCommand, KindHostClient};
use helmfile_extension::config::Config;
use helmfile_extension::extension::ExtensionService;
use helmfile_extension::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    logging::init(&config.log_level, config.log_format);

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(config: Config) -> Result<()> {
    info!("Starting helmfile extension");
    config.tool_versions.log();

    let action = config.action;

    let credentials = GcpCredentialsClient::new(
        Some(config.credentials_path),
        config.credentials_json,
        config.service_account_keyfile_path,
    )
    .context("Failed creating credentials client")?;

    let kind = KindHostClient::new(config.kind_host, config.kubeconfig_path)
        .context("Failed creating kind client")?;

    let helmfile = HelmfileCommand::new(config.file, Some(config.log_level))
        .context("Failed creating helmfile client")?;

    let service = ExtensionService::new(credentials, kind, helmfile, config.readiness_timeout);

    // Dropping the action on a signal kills a running helmfile
    tokio::select! {
        result = service.execute_action(&action) => {
            result.with_context(|| format!("Failed executing action {}", action))?;
        }
        signal = shutdown_signal() => {
            warn!("Received {}, cancelling action {}", signal, action);
            bail!("Action {} cancelled by {}", action, signal);
        }
    }

    info!("Action {} finished", action);
    Ok(())
}

async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        signal = ctrl_c => signal,
        signal = terminate => signal,
    }
}
