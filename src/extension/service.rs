// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::clients::{CredentialsClient, HelmfileClient, KindClient};
use crate::error::Result;
use crate::types::Action;
use std::time::Duration;
use tracing::{info, instrument};

/// Runs an action by calling the clients in the order the action needs
pub struct ExtensionService<C, K, H> {
    credentials: C,
    kind: K,
    helmfile: H,
    readiness_timeout: Option<Duration>,
}

impl<C, K, H> ExtensionService<C, K, H>
where
    C: CredentialsClient,
    K: KindClient,
    H: HelmfileClient,
{
    pub fn new(credentials: C, kind: K, helmfile: H, readiness_timeout: Option<Duration>) -> Self {
        Self {
            credentials,
            kind,
            helmfile,
            readiness_timeout,
        }
    }

    /// Parse and run an action; unknown actions are an error
    pub async fn execute_action(&self, action: &str) -> Result<()> {
        let action: Action = action.parse()?;
        self.run(action).await
    }

    #[instrument(skip(self))]
    pub async fn run(&self, action: Action) -> Result<()> {
        info!("Executing action {}", action);

        // extract credentials and write them to GOOGLE_APPLICATION_CREDENTIALS
        self.credentials.init().await?;

        if action.requires_cluster() {
            self.init_kind_host().await?;
        }

        match action {
            Action::Lint => self.helmfile.lint().await,
            Action::Diff => self.helmfile.diff().await,
            Action::Apply => self.helmfile.apply().await,
        }
    }

    async fn init_kind_host(&self) -> Result<()> {
        self.kind.wait_for_readiness(self.readiness_timeout).await?;
        self.kind.prepare_kube_config().await
    }
}
