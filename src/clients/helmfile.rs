// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helmfile command execution

use crate::constants::HELMFILE_BINARY;
use crate::error::{ExtensionError, Result};
use crate::types::Action;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, instrument};

#[allow(async_fn_in_trait)]
pub trait HelmfileClient {
    async fn lint(&self) -> Result<()>;
    async fn diff(&self) -> Result<()>;
    async fn apply(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HelmfileCommand {
    binary: String,
    file: String,
    log_level: Option<String>,
}

impl HelmfileCommand {
    pub fn new(file: impl Into<String>, log_level: Option<String>) -> Result<Self> {
        let file = file.into();
        if file.is_empty() {
            return Err(ExtensionError::Config("helmfile file is empty".to_string()));
        }

        Ok(Self {
            binary: HELMFILE_BINARY.to_string(),
            file,
            log_level: log_level
                .map(|l| l.to_lowercase())
                .filter(|l| !l.is_empty()),
        })
    }

    /// Run a different executable with the same arguments
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Arguments passed to helmfile for an action
    ///
    /// Executes: helmfile --file <file> [--log-level <level>] <action>
    pub fn args(&self, action: Action) -> Vec<String> {
        let mut args = vec!["--file".to_string(), self.file.clone()];
        if let Some(level) = &self.log_level {
            args.push("--log-level".to_string());
            args.push(level.clone());
        }
        args.push(action.as_str().to_string());
        args
    }

    #[instrument(skip(self), fields(file = %self.file))]
    async fn run(&self, action: Action) -> Result<()> {
        let args = self.args(action);
        let command_line = format!("{} {}", self.binary, args.join(" "));
        info!("> {}", command_line);

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| ExtensionError::Command {
                command: command_line.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ExtensionError::Command {
                command: command_line,
                message: status.to_string(),
            });
        }

        Ok(())
    }
}

impl HelmfileClient for HelmfileCommand {
    async fn lint(&self) -> Result<()> {
        self.run(Action::Lint).await
    }

    async fn diff(&self) -> Result<()> {
        self.run(Action::Diff).await
    }

    async fn apply(&self) -> Result<()> {
        self.run(Action::Apply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_per_action() {
        let helmfile = HelmfileCommand::new("helmfile.yaml", Some("info".to_string())).unwrap();

        assert_eq!(
            helmfile.args(Action::Lint),
            vec!["--file", "helmfile.yaml", "--log-level", "info", "lint"]
        );
        assert_eq!(
            helmfile.args(Action::Diff),
            vec!["--file", "helmfile.yaml", "--log-level", "info", "diff"]
        );
        assert_eq!(
            helmfile.args(Action::Apply),
            vec!["--file", "helmfile.yaml", "--log-level", "info", "apply"]
        );
    }

    #[test]
    fn test_args_without_log_level() {
        let helmfile = HelmfileCommand::new("deploy/helmfile.yaml", None).unwrap();

        assert_eq!(
            helmfile.args(Action::Apply),
            vec!["--file", "deploy/helmfile.yaml", "apply"]
        );
    }

    #[test]
    fn test_log_level_is_lowercased_and_empty_dropped() {
        let upper = HelmfileCommand::new("helmfile.yaml", Some("DEBUG".to_string())).unwrap();
        let empty = HelmfileCommand::new("helmfile.yaml", Some(String::new())).unwrap();

        assert_eq!(upper.args(Action::Lint)[3], "debug");
        assert_eq!(empty.args(Action::Lint), vec!["--file", "helmfile.yaml", "lint"]);
    }

    #[test]
    fn test_new_rejects_empty_file() {
        assert!(matches!(
            HelmfileCommand::new("", None),
            Err(ExtensionError::Config(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_command() {
        let helmfile = HelmfileCommand::new("helmfile.yaml", None)
            .unwrap()
            .with_binary("true");

        helmfile.lint().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_propagates_exit_status() {
        let helmfile = HelmfileCommand::new("helmfile.yaml", None)
            .unwrap()
            .with_binary("false");

        let err = helmfile.apply().await.unwrap_err();

        match err {
            ExtensionError::Command { command, .. } => {
                assert_eq!(command, "false --file helmfile.yaml apply");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_command_error() {
        let helmfile = HelmfileCommand::new("helmfile.yaml", None)
            .unwrap()
            .with_binary("helmfile-binary-that-does-not-exist");

        let err = helmfile.diff().await.unwrap_err();

        assert!(matches!(err, ExtensionError::Command { .. }));
    }
}
