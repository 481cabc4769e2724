// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Failed to parse injected credentials: {0}")]
    CredentialsParse(#[from] serde_json::Error),

    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Kind host not ready after {0:?}")]
    ReadinessTimeout(Duration),

    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("Action {0} is not supported")]
    UnsupportedAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
