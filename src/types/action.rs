// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::ExtensionError;
use std::fmt;
use std::str::FromStr;

/// Helmfile action executed by the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Lint,
    Diff,
    Apply,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Lint, Action::Diff, Action::Apply];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Lint => "lint",
            Action::Diff => "diff",
            Action::Apply => "apply",
        }
    }

    /// Whether the action talks to the kind host and therefore needs a kubeconfig
    pub fn requires_cluster(&self) -> bool {
        matches!(self, Action::Diff | Action::Apply)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ExtensionError::UnsupportedAction(s.to_string()))
    }
}
