// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Clients wrapping the external effects: credential files, the kind host and helmfile.

pub mod credentials;
pub mod helmfile;
pub mod kind;

pub use credentials::{CredentialSource, CredentialsClient, GcpCredentialsClient};
pub use helmfile::{HelmfileClient, HelmfileCommand};
pub use kind::{KindClient, KindHostClient};
