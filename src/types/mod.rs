// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types: the dispatched action and the injected credential records.

pub mod action;
pub mod credentials;

pub use action::Action;
pub use credentials::{GcpInfraCredential, GcpInfraCredentialProperties};
