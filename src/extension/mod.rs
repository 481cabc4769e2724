// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Action dispatch: sequences credentials, kind host and helmfile per action.

pub mod service;

pub use service::ExtensionService;
