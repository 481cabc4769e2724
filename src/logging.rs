// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log output format, selected through ESTAFETTE_LOG_FORMAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Plaintext,
    Console,
    #[value(aliases = ["stackdriver", "v3"])]
    Json,
}

/// Initialize tracing; RUST_LOG takes precedence over the configured level
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Plaintext => builder.init(),
        LogFormat::Console => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
