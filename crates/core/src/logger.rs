// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger contract and built-in implementations
//!
//! The bus reports dispatch activity through an injected [`Logger`]. The
//! default [`TracingLogger`] forwards to `tracing`, so whatever subscriber
//! the host installs (a console `fmt` layer in the simplest case) sees it.

use async_trait::async_trait;
use std::error::Error as StdError;

/// Structured key/value pairs attached to a log line
pub type LogFields<'a> = &'a [(&'static str, String)];

/// Error value optionally attached to `error` and `fatal` lines
pub type LogError<'a> = Option<&'a (dyn StdError + Send + Sync)>;

/// Logging capability consumed by the dispatch core
///
/// All five levels are required by the trait, so a logger missing one cannot
/// be handed to a bus. Return values are never consumed.
#[async_trait]
pub trait Logger: Send + Sync + 'static {
    async fn info(&self, message: &str, fields: LogFields<'_>);

    async fn warn(&self, message: &str, fields: LogFields<'_>);

    async fn error(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>);

    async fn fatal(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>);

    async fn debug(&self, message: &str, fields: LogFields<'_>);
}

/// Render fields as `key=value` pairs for a single tracing field
pub(crate) fn render_fields(fields: LogFields<'_>) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Logger that forwards to `tracing` (the zero-configuration default)
#[derive(Clone, Debug, Default)]
pub struct TracingLogger;

#[async_trait]
impl Logger for TracingLogger {
    async fn info(&self, message: &str, fields: LogFields<'_>) {
        tracing::info!(fields = %render_fields(fields), "{}", message);
    }

    async fn warn(&self, message: &str, fields: LogFields<'_>) {
        tracing::warn!(fields = %render_fields(fields), "{}", message);
    }

    async fn error(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>) {
        match error {
            Some(e) => tracing::error!(error = %e, fields = %render_fields(fields), "{}", message),
            None => tracing::error!(fields = %render_fields(fields), "{}", message),
        }
    }

    async fn fatal(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>) {
        // tracing has no level above error
        match error {
            Some(e) => tracing::error!(
                fatal = true,
                error = %e,
                fields = %render_fields(fields),
                "{}",
                message
            ),
            None => tracing::error!(fatal = true, fields = %render_fields(fields), "{}", message),
        }
    }

    async fn debug(&self, message: &str, fields: LogFields<'_>) {
        tracing::debug!(fields = %render_fields(fields), "{}", message);
    }
}

/// Logger that discards everything
#[derive(Clone, Debug, Default)]
pub struct NoOpLogger;

#[async_trait]
impl Logger for NoOpLogger {
    async fn info(&self, _message: &str, _fields: LogFields<'_>) {}

    async fn warn(&self, _message: &str, _fields: LogFields<'_>) {}

    async fn error(&self, _message: &str, _error: LogError<'_>, _fields: LogFields<'_>) {}

    async fn fatal(&self, _message: &str, _error: LogError<'_>, _fields: LogFields<'_>) {}

    async fn debug(&self, _message: &str, _fields: LogFields<'_>) {}
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
