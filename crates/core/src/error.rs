// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types surfaced by the event bus
//!
//! Handler failures are deliberately absent: they are contained per
//! subscription and reported through `PublishResult`.

use std::time::Duration;
use thiserror::Error;

/// Errors returned to callers of `subscribe` and `publish`
#[derive(Debug, Error)]
pub enum BusError {
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("event {event_id} failed validation: {}", errors.join("; "))]
    Validation {
        event_id: String,
        errors: Vec<String>,
    },
    #[error(
        "publish of event {event_id} timed out after {timeout:?} \
         ({completed_handlers}/{total_handlers} handlers completed)"
    )]
    Timeout {
        event_id: String,
        timeout: Duration,
        completed_handlers: usize,
        total_handlers: usize,
    },
}

impl BusError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BusError::Timeout { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BusError::Validation { .. })
    }
}
