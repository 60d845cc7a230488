// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event validation contract and the built-in schema validator
//!
//! The bus validates every enriched event before any handler runs. A
//! validator may reject an event either by returning a report with
//! `is_valid == false` or by returning a [`ValidatorError`].

use crate::event::Event;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regexes are constant and known to be valid
#[allow(clippy::expect_used)]
static EVENT_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]*(\.[a-zA-Z0-9][a-zA-Z0-9-]*)+$")
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)$").expect("constant regex pattern is valid")
});

/// Outcome of validating one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::valid()
        } else {
            Self::invalid(errors)
        }
    }
}

/// Hard failure raised by a validator instead of returning a report
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("event rejected: {0}")]
    Rejected(String),
    #[error("validator unavailable: {0}")]
    Unavailable(String),
}

/// Validation capability consumed by the dispatch core
#[async_trait]
pub trait EventValidator: Send + Sync + 'static {
    async fn validate(&self, event: &Event) -> Result<ValidationReport, ValidatorError>;
}

/// Validates events against the documented event schema
///
/// Collects every violation rather than stopping at the first one.
#[derive(Clone, Debug, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Synchronous core of [`EventValidator::validate`]
    pub fn check(&self, event: &Event) -> ValidationReport {
        let mut errors = Vec::new();

        require(&mut errors, "eventId", &event.event_id);
        require(&mut errors, "eventType", &event.event_type);
        require(&mut errors, "timestamp", &event.timestamp);
        require(&mut errors, "source", &event.source);
        require(&mut errors, "version", &event.version);

        if !event.event_type.is_empty() && !EVENT_TYPE_PATTERN.is_match(&event.event_type) {
            errors.push(format!(
                "eventType '{}' must be dot-delimited alphanumeric segments",
                event.event_type
            ));
        }

        if !event.timestamp.is_empty()
            && chrono::DateTime::parse_from_rfc3339(&event.timestamp).is_err()
        {
            errors.push(format!(
                "timestamp '{}' is not an ISO-8601 date-time",
                event.timestamp
            ));
        }

        if !event.version.is_empty() && !VERSION_PATTERN.is_match(&event.version) {
            errors.push(format!(
                "version '{}' must match major.minor",
                event.version
            ));
        }

        if event.data.is_null() {
            errors.push("missing required field: data".to_string());
        } else if !event.has_object_data() {
            errors.push("data must be an object".to_string());
        }

        ValidationReport::from_errors(errors)
    }
}

fn require(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(format!("missing required field: {}", field));
    }
}

#[async_trait]
impl EventValidator for SchemaValidator {
    async fn validate(&self, event: &Event) -> Result<ValidationReport, ValidatorError> {
        Ok(self.check(event))
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
