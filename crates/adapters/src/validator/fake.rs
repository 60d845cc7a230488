// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake validator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use evd_core::event::Event;
use evd_core::validator::{EventValidator, ValidationReport, ValidatorError};
use std::sync::{Arc, Mutex};

/// Recorded validation request
#[derive(Debug, Clone)]
pub struct ValidateCall {
    pub event_id: String,
    pub event_type: String,
}

#[derive(Debug, Clone, Default)]
enum Verdict {
    #[default]
    Accept,
    Reject(Vec<String>),
    Unavailable(String),
}

/// Fake validator with a scripted verdict
#[derive(Clone, Default)]
pub struct FakeValidator {
    verdict: Arc<Mutex<Verdict>>,
    calls: Arc<Mutex<Vec<ValidateCall>>>,
}

impl FakeValidator {
    /// Create a validator that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every later event as invalid with these errors
    pub fn reject_with(&self, errors: Vec<String>) {
        *self.verdict.lock().unwrap_or_else(|e| e.into_inner()) = Verdict::Reject(errors);
    }

    /// Fail every later validation with `ValidatorError::Unavailable`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.verdict.lock().unwrap_or_else(|e| e.into_inner()) =
            Verdict::Unavailable(message.into());
    }

    pub fn accept(&self) {
        *self.verdict.lock().unwrap_or_else(|e| e.into_inner()) = Verdict::Accept;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ValidateCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl EventValidator for FakeValidator {
    async fn validate(&self, event: &Event) -> Result<ValidationReport, ValidatorError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ValidateCall {
                event_id: event.event_id.clone(),
                event_type: event.event_type.clone(),
            });

        let verdict = self.verdict.lock().unwrap_or_else(|e| e.into_inner()).clone();
        match verdict {
            Verdict::Accept => Ok(ValidationReport::valid()),
            Verdict::Reject(errors) => Ok(ValidationReport::invalid(errors)),
            Verdict::Unavailable(message) => Err(ValidatorError::Unavailable(message)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
