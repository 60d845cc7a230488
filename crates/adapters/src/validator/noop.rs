// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validator that accepts every event.

use async_trait::async_trait;
use evd_core::event::Event;
use evd_core::validator::{EventValidator, ValidationReport, ValidatorError};

/// Validator that does nothing.
///
/// Used when publishers are trusted and schema checks are disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllValidator;

impl AcceptAllValidator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventValidator for AcceptAllValidator {
    async fn validate(&self, _event: &Event) -> Result<ValidationReport, ValidatorError> {
        Ok(ValidationReport::valid())
    }
}
