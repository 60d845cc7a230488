// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced validator wrapper for consistent observability

use async_trait::async_trait;
use evd_core::event::Event;
use evd_core::validator::{EventValidator, ValidationReport, ValidatorError};
use tracing::Instrument;

/// Wrapper that adds tracing to any EventValidator
#[derive(Clone, Debug)]
pub struct TracedValidator<V> {
    inner: V,
}

impl<V> TracedValidator<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

#[async_trait]
impl<V: EventValidator> EventValidator for TracedValidator<V> {
    async fn validate(&self, event: &Event) -> Result<ValidationReport, ValidatorError> {
        let span = tracing::info_span!(
            "validator.validate",
            event_id = %event.event_id,
            event_type = %event.event_type,
        );

        async {
            tracing::debug!(source = %event.source, "validating");

            let start = std::time::Instant::now();
            let result = self.inner.validate(event).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(report) if report.is_valid => tracing::info!(elapsed_ms, "event valid"),
                Ok(report) => tracing::warn!(
                    elapsed_ms,
                    error_count = report.errors.len(),
                    errors = %report.errors.join("; "),
                    "event invalid"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "validator failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
