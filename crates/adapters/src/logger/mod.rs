// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger implementations
//!
//! `TracingLogger` and `NoOpLogger` live in `evd-core`; this module adds the
//! recording logger used by tests.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLogger, LogCall, LogLevel};
