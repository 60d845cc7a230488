// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Logger and validator implementations for the event bus

pub mod logger;
pub mod traced;
pub mod validator;

pub use traced::TracedValidator;
pub use validator::AcceptAllValidator;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use logger::{FakeLogger, LogCall, LogLevel};
#[cfg(any(test, feature = "test-support"))]
pub use validator::{FakeValidator, ValidateCall};
