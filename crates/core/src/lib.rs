// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! evd-core: in-process publish/subscribe event dispatch
//!
//! This crate provides:
//! - Event model and enrichment of partially specified events
//! - Dotted-pattern subscriptions with `*` wildcards
//! - Concurrent delivery with per-handler retries and a publish timeout
//! - Pluggable logger and validator seams

pub mod clock;
pub mod config;
pub mod enrich;
pub mod error;
pub mod event;
pub mod events;
pub mod id;
pub mod logger;
pub mod validator;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{BusConfig, ConfigError, MAX_RETRIES_LIMIT, RETRY_DELAY_LIMIT};
pub use enrich::{enrich, DEFAULT_VERSION};
pub use error::BusError;
pub use event::{Event, EventMetadata, PartialEvent, PartialMetadata, Priority};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use logger::{LogError, LogFields, Logger, NoOpLogger, TracingLogger};
pub use validator::{EventValidator, SchemaValidator, ValidationReport, ValidatorError};

pub use events::{
    handler_fn, EventBus, EventContext, EventPattern, Handler, HandlerError, HandlerFailure,
    HandlerResult, PatternError, PatternKind, PublishOptions, PublishResult, RetryPolicy,
    Subscription, SubscriptionConfig, SubscriptionId, SubscriptionRef,
};
