// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern-routed publish/subscribe
//!
//! This module provides:
//! - `EventPattern` - Dotted event-type patterns with `*` wildcards
//! - `SubscriptionRegistry` - Subscriptions bucketed by pattern kind
//! - `Notifier` - Concurrent delivery with retries and an optional timeout
//! - `EventBus` - The public subscribe/publish surface

mod bus;
mod notifier;
mod pattern;
mod registry;
mod subscription;

pub use bus::EventBus;
pub use notifier::{HandlerFailure, Notifier, PublishOptions, PublishResult, RetryPolicy};
pub use pattern::{matches, EventPattern, PatternError, PatternKind};
pub use registry::SubscriptionRegistry;
pub use subscription::{
    handler_fn, EventContext, Handler, HandlerError, HandlerResult, Subscription,
    SubscriptionConfig, SubscriptionId, SubscriptionRef,
};
