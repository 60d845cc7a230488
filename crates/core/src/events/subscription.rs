// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriptions and the handler contract

use super::pattern::EventPattern;
use crate::event::Event;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Subscription handle for unsubscribing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub String);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure reported by a handler attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrap any error as a handler failure
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(error.to_string())
    }

    pub(crate) fn panicked(payload: &(dyn std::any::Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::new(format!("handler panicked: {}", detail))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Outcome of one handler attempt
pub type HandlerResult = Result<(), HandlerError>;

/// The `{id, pattern}` view of a subscription handed to its handler
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionRef {
    pub id: SubscriptionId,
    pub pattern: EventPattern,
}

/// Per-invocation context passed alongside the event
#[derive(Clone, Debug)]
pub struct EventContext {
    pub subscription: SubscriptionRef,
    /// 1-based attempt number within this handler's retry sequence
    pub attempt: u32,
    /// When this attempt started
    pub timestamp: DateTime<Utc>,
}

/// Receives events for a subscription
///
/// Any `Fn(Arc<Event>, EventContext) -> impl Future<Output = HandlerResult>`
/// closure is a handler. Returning `Err` (or panicking) marks the attempt
/// as failed and makes it eligible for retry.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, event: Arc<Event>, ctx: EventContext) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Arc<Event>, EventContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, event: Arc<Event>, ctx: EventContext) -> HandlerResult {
        (self)(event, ctx).await
    }
}

/// Box a closure as a shareable handler
///
/// The direct `Fn` bound lets closure argument and return types be inferred.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Arc<Event>, EventContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(f)
}

/// Reserved per-subscription settings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionConfig {
    pub description: Option<String>,
}

impl SubscriptionConfig {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }
}

/// A standing registration of a handler under a pattern
#[derive(Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub pattern: EventPattern,
    pub handler: Arc<dyn Handler>,
    pub config: SubscriptionConfig,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        pattern: EventPattern,
        handler: Arc<dyn Handler>,
        config: SubscriptionConfig,
    ) -> Self {
        Self {
            id: SubscriptionId(id.into()),
            pattern,
            handler,
            config,
        }
    }

    /// Check if this subscription's pattern matches the event type
    pub fn matches(&self, event_type: &str) -> bool {
        self.pattern.matches(event_type)
    }

    pub fn to_ref(&self) -> SubscriptionRef {
        SubscriptionRef {
            id: self.id.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
