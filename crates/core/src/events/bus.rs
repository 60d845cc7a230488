// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus: routes published events to matching subscribers
//!
//! Publishing runs enrich -> validate -> look up -> notify. Validation
//! failures stop the publish before any handler runs; handler failures are
//! reported in the returned [`PublishResult`].

use super::notifier::{Notifier, PublishOptions, PublishResult, RetryPolicy};
use super::pattern::EventPattern;
use super::registry::SubscriptionRegistry;
use super::subscription::{
    EventContext, Handler, HandlerResult, Subscription, SubscriptionConfig,
};
use crate::clock::{Clock, SystemClock};
use crate::config::{BusConfig, ConfigError};
use crate::enrich::enrich;
use crate::error::BusError;
use crate::event::{Event, PartialEvent};
use crate::id::{IdGen, SequentialIdGen, UuidIdGen};
use crate::logger::{Logger, TracingLogger};
use crate::validator::{EventValidator, SchemaValidator};
use std::future::Future;
use std::sync::{Arc, RwLock};

/// The event bus routes events to matching subscribers
pub struct EventBus<C: Clock = SystemClock, G: IdGen = UuidIdGen> {
    config: BusConfig,
    registry: Arc<RwLock<SubscriptionRegistry>>,
    subscription_ids: SequentialIdGen,
    logger: Arc<dyn Logger>,
    validator: Arc<dyn EventValidator>,
    clock: C,
    event_ids: G,
}

impl EventBus {
    /// Create a bus with the system clock and UUID event ids
    pub fn new(config: BusConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock, UuidIdGen)
    }
}

impl<C: Clock, G: IdGen> EventBus<C, G> {
    /// Create a bus with an explicit clock and event id source
    ///
    /// Fails if the retry settings are out of range. The logger defaults to
    /// [`TracingLogger`] and the validator to [`SchemaValidator`].
    pub fn with_clock(config: BusConfig, clock: C, event_ids: G) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Arc::new(RwLock::new(SubscriptionRegistry::new())),
            subscription_ids: SequentialIdGen::new("sub"),
            logger: Arc::new(TracingLogger),
            validator: Arc::new(SchemaValidator),
            clock,
            event_ids,
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn EventValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Register a closure for events matching `pattern`
    pub fn subscribe<F, Fut>(&self, pattern: &str, handler: F) -> Result<Subscription, BusError>
    where
        F: Fn(Arc<Event>, EventContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.subscribe_handler(pattern, Arc::new(handler), SubscriptionConfig::default())
    }

    /// Register a closure with per-subscription settings
    pub fn subscribe_with<F, Fut>(
        &self,
        pattern: &str,
        handler: F,
        config: SubscriptionConfig,
    ) -> Result<Subscription, BusError>
    where
        F: Fn(Arc<Event>, EventContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.subscribe_handler(pattern, Arc::new(handler), config)
    }

    /// Register any handler implementation
    ///
    /// The pattern is validated and normalized first; nothing is registered
    /// if it is rejected.
    pub fn subscribe_handler(
        &self,
        pattern: &str,
        handler: Arc<dyn Handler>,
        config: SubscriptionConfig,
    ) -> Result<Subscription, BusError> {
        let pattern = EventPattern::parse(pattern).map_err(|e| BusError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let subscription = Subscription::new(self.subscription_ids.next(), pattern, handler, config);

        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        registry.add(subscription.clone());
        drop(registry);

        tracing::debug!(
            subscription_id = %subscription.id,
            pattern = %subscription.pattern,
            "subscribed"
        );
        Ok(subscription)
    }

    /// Remove a subscription; false if it is not (or no longer) registered
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let removed = self
            .registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(subscription);
        tracing::debug!(subscription_id = %subscription.id, removed, "unsubscribe");
        removed
    }

    /// Publish an event with default options
    pub async fn publish(&self, partial: PartialEvent) -> Result<PublishResult, BusError> {
        self.publish_with(partial, PublishOptions::default()).await
    }

    /// Publish an event to all matching subscribers
    ///
    /// The subscriber list is snapshotted once, after validation; later
    /// subscribe/unsubscribe calls do not affect this publish.
    pub async fn publish_with(
        &self,
        partial: PartialEvent,
        options: PublishOptions,
    ) -> Result<PublishResult, BusError> {
        let event = enrich(partial, &self.clock, &self.event_ids);

        let errors = match self.validator.validate(&event).await {
            Ok(report) if report.is_valid => None,
            Ok(report) => Some(report.errors),
            Err(e) => Some(vec![e.to_string()]),
        };
        if let Some(errors) = errors {
            if self.config.enable_logging {
                let fields = [
                    ("event_id", event.event_id.clone()),
                    ("event_type", event.event_type.clone()),
                    ("errors", errors.join("; ")),
                ];
                self.logger.warn("event failed validation", &fields).await;
            }
            return Err(BusError::Validation {
                event_id: event.event_id,
                errors,
            });
        }

        let subscriptions = self
            .registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .find_matching(&event.event_type);

        let notifier = Notifier::new(
            RetryPolicy::new(self.config.max_retries, self.config.retry_delay),
            Arc::clone(&self.logger),
            self.config.enable_logging,
            self.clock.clone(),
        );
        notifier
            .notify(Arc::new(event), subscriptions, options)
            .await
    }

    /// Get count of active subscriptions
    pub fn subscription_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .total_count()
    }

    pub fn has_subscriptions(&self) -> bool {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .has_subscriptions()
    }

    /// Distinct patterns with at least one subscription
    pub fn patterns(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .patterns()
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::clone(&self.logger)
    }

    pub fn validator(&self) -> Arc<dyn EventValidator> {
        Arc::clone(&self.validator)
    }

    /// Copy of the bus configuration; changing it does not affect the bus
    pub fn config(&self) -> BusConfig {
        self.config.clone()
    }
}

impl<C: Clock, G: IdGen> Clone for EventBus<C, G> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            registry: Arc::clone(&self.registry),
            subscription_ids: self.subscription_ids.clone(),
            logger: Arc::clone(&self.logger),
            validator: Arc::clone(&self.validator),
            clock: self.clock.clone(),
            event_ids: self.event_ids.clone(),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
