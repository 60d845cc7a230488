// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscriber notification engine
//!
//! Each matched subscription gets its own retry loop, spawned as a separate
//! task so a failing or slow handler never holds up its peers. The loops are
//! joined into one [`PublishResult`], optionally under an overall timeout.
//! On timeout the loops are detached, not cancelled: they run to completion
//! but can no longer change the outcome already returned.

use super::subscription::{EventContext, HandlerError, Subscription, SubscriptionId};
use crate::clock::Clock;
use crate::error::BusError;
use crate::event::Event;
use crate::logger::Logger;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed-delay retry settings applied to every handler
///
/// A handler is attempted at most `1 + max_retries` times with the same
/// pause between attempts. Backoff curves are not applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Whether a failed attempt (1-based) earns another one
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }
}

/// Per-publish options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Upper bound on the time all handlers (retries included) may take
    pub timeout: Option<Duration>,
}

impl PublishOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// A subscription whose handler never succeeded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerFailure {
    pub subscription_id: SubscriptionId,
    pub attempts: u32,
    /// Error from the final attempt
    pub error: HandlerError,
}

/// Outcome of one publish call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishResult {
    pub event_id: String,
    /// True iff no handler failed after exhausting its retries
    pub success: bool,
    pub published_at: DateTime<Utc>,
    /// Number of subscriptions matched (and attempted)
    pub subscribers_notified: usize,
    pub failed_handlers: Vec<SubscriptionId>,
    /// Attempts beyond the first, summed over all handlers
    pub total_retries: u32,
    pub failures: Vec<HandlerFailure>,
}

impl PublishResult {
    fn empty(event_id: String, published_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            success: true,
            published_at,
            subscribers_notified: 0,
            failed_handlers: Vec::new(),
            total_retries: 0,
            failures: Vec::new(),
        }
    }

    /// Whether some but not all handlers failed
    pub fn is_partial(&self) -> bool {
        !self.failed_handlers.is_empty() && self.failed_handlers.len() < self.subscribers_notified
    }
}

/// Result of one subscription's retry loop
#[derive(Debug)]
struct DeliveryOutcome {
    subscription_id: SubscriptionId,
    attempts: u32,
    error: Option<HandlerError>,
}

impl DeliveryOutcome {
    /// Outcome for a task that ended without reporting back
    fn aborted(
        subscription_id: SubscriptionId,
        attempts: u32,
        join_error: tokio::task::JoinError,
    ) -> Self {
        Self {
            subscription_id,
            attempts: attempts.max(1),
            error: Some(HandlerError::new(format!(
                "handler task aborted: {}",
                join_error
            ))),
        }
    }
}

/// One subscription's retry loop, owned by its task
struct Delivery<C: Clock> {
    subscription: Subscription,
    event: Arc<Event>,
    policy: RetryPolicy,
    logger: Option<Arc<dyn Logger>>,
    clock: C,
    /// Attempts started so far, readable if the task dies
    attempts: Arc<AtomicU32>,
}

impl<C: Clock> Delivery<C> {
    async fn run(self) -> DeliveryOutcome {
        let mut attempt: u32 = 1;
        loop {
            self.attempts.store(attempt, Ordering::SeqCst);
            let ctx = EventContext {
                subscription: self.subscription.to_ref(),
                attempt,
                timestamp: self.clock.now(),
            };

            let result = AssertUnwindSafe(
                self.subscription
                    .handler
                    .handle(Arc::clone(&self.event), ctx),
            )
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(HandlerError::panicked(payload.as_ref())));

            match result {
                Ok(()) => {
                    if attempt > 1 {
                        if let Some(logger) = &self.logger {
                            logger
                                .info("handler succeeded after retry", &self.fields(attempt))
                                .await;
                        }
                    }
                    return self.outcome(attempt, None);
                }
                Err(error) => {
                    if let Some(logger) = &self.logger {
                        let mut fields = self.fields(attempt);
                        fields.push(("error", error.to_string()));
                        logger.warn("handler attempt failed", &fields).await;
                    }

                    if !self.policy.allows_retry(attempt) {
                        if let Some(logger) = &self.logger {
                            logger
                                .error(
                                    "handler failed after exhausting retries",
                                    Some(&error),
                                    &self.fields(attempt),
                                )
                                .await;
                        }
                        return self.outcome(attempt, Some(error));
                    }

                    if !self.policy.retry_delay.is_zero() {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn fields(&self, attempt: u32) -> Vec<(&'static str, String)> {
        vec![
            ("event_id", self.event.event_id.clone()),
            ("event_type", self.event.event_type.clone()),
            ("subscription_id", self.subscription.id.to_string()),
            ("attempt", attempt.to_string()),
        ]
    }

    fn outcome(&self, attempts: u32, error: Option<HandlerError>) -> DeliveryOutcome {
        DeliveryOutcome {
            subscription_id: self.subscription.id.clone(),
            attempts,
            error,
        }
    }
}

/// Delivers one event to a snapshot of subscriptions
pub struct Notifier<C: Clock> {
    policy: RetryPolicy,
    logger: Arc<dyn Logger>,
    logging: bool,
    clock: C,
}

impl<C: Clock> Notifier<C> {
    pub fn new(policy: RetryPolicy, logger: Arc<dyn Logger>, logging: bool, clock: C) -> Self {
        Self {
            policy,
            logger,
            logging,
            clock,
        }
    }

    /// Run every subscription's retry loop and aggregate the outcome
    ///
    /// Handler failures are reported in the result; only the timeout
    /// surfaces as an error.
    pub async fn notify(
        &self,
        event: Arc<Event>,
        subscriptions: Vec<Subscription>,
        options: PublishOptions,
    ) -> Result<PublishResult, BusError> {
        if subscriptions.is_empty() {
            return Ok(PublishResult::empty(
                event.event_id.clone(),
                self.clock.now(),
            ));
        }

        let total = subscriptions.len();
        let event_fields = [
            ("event_id", event.event_id.clone()),
            ("event_type", event.event_type.clone()),
            ("subscribers", total.to_string()),
        ];
        if self.logging {
            self.logger.debug("notifying subscribers", &event_fields).await;
        }

        let completed = Arc::new(AtomicUsize::new(0));
        let progress: Vec<(SubscriptionId, Arc<AtomicU32>)> = subscriptions
            .iter()
            .map(|s| (s.id.clone(), Arc::new(AtomicU32::new(0))))
            .collect();
        let handles: Vec<_> = subscriptions
            .into_iter()
            .zip(&progress)
            .map(|(subscription, (_, attempts))| {
                let delivery = Delivery {
                    subscription,
                    event: Arc::clone(&event),
                    policy: self.policy,
                    logger: self.logging.then(|| Arc::clone(&self.logger)),
                    clock: self.clock.clone(),
                    attempts: Arc::clone(attempts),
                };
                let completed = Arc::clone(&completed);
                tokio::spawn(async move {
                    let outcome = delivery.run().await;
                    completed.fetch_add(1, Ordering::SeqCst);
                    outcome
                })
            })
            .collect();

        let joined = join_all(handles);
        let results = match options.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, joined).await {
                Ok(results) => results,
                Err(_) => {
                    let completed_handlers = completed.load(Ordering::SeqCst);
                    if self.logging {
                        let mut fields = event_fields.to_vec();
                        fields.push(("timeout_ms", timeout.as_millis().to_string()));
                        fields.push(("completed_handlers", completed_handlers.to_string()));
                        self.logger.error("publish timed out", None, &fields).await;
                    }
                    return Err(BusError::Timeout {
                        event_id: event.event_id.clone(),
                        timeout,
                        completed_handlers,
                        total_handlers: total,
                    });
                }
            },
            None => joined.await,
        };

        let outcomes = results.into_iter().zip(progress).map(|(result, (id, attempts))| {
            result.unwrap_or_else(|join_error| {
                DeliveryOutcome::aborted(id, attempts.load(Ordering::SeqCst), join_error)
            })
        });

        let mut total_retries = 0;
        let mut failures = Vec::new();
        for outcome in outcomes {
            total_retries += outcome.attempts.saturating_sub(1);
            if let Some(error) = outcome.error {
                failures.push(HandlerFailure {
                    subscription_id: outcome.subscription_id,
                    attempts: outcome.attempts,
                    error,
                });
            }
        }

        let failed_handlers: Vec<SubscriptionId> =
            failures.iter().map(|f| f.subscription_id.clone()).collect();

        Ok(PublishResult {
            event_id: event.event_id.clone(),
            success: failed_handlers.is_empty(),
            published_at: self.clock.now(),
            subscribers_notified: total,
            failed_handlers,
            total_retries,
            failures,
        })
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
