// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription registry
//!
//! Subscriptions are indexed three ways so that a publish only evaluates
//! patterns that genuinely need it:
//! - exact patterns: hash lookup on the event type
//! - the global `*` pattern: always matches, no evaluation
//! - other wildcard patterns: one match per distinct pattern, in the order
//!   the patterns were first registered
//!
//! All operations are synchronous; the bus holds the registry behind a lock
//! that is never held across an await.

use super::pattern::PatternKind;
use super::subscription::{Subscription, SubscriptionId};
use std::collections::HashMap;

#[derive(Default)]
pub struct SubscriptionRegistry {
    exact: HashMap<String, Vec<Subscription>>,
    global: Vec<Subscription>,
    wildcard: HashMap<String, Vec<Subscription>>,
    /// Distinct wildcard patterns in first-registration order
    wildcard_order: Vec<String>,
    total: usize,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a subscription in the index for its pattern kind
    pub fn add(&mut self, subscription: Subscription) {
        let key = subscription.pattern.as_str().to_string();
        match subscription.pattern.kind() {
            PatternKind::Exact => self.exact.entry(key).or_default().push(subscription),
            PatternKind::Global => self.global.push(subscription),
            PatternKind::Wildcard => {
                if !self.wildcard.contains_key(&key) {
                    self.wildcard_order.push(key.clone());
                }
                self.wildcard.entry(key).or_default().push(subscription);
            }
        }
        self.total += 1;
    }

    /// Remove a subscription by id from its pattern's bucket
    ///
    /// Returns false if the pattern has no bucket or the id is not in it.
    /// Empty buckets are dropped.
    pub fn remove(&mut self, subscription: &Subscription) -> bool {
        let key = subscription.pattern.as_str();
        let removed = match subscription.pattern.kind() {
            PatternKind::Exact => remove_from_bucket(&mut self.exact, key, &subscription.id),
            PatternKind::Global => remove_by_id(&mut self.global, &subscription.id),
            PatternKind::Wildcard => {
                let removed = remove_from_bucket(&mut self.wildcard, key, &subscription.id);
                if removed && !self.wildcard.contains_key(key) {
                    self.wildcard_order.retain(|p| p != key);
                }
                removed
            }
        };
        if removed {
            self.total -= 1;
        }
        removed
    }

    /// All subscriptions whose pattern matches the event type
    ///
    /// Ordered exact, then global, then wildcard (by pattern registration
    /// order); within a bucket, by subscription order.
    pub fn find_matching(&self, event_type: &str) -> Vec<Subscription> {
        let mut matched = Vec::new();

        if let Some(bucket) = self.exact.get(event_type) {
            matched.extend(bucket.iter().cloned());
        }

        matched.extend(self.global.iter().cloned());

        for pattern in &self.wildcard_order {
            let Some(bucket) = self.wildcard.get(pattern) else {
                continue;
            };
            // Every subscription in a bucket shares the same pattern
            if bucket.first().is_some_and(|s| s.matches(event_type)) {
                matched.extend(bucket.iter().cloned());
            }
        }

        matched
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn has_subscriptions(&self) -> bool {
        self.total > 0
    }

    /// Distinct patterns with at least one subscription
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self.exact.keys().cloned().collect();
        patterns.sort();
        if !self.global.is_empty() {
            patterns.push("*".to_string());
        }
        patterns.extend(self.wildcard_order.iter().cloned());
        patterns
    }

    /// Number of subscriptions registered under a normalized pattern
    pub fn count_for(&self, pattern: &str) -> usize {
        if pattern == "*" {
            return self.global.len();
        }
        self.exact
            .get(pattern)
            .or_else(|| self.wildcard.get(pattern))
            .map_or(0, Vec::len)
    }
}

fn remove_from_bucket(
    buckets: &mut HashMap<String, Vec<Subscription>>,
    key: &str,
    id: &SubscriptionId,
) -> bool {
    let Some(bucket) = buckets.get_mut(key) else {
        return false;
    };
    let removed = remove_by_id(bucket, id);
    if bucket.is_empty() {
        buckets.remove(key);
    }
    removed
}

fn remove_by_id(bucket: &mut Vec<Subscription>, id: &SubscriptionId) -> bool {
    match bucket.iter().position(|s| &s.id == id) {
        Some(index) => {
            bucket.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
