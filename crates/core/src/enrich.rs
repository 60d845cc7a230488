// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event enrichment
//!
//! Fills generated or default values into the fields a producer left unset.
//! Enrichment is additive: a caller-supplied value is never replaced.

use crate::clock::Clock;
use crate::event::{Event, EventMetadata, PartialEvent};
use crate::id::IdGen;
use serde_json::Value;

/// Schema version assigned to events published without one
pub const DEFAULT_VERSION: &str = "1.0";

/// Enrich a partial event into a complete one
///
/// `event_id` is drawn from `ids` and `timestamp` from `clock` only when
/// absent. Supplied metadata is merged field by field, so a caller that only
/// sets tags still gets the default priority and retry count.
///
/// Missing `event_type`, `source` and `data` are not invented here; they
/// enrich to empty values that schema validation rejects.
pub fn enrich<C: Clock, G: IdGen>(partial: PartialEvent, clock: &C, ids: &G) -> Event {
    let PartialEvent {
        event_id,
        event_type,
        timestamp,
        source,
        version,
        data,
        correlation_id,
        metadata,
    } = partial;

    let metadata = metadata.unwrap_or_default();

    Event {
        event_id: event_id.unwrap_or_else(|| ids.next()),
        event_type: event_type.unwrap_or_default(),
        timestamp: timestamp.unwrap_or_else(|| clock.now_iso()),
        source: source.unwrap_or_default(),
        version: version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        data: data.unwrap_or(Value::Null),
        correlation_id,
        metadata: EventMetadata {
            retry_count: metadata.retry_count.unwrap_or(0),
            priority: metadata.priority.unwrap_or_default(),
            tags: metadata.tags,
        },
    }
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
