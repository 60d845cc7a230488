// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern validation, normalization and matching
//!
//! Patterns are dot-delimited like event types:
//!   - Exact: "Order.Paid" matches only "Order.Paid"
//!   - Global: "*" matches every event type
//!   - Inner wildcard: "*.Ended" or "User.*.Service.*" - a non-final `*`
//!     consumes exactly one segment
//!   - Trailing wildcard: "User.*" matches "User.Created" and
//!     "User.Profile.Updated" - a final `*` consumes one or more segments

use std::fmt;

/// Characters that may never appear in a pattern
const FORBIDDEN_CHARS: &[char] = &['/', '?', '[', ']', '{', '}', '@', '#'];

/// How a pattern is indexed by the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// No wildcard; matched by string equality
    Exact,
    /// The bare `*` pattern
    Global,
    /// Contains at least one `*` segment
    Wildcard,
}

/// Why a pattern was rejected
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    Empty,
    ForbiddenChar(char),
    DoubleWildcard,
    LeadingWildcard,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "pattern must not be empty"),
            PatternError::ForbiddenChar(c) => write!(f, "pattern contains forbidden character '{}'", c),
            PatternError::DoubleWildcard => write!(f, "'**' is not supported"),
            PatternError::LeadingWildcard => {
                write!(f, "a leading '*' must be the whole pattern or be followed by '.'")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A validated, normalized subscription pattern
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventPattern(String);

impl EventPattern {
    /// Validate and normalize a raw pattern
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        check(pattern)?;
        Ok(Self(Self::normalize(pattern)))
    }

    /// Whether a raw pattern is acceptable for subscription
    pub fn is_valid(pattern: &str) -> bool {
        check(pattern).is_ok()
    }

    /// Trim surrounding whitespace and collapse runs of dots
    ///
    /// Case is preserved. Normalizing twice yields the same string.
    pub fn normalize(pattern: &str) -> String {
        let mut normalized = String::with_capacity(pattern.len());
        for c in pattern.trim().chars() {
            if c == '.' && normalized.ends_with('.') {
                continue;
            }
            normalized.push(c);
        }
        normalized
    }

    pub fn kind(&self) -> PatternKind {
        if self.0 == "*" {
            PatternKind::Global
        } else if self.0.contains('*') {
            PatternKind::Wildcard
        } else {
            PatternKind::Exact
        }
    }

    /// Check if this pattern matches an event type
    pub fn matches(&self, event_type: &str) -> bool {
        if event_type.is_empty() {
            return false;
        }

        match self.kind() {
            PatternKind::Global => true,
            PatternKind::Exact => self.0 == event_type,
            PatternKind::Wildcard => {
                let pattern_parts: Vec<&str> = self.0.split('.').collect();
                let event_parts: Vec<&str> = event_type.split('.').collect();
                Self::match_segments(&pattern_parts, &event_parts)
            }
        }
    }

    fn match_segments(pattern: &[&str], event: &[&str]) -> bool {
        match (pattern.first(), event.first()) {
            (None, None) => true,
            // A final * takes every remaining segment
            (Some(&"*"), Some(_)) if pattern.len() == 1 => true,
            (Some(&"*"), Some(_)) => Self::match_segments(&pattern[1..], &event[1..]),
            (Some(p), Some(e)) if *p == *e => Self::match_segments(&pattern[1..], &event[1..]),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check(pattern: &str) -> Result<(), PatternError> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Err(PatternError::Empty);
    }
    if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(PatternError::ForbiddenChar(c));
    }
    if trimmed.contains("**") {
        return Err(PatternError::DoubleWildcard);
    }
    if trimmed.starts_with('*') && trimmed != "*" && !trimmed.starts_with("*.") {
        return Err(PatternError::LeadingWildcard);
    }
    Ok(())
}

/// Match an event type against a raw pattern
///
/// Returns false for an empty event type and for any pattern that fails
/// validation; otherwise the pattern is normalized before matching.
pub fn matches(event_type: &str, pattern: &str) -> bool {
    match EventPattern::parse(pattern) {
        Ok(pattern) => pattern.matches(event_type),
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
