// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake logger for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use evd_core::logger::{LogError, LogFields, Logger};
use std::sync::{Arc, Mutex};

/// Severity of a recorded log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Recorded log line
#[derive(Debug, Clone)]
pub struct LogCall {
    pub level: LogLevel,
    pub message: String,
    /// Rendered error, for `error` and `fatal` lines that carried one
    pub error: Option<String>,
    pub fields: Vec<(&'static str, String)>,
}

impl LogCall {
    /// Value of a structured field, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Fake logger that records every call
#[derive(Clone, Default)]
pub struct FakeLogger {
    calls: Arc<Mutex<Vec<LogCall>>>,
}

impl FakeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LogCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Get recorded calls at one level
    pub fn at(&self, level: LogLevel) -> Vec<LogCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.level == level)
            .collect()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.at(level).len()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, level: LogLevel, message: &str, error: LogError<'_>, fields: LogFields<'_>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LogCall {
                level,
                message: message.to_string(),
                error: error.map(|e| e.to_string()),
                fields: fields.to_vec(),
            });
    }
}

#[async_trait]
impl Logger for FakeLogger {
    async fn info(&self, message: &str, fields: LogFields<'_>) {
        self.record(LogLevel::Info, message, None, fields);
    }

    async fn warn(&self, message: &str, fields: LogFields<'_>) {
        self.record(LogLevel::Warn, message, None, fields);
    }

    async fn error(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>) {
        self.record(LogLevel::Error, message, error, fields);
    }

    async fn fatal(&self, message: &str, error: LogError<'_>, fields: LogFields<'_>) {
        self.record(LogLevel::Fatal, message, error, fields);
    }

    async fn debug(&self, message: &str, fields: LogFields<'_>) {
        self.record(LogLevel::Debug, message, None, fields);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
