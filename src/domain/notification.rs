// SPDX-License-Identifier: MPL-2.0
//! Notification value types as delivered by the notification service.
//!
//! Received notifications are display-only: the client never mutates them,
//! it only reads `id` to advance its resume cursor.

use crate::config::DEFAULT_SOURCE;
use std::fmt;

/// Severity of a notification. Determines the accent colour of its toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// All levels, in ascending severity.
    pub const ALL: [Level; 4] = [Level::Info, Level::Success, Level::Warning, Level::Error];

    /// Parses a level name case-insensitively. Unknown names map to `Info`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Level::Success,
            "warning" | "warn" => Level::Warning,
            "error" => Level::Error,
            _ => Level::Info,
        }
    }

    /// Wire name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Upper-case label used as the toast title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification event emitted by the service.
///
/// Text fields are untrusted: renderers must escape them for their medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic per-server identifier. `0` when the payload carried none.
    pub id: u64,
    pub level: Level,
    pub message: String,
    /// Emitting subsystem, e.g. `A24`.
    pub source: String,
    pub user: Option<String>,
    /// Timestamp as sent by the service (naive ISO-8601, UTC).
    pub ts: Option<String>,
    /// Free-form details object, kept as compact JSON text.
    pub details: Option<String>,
}

impl Notification {
    /// Creates a notification with the default source and no optional fields.
    pub fn new(id: u64, level: Level, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            message: message.into(),
            source: DEFAULT_SOURCE.to_string(),
            user: None,
            ts: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the user. An empty name is treated as no user.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        let user = user.into();
        self.user = (!user.is_empty()).then_some(user);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.ts = Some(ts.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
