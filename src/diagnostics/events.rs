// SPDX-License-Identifier: MPL-2.0
//! Transport event types for connection tracking.
//!
//! Every state change of a client's delivery loop is recorded as a
//! [`TransportEvent`] so front-ends can show why toasts stopped arriving.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// What happened to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportEventKind {
    /// Delivery was (re)started against `base`.
    Started { base: String },
    /// The event stream connected and resumes after `since`.
    Connected { since: u64 },
    /// The event stream failed or closed.
    StreamError { error: String },
    /// A stream event could not be decoded and was dropped.
    MalformedEvent { payload: String },
    /// A reconnect attempt is scheduled.
    ReconnectScheduled { delay_ms: u64 },
    /// The event stream is unavailable; the client switched to polling.
    FellBackToPolling { reason: String },
    /// One pull request failed; polling continues.
    PollFailed { error: String },
    /// Delivery was stopped.
    Stopped,
}

/// A timestamped [`TransportEventKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportEvent {
    pub at: DateTime<Local>,
    #[serde(flatten)]
    pub kind: TransportEventKind,
}

impl TransportEvent {
    /// Creates an event stamped with the current local time.
    #[must_use]
    pub fn now(kind: TransportEventKind) -> Self {
        Self {
            at: Local::now(),
            kind,
        }
    }
}

impl fmt::Display for TransportEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { base } => write!(f, "started ({base})"),
            Self::Connected { since } => write!(f, "stream connected (since {since})"),
            Self::StreamError { error } => write!(f, "stream error: {error}"),
            Self::MalformedEvent { payload } => write!(f, "dropped malformed event: {payload}"),
            Self::ReconnectScheduled { delay_ms } => write!(f, "reconnecting in {delay_ms} ms"),
            Self::FellBackToPolling { reason } => write!(f, "polling fallback: {reason}"),
            Self::PollFailed { error } => write!(f, "poll failed: {error}"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}

impl fmt::Display for TransportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.at.format("%H:%M:%S"), self.kind)
    }
}
