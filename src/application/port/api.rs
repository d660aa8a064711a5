// SPDX-License-Identifier: MPL-2.0
//! Notification service port definition.
//!
//! This module defines the [`NotifyApi`] trait the client drives. The HTTP
//! adapter lives in `infrastructure::http`; tests substitute scripted fakes.
//!
//! # Design Notes
//!
//! - Stream payloads are decoded by the adapter: the client only sees
//!   [`StreamEvent`]s, including [`StreamEvent::Malformed`] for payloads it
//!   must drop
//! - Futures are boxed so the trait stays object-safe and `Send`

use crate::domain::{Level, Notification};
use crate::error::TransportError;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use serde::Serialize;

// =============================================================================
// Requests
// =============================================================================

/// Parameters of a push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub base: String,
    /// Resume cursor: only notifications with a larger id are wanted.
    pub since: u64,
    /// Heartbeat interval to ask the service for, if any.
    pub heartbeat_secs: Option<u32>,
}

/// Parameters of one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub base: String,
    pub since: u64,
    pub limit: u32,
    /// Long-poll wait; `0` asks the service to answer immediately.
    pub wait_secs: u32,
}

/// Body of a publish request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingNotification {
    pub level: String,
    pub message: String,
    pub source: String,
    pub user: String,
}

impl OutgoingNotification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level: level.as_str().to_string(),
            message: message.into(),
            source: crate::config::DEFAULT_SOURCE.to_string(),
            user: String::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }
}

// =============================================================================
// Responses
// =============================================================================

/// One event read from a push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A well-formed notification.
    Notification(Notification),
    /// A message event whose payload could not be decoded.
    Malformed(String),
    /// Keep-alive ping.
    Heartbeat,
    /// A named event the client has no use for.
    Ignored(String),
}

/// Live push subscription. Ends (or yields an error) when the connection drops.
pub type EventStream = BoxStream<'static, Result<StreamEvent, TransportError>>;

/// Decoded answer to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PullBatch {
    /// Whether the service reported success.
    pub ok: bool,
    /// Decodable notifications, in server order.
    pub notifications: Vec<Notification>,
    /// Number of items dropped because they could not be decoded.
    pub malformed: usize,
}

impl PullBatch {
    /// A successful batch carrying `notifications`.
    #[must_use]
    pub fn ok(notifications: Vec<Notification>) -> Self {
        Self {
            ok: true,
            notifications,
            malformed: 0,
        }
    }

    /// A batch the service flagged as failed.
    #[must_use]
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Result of a one-shot request (`test`, `send`).
///
/// Network and decode failures become [`RequestOutcome::Failed`] instead of
/// errors, so callers always get a value they can show.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// The service answered; its JSON body, verbatim.
    Response(serde_json::Value),
    /// The request did not produce a usable answer.
    Failed { error: String },
}

impl RequestOutcome {
    /// True when the service answered with `"ok": true`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        match self {
            RequestOutcome::Response(body) => body
                .get("ok")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            RequestOutcome::Failed { .. } => false,
        }
    }

    /// JSON view: the response body, or `{ "ok": false, "error": ... }`.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        match self {
            RequestOutcome::Response(body) => body,
            RequestOutcome::Failed { error } => serde_json::json!({
                "ok": false,
                "error": error,
            }),
        }
    }
}

impl From<Result<serde_json::Value, TransportError>> for RequestOutcome {
    fn from(result: Result<serde_json::Value, TransportError>) -> Self {
        match result {
            Ok(body) => RequestOutcome::Response(body),
            Err(err) => RequestOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

// =============================================================================
// NotifyApi
// =============================================================================

/// Remote notification service.
pub trait NotifyApi: Send + Sync {
    /// Opens a push subscription.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unsupported`] when the service does not offer
    /// an event stream, any other variant for transient faults.
    fn open_stream(
        &self,
        request: StreamRequest,
    ) -> BoxFuture<'_, Result<EventStream, TransportError>>;

    /// Fetches notifications newer than `request.since`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the body is not a pull response.
    fn pull(&self, request: PullRequest) -> BoxFuture<'_, Result<PullBatch, TransportError>>;

    /// Asks the service to emit a synthetic notification.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the body is not JSON.
    fn trigger_test(
        &self,
        base: String,
    ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>>;

    /// Publishes a notification.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the body is not JSON.
    fn send(
        &self,
        base: String,
        notification: OutgoingNotification,
    ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>>;
}
