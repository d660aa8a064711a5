// SPDX-License-Identifier: MPL-2.0
//! Notification client: transport selection, reconnect and delivery.
//!
//! A [`NotifyClient`] keeps a live feed from the notification service and
//! hands every notification to its [`NotificationSink`]. It prefers the
//! event stream and falls back to polling when the service does not offer
//! one.
//!
//! # Lifecycle
//!
//! ```text
//! stopped --start()--> sse --(push unsupported)--> polling
//!    ^                  |                             |
//!    +------stop()------+-------------stop()----------+
//! ```
//!
//! `start()` always restarts transport selection, so a client stuck in
//! polling tries the stream again on the next `start()`.
//!
//! # Concurrency
//!
//! Each `start()` spawns one supervisor task tagged with a generation
//! number. `stop()` and `start()` bump the generation and abort the previous
//! task; reconnect sleeps and poll ticks re-check the generation before
//! acting, so a superseded task can never connect or deliver again.
//!
//! # Example
//!
//! ```no_run
//! use matrix_notify::client::{ClientOptions, NotifyClient};
//! use matrix_notify::domain::Notification;
//! use matrix_notify::infrastructure::HttpApi;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), matrix_notify::error::TransportError> {
//! let api = Arc::new(HttpApi::new(Duration::from_secs(10))?);
//! let sink = Arc::new(|n: &Notification| println!("{}: {}", n.level, n.message));
//! let client = NotifyClient::new(api, sink, ClientOptions::default());
//!
//! client.start();
//! println!("{}", client.test().await.into_json());
//! # Ok(())
//! # }
//! ```

mod transport;

use crate::application::port::{NotificationSink, NotifyApi, OutgoingNotification, RequestOutcome};
use crate::config::{
    ServiceConfig, TransportPreference, BACKOFF_CEILING_MS, BACKOFF_FLOOR_MS, DEFAULT_BASE_URL,
    DEFAULT_EVENT_LOG_CAPACITY, DEFAULT_PULL_WAIT_SECS, POLL_INTERVAL_MS, PULL_LIMIT,
};
use crate::diagnostics::{CircularBuffer, TransportEvent, TransportEventKind};
use crate::domain::{Backoff, Cursor, Notification};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

// =============================================================================
// Options & State
// =============================================================================

/// Tuning of a [`NotifyClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Initial service origin.
    pub base_url: String,
    pub transport: TransportPreference,
    /// Heartbeat interval requested from the event stream.
    pub heartbeat_secs: Option<u32>,
    /// Long-poll wait sent with each pull.
    pub pull_wait_secs: u32,
    pub pull_limit: u32,
    pub poll_interval: Duration,
    pub backoff_floor: Duration,
    pub backoff_ceiling: Duration,
    /// Number of [`TransportEvent`]s kept for [`NotifyClient::recent_events`].
    pub event_log_capacity: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportPreference::default(),
            heartbeat_secs: None,
            pull_wait_secs: DEFAULT_PULL_WAIT_SECS,
            pull_limit: PULL_LIMIT,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            backoff_floor: Duration::from_millis(BACKOFF_FLOOR_MS),
            backoff_ceiling: Duration::from_millis(BACKOFF_CEILING_MS),
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

impl From<&ServiceConfig> for ClientOptions {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            base_url: normalize_base(config.base_url()),
            transport: config.transport,
            heartbeat_secs: config.heartbeat_secs(),
            pull_wait_secs: config.pull_wait_secs(),
            ..Self::default()
        }
    }
}

/// Transport currently driving delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Sse,
    Polling,
    Stopped,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportMode::Sse => "sse",
            TransportMode::Polling => "polling",
            TransportMode::Stopped => "stopped",
        })
    }
}

/// Read-only snapshot of a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientState {
    pub base: String,
    pub mode: TransportMode,
    pub last_id: u64,
    /// Delay the next reconnect would wait.
    pub backoff_ms: u64,
    pub stopped: bool,
}

/// Trims whitespace and trailing slashes; empty input yields the default origin.
#[must_use]
pub fn normalize_base(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// NotifyClient
// =============================================================================

/// Handle to a notification client. Clones share the same client.
///
/// The transport task holds its own reference; call [`NotifyClient::stop`]
/// to end delivery.
#[derive(Clone)]
pub struct NotifyClient {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn NotifyApi>,
    sink: Arc<dyn NotificationSink>,
    options: ClientOptions,
    base: RwLock<String>,
    cursor: Cursor,
    control: Mutex<Control>,
    events: Mutex<CircularBuffer<TransportEvent>>,
}

struct Control {
    mode: TransportMode,
    stopped: bool,
    generation: u64,
    backoff: Backoff,
    task: Option<JoinHandle<()>>,
}

impl NotifyClient {
    /// Creates a stopped client.
    pub fn new(
        api: Arc<dyn NotifyApi>,
        sink: Arc<dyn NotificationSink>,
        options: ClientOptions,
    ) -> Self {
        let backoff = Backoff::new(options.backoff_floor, options.backoff_ceiling);
        let events = CircularBuffer::with_capacity(options.event_log_capacity);
        Self {
            inner: Arc::new(Inner {
                api,
                sink,
                base: RwLock::new(normalize_base(&options.base_url)),
                options,
                cursor: Cursor::new(),
                control: Mutex::new(Control {
                    mode: TransportMode::Stopped,
                    stopped: true,
                    generation: 0,
                    backoff,
                    task: None,
                }),
                events: Mutex::new(events),
            }),
        }
    }

    /// Begins delivery, restarting transport selection if already running.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self) {
        let base = self.inner.base();
        {
            let mut control = self.inner.control();
            if let Some(task) = control.task.take() {
                task.abort();
            }
            control.generation += 1;
            control.stopped = false;
            control.backoff.reset();
            control.mode = match self.inner.options.transport {
                TransportPreference::Polling => TransportMode::Polling,
                TransportPreference::Auto | TransportPreference::Sse => TransportMode::Sse,
            };

            let generation = control.generation;
            let inner = Arc::clone(&self.inner);
            control.task = Some(tokio::spawn(transport::supervise(inner, generation)));
        }
        tracing::info!(
            %base,
            transport = ?self.inner.options.transport,
            "notification delivery started"
        );
        self.inner.record(TransportEventKind::Started { base });
    }

    /// Stops delivery. Safe at any time, including during a reconnect wait.
    pub fn stop(&self) {
        {
            let mut control = self.inner.control();
            if control.stopped {
                return;
            }
            control.stopped = true;
            control.generation += 1;
            control.mode = TransportMode::Stopped;
            if let Some(task) = control.task.take() {
                task.abort();
            }
        }
        tracing::info!("notification delivery stopped");
        self.inner.record(TransportEventKind::Stopped);
    }

    /// Changes the service origin used by subsequent connections and polls.
    pub fn set_base(&self, url: &str) {
        let base = normalize_base(url);
        tracing::debug!(%base, "service origin changed");
        *self
            .inner
            .base
            .write()
            .unwrap_or_else(PoisonError::into_inner) = base;
    }

    /// Current service origin.
    #[must_use]
    pub fn base(&self) -> String {
        self.inner.base()
    }

    /// Highest notification id processed so far.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.inner.cursor.get()
    }

    #[must_use]
    pub fn state(&self) -> ClientState {
        let control = self.inner.control();
        ClientState {
            base: self.inner.base(),
            mode: control.mode,
            last_id: self.inner.cursor.get(),
            backoff_ms: u64::try_from(control.backoff.current().as_millis()).unwrap_or(u64::MAX),
            stopped: control.stopped,
        }
    }

    /// Recent transport events, oldest first.
    #[must_use]
    pub fn recent_events(&self) -> Vec<TransportEvent> {
        self.inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Asks the service to emit a test notification.
    ///
    /// Network failures come back as [`RequestOutcome::Failed`].
    pub async fn test(&self) -> RequestOutcome {
        let outcome = RequestOutcome::from(self.inner.api.trigger_test(self.inner.base()).await);
        if let RequestOutcome::Failed { error } = &outcome {
            tracing::warn!(%error, "test request failed");
        }
        outcome
    }

    /// Publishes a notification through the service.
    pub async fn send(&self, notification: OutgoingNotification) -> RequestOutcome {
        let outcome =
            RequestOutcome::from(self.inner.api.send(self.inner.base(), notification).await);
        if let RequestOutcome::Failed { error } = &outcome {
            tracing::warn!(%error, "send request failed");
        }
        outcome
    }
}

impl fmt::Debug for NotifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyClient")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn base(&self) -> String {
        self.base
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, kind: TransportEventKind) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TransportEvent::now(kind));
    }

    /// True while `generation` is the live, non-stopped run.
    fn is_current(&self, generation: u64) -> bool {
        let control = self.control();
        control.generation == generation && !control.stopped
    }

    fn reset_backoff(&self) {
        self.control().backoff.reset();
    }

    /// Returns the delay before the next reconnect, or `None` if the run is stale.
    fn schedule_reconnect(&self, generation: u64) -> Option<Duration> {
        let mut control = self.control();
        if control.generation != generation || control.stopped {
            return None;
        }
        Some(control.backoff.next_delay())
    }

    /// Switches the live run to polling. Returns false if the run is stale.
    fn enter_polling(&self, generation: u64) -> bool {
        let mut control = self.control();
        if control.generation != generation || control.stopped {
            return false;
        }
        control.mode = TransportMode::Polling;
        true
    }

    fn deliver(&self, notification: &Notification) {
        if self.cursor.advance(notification.id) {
            tracing::trace!(id = notification.id, "cursor advanced");
        }
        self.sink.display(notification);
    }
}
