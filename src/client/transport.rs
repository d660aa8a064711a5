// SPDX-License-Identifier: MPL-2.0
//! Supervisor task: push loop with reconnect backoff, pull fallback.

use super::Inner;
use crate::application::port::{EventStream, PullRequest, StreamEvent, StreamRequest};
use crate::config::TransportPreference;
use crate::diagnostics::TransportEventKind;
use crate::error::TransportError;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Longest payload excerpt kept in the event log for a dropped event.
const PAYLOAD_EXCERPT_CHARS: usize = 120;

/// Runs one delivery generation until it is superseded or stopped.
pub(super) async fn supervise(inner: Arc<Inner>, generation: u64) {
    if inner.options.transport == TransportPreference::Polling {
        poll(&inner, generation).await;
        return;
    }

    loop {
        if !inner.is_current(generation) {
            return;
        }

        let since = inner.cursor.get();
        let request = StreamRequest {
            base: inner.base(),
            since,
            heartbeat_secs: inner.options.heartbeat_secs,
        };

        match inner.api.open_stream(request).await {
            Ok(stream) => {
                tracing::debug!(since, "event stream connected");
                inner.record(TransportEventKind::Connected { since });
                let result = consume(&inner, generation, stream).await;
                if !inner.is_current(generation) {
                    return;
                }
                let error = match result {
                    Ok(()) => "stream closed".to_string(),
                    Err(err) => err.to_string(),
                };
                tracing::debug!(%error, "event stream ended");
                inner.record(TransportEventKind::StreamError { error });
            }
            Err(err)
                if err.is_unsupported()
                    && inner.options.transport == TransportPreference::Auto =>
            {
                if !inner.enter_polling(generation) {
                    return;
                }
                tracing::warn!(error = %err, "event stream unavailable, falling back to polling");
                inner.record(TransportEventKind::FellBackToPolling {
                    reason: err.to_string(),
                });
                poll(&inner, generation).await;
                return;
            }
            Err(err) => {
                tracing::debug!(error = %err, "event stream connect failed");
                inner.record(TransportEventKind::StreamError {
                    error: err.to_string(),
                });
            }
        }

        let Some(delay) = inner.schedule_reconnect(generation) else {
            return;
        };
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(delay_ms, "reconnect scheduled");
        inner.record(TransportEventKind::ReconnectScheduled { delay_ms });
        time::sleep(delay).await;
    }
}

/// Reads a live subscription until it ends, fails or the run goes stale.
async fn consume(
    inner: &Inner,
    generation: u64,
    mut stream: EventStream,
) -> Result<(), TransportError> {
    while let Some(event) = stream.next().await {
        if !inner.is_current(generation) {
            return Ok(());
        }
        match event? {
            StreamEvent::Notification(notification) => {
                inner.reset_backoff();
                inner.deliver(&notification);
            }
            StreamEvent::Malformed(payload) => {
                // Any message event counts as a successful receipt.
                inner.reset_backoff();
                tracing::debug!(%payload, "dropping malformed notification");
                inner.record(TransportEventKind::MalformedEvent {
                    payload: payload.chars().take(PAYLOAD_EXCERPT_CHARS).collect(),
                });
            }
            StreamEvent::Heartbeat => tracing::trace!("heartbeat"),
            StreamEvent::Ignored(name) => tracing::debug!(event = %name, "ignoring stream event"),
        }
    }
    Ok(())
}

/// Pulls on a fixed interval. The first pull happens one interval in.
async fn poll(inner: &Inner, generation: u64) {
    let period = inner.options.poll_interval;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !inner.is_current(generation) {
            return;
        }

        let request = PullRequest {
            base: inner.base(),
            since: inner.cursor.get(),
            limit: inner.options.pull_limit,
            wait_secs: inner.options.pull_wait_secs,
        };
        match inner.api.pull(request).await {
            Ok(batch) if batch.ok => {
                if batch.malformed > 0 {
                    tracing::debug!(count = batch.malformed, "dropping malformed pulled items");
                }
                for notification in &batch.notifications {
                    if !inner.is_current(generation) {
                        return;
                    }
                    inner.deliver(notification);
                }
            }
            Ok(_) => {
                tracing::debug!("pull answered without ok");
                inner.record(TransportEventKind::PollFailed {
                    error: "service reported failure".to_string(),
                });
            }
            Err(err) => {
                tracing::debug!(error = %err, "pull failed");
                inner.record(TransportEventKind::PollFailed {
                    error: err.to_string(),
                });
            }
        }
    }
}
