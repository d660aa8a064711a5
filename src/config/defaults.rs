// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the client. Constants are organized by category.
//!
//! # Categories
//!
//! - **Service**: Base URL and endpoint paths of the notification service
//! - **Push**: Reconnect backoff for the event stream
//! - **Pull**: Polling cadence and batch size
//! - **Toasts**: Display duration and stacking
//! - **Diagnostics**: Transport event log capacity

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Origin of the notification service when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5069";

/// Source label shown when a notification does not name its origin.
pub const DEFAULT_SOURCE: &str = "A26";

/// Path of the server-sent event stream.
pub const STREAM_PATH: &str = "/api/notify/stream";

/// Path of the polling endpoint.
pub const PULL_PATH: &str = "/api/notify/pull";

/// Path of the diagnostic "emit a test notification" endpoint.
pub const TEST_PATH: &str = "/api/notify/test";

/// Path used to publish a notification.
pub const SEND_PATH: &str = "/api/notify/send";

/// Timeout for one-shot requests (pull, test, send), in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Push (Event Stream) Defaults
// ==========================================================================

/// Reconnect delay after a successful delivery (backoff floor).
pub const BACKOFF_FLOOR_MS: u64 = 1_000;

/// Upper bound for the reconnect delay.
pub const BACKOFF_CEILING_MS: u64 = 15_000;

/// SSE event name the service uses for keep-alive pings.
pub const HEARTBEAT_EVENT: &str = "ping";

/// Largest heartbeat interval a client may request (in seconds).
pub const MAX_HEARTBEAT_SECS: u32 = 300;

// ==========================================================================
// Pull (Polling) Defaults
// ==========================================================================

/// Interval between two pull requests.
pub const POLL_INTERVAL_MS: u64 = 2_500;

/// Maximum number of notifications requested per pull.
pub const PULL_LIMIT: u32 = 50;

/// Default long-poll wait sent with each pull (0 = answer immediately).
pub const DEFAULT_PULL_WAIT_SECS: u32 = 0;

/// The service caps long-poll waits at this many seconds.
pub const MAX_PULL_WAIT_SECS: u32 = 30;

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// How long a toast stays on screen before it is removed.
pub const TOAST_DURATION_MS: u64 = 6_000;

/// Maximum number of toasts stacked on screen; the rest wait in a queue.
pub const MAX_VISIBLE_TOASTS: usize = 4;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Number of transport events retained by a client.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 200;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Backoff validation
    assert!(BACKOFF_FLOOR_MS > 0);
    assert!(BACKOFF_CEILING_MS >= BACKOFF_FLOOR_MS);

    // Polling validation
    assert!(POLL_INTERVAL_MS > 0);
    assert!(PULL_LIMIT > 0);
    assert!(DEFAULT_PULL_WAIT_SECS <= MAX_PULL_WAIT_SECS);

    // Request timeout validation
    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);

    // Toast validation
    assert!(TOAST_DURATION_MS > 0);
    assert!(MAX_VISIBLE_TOASTS > 0);

    assert!(DEFAULT_EVENT_LOG_CAPACITY > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_defaults_are_valid() {
        assert_eq!(BACKOFF_FLOOR_MS, 1000);
        assert_eq!(BACKOFF_CEILING_MS, 15000);
    }

    #[test]
    fn polling_defaults_are_valid() {
        assert_eq!(POLL_INTERVAL_MS, 2500);
        assert_eq!(PULL_LIMIT, 50);
        assert_eq!(DEFAULT_PULL_WAIT_SECS, 0);
    }

    #[test]
    fn toast_duration_is_six_seconds() {
        assert_eq!(TOAST_DURATION_MS, 6000);
    }

    #[test]
    fn endpoint_paths_share_api_prefix() {
        for path in [STREAM_PATH, PULL_PATH, TEST_PATH, SEND_PATH] {
            assert!(path.starts_with("/api/notify/"), "{path}");
        }
    }

    #[test]
    fn default_base_has_no_trailing_slash() {
        assert!(!DEFAULT_BASE_URL.ends_with('/'));
    }
}
