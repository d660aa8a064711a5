// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, keeping the client independent of the
//! HTTP stack and of any particular renderer.
//!
//! # Available Ports
//!
//! - [`api`]: The remote notification service (stream, pull, test, send)
//! - [`sink`]: Where received notifications are displayed
//!
//! # Design Notes
//!
//! - All traits are `Send + Sync`: the client shares them with its transport task
//! - Transport failures use [`crate::error::TransportError`] so the client can
//!   tell "push unsupported" apart from transient faults
//!
//! # Example
//!
//! ```
//! use matrix_notify::application::port::NotificationSink;
//! use matrix_notify::domain::{Level, Notification};
//!
//! let sink = |n: &Notification| println!("[{}] {}", n.level, n.message);
//! sink.display(&Notification::new(1, Level::Info, "hello"));
//! ```

pub mod api;
pub mod sink;

// Re-export main types for convenience
pub use api::{
    EventStream, NotifyApi, OutgoingNotification, PullBatch, PullRequest, RequestOutcome,
    StreamEvent, StreamRequest,
};
pub use sink::NotificationSink;
