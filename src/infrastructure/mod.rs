// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: The notification service over HTTP (implements [`NotifyApi`])
//! - [`sink`]: Console and channel sinks (implement [`NotificationSink`])
//!
//! [`NotifyApi`]: crate::application::port::NotifyApi
//! [`NotificationSink`]: crate::application::port::NotificationSink

pub mod http;
pub mod sink;

// Re-export main types for convenience
pub use http::HttpApi;
pub use sink::{ChannelSink, ConsoleSink};
