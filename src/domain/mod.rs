// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core types with no dependency on I/O or UI crates.
//!
//! # Modules
//!
//! - [`notification`]: [`Notification`] and its [`Level`]
//! - [`cursor`]: the monotonic resume [`Cursor`]
//! - [`backoff`]: reconnect [`Backoff`] policy

pub mod backoff;
pub mod cursor;
pub mod notification;

pub use backoff::Backoff;
pub use cursor::Cursor;
pub use notification::{Level, Notification};
