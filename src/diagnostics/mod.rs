// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the delivery loop.
//!
//! Each client keeps its recent [`TransportEvent`]s in a memory-bounded
//! [`CircularBuffer`]. Nothing is persisted or exported; the log exists so a
//! front-end (or a test) can inspect connects, failures and fallbacks.

mod buffer;
mod events;

pub use buffer::CircularBuffer;
pub use events::{TransportEvent, TransportEventKind};
