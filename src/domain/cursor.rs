// SPDX-License-Identifier: MPL-2.0
//! Resume cursor shared by both transports.

use std::sync::atomic::{AtomicU64, Ordering};

/// Highest notification id processed so far.
///
/// The cursor only ever moves forward, so concurrent advancement from a
/// stream event and a lingering poll tick needs no further locking.
#[derive(Debug, Default)]
pub struct Cursor(AtomicU64);

impl Cursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current cursor value.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Moves the cursor to `id` if it is ahead. Returns true if it moved.
    pub fn advance(&self, id: u64) -> bool {
        self.0.fetch_max(id, Ordering::AcqRel) < id
    }
}
