// SPDX-License-Identifier: MPL-2.0
//! Reconnect backoff for the event stream.

use crate::config::{BACKOFF_CEILING_MS, BACKOFF_FLOOR_MS};
use std::time::Duration;

/// Doubling reconnect delay bounded by a floor and a ceiling.
///
/// # Example
///
/// ```
/// use matrix_notify::domain::Backoff;
/// use std::time::Duration;
///
/// let mut backoff = Backoff::default();
/// assert_eq!(backoff.next_delay(), Duration::from_millis(1000));
/// assert_eq!(backoff.next_delay(), Duration::from_millis(2000));
/// backoff.reset();
/// assert_eq!(backoff.current(), Duration::from_millis(1000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    floor: Duration,
    ceiling: Duration,
    current: Duration,
}

impl Backoff {
    /// Creates a backoff. A ceiling below the floor is raised to the floor.
    #[must_use]
    pub fn new(floor: Duration, ceiling: Duration) -> Self {
        let ceiling = ceiling.max(floor);
        Self {
            floor,
            ceiling,
            current: floor,
        }
    }

    /// Delay the next reconnect will wait.
    #[must_use]
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Returns the delay to wait now and doubles the following one, up to
    /// the ceiling.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.ceiling);
        delay
    }

    /// Drops back to the floor after a successful delivery.
    pub fn reset(&mut self) {
        self.current = self.floor;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(BACKOFF_FLOOR_MS),
            Duration::from_millis(BACKOFF_CEILING_MS),
        )
    }
}
