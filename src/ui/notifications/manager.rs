// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` handles queuing, display timing, and dismissal of toasts.
//! It limits the number of visible toasts and expires them after a fixed
//! display duration. The clock of a queued toast only starts once it is
//! promoted to the screen.

use crate::config::{MAX_VISIBLE_TOASTS, TOAST_DURATION_MS};
use crate::domain::Notification;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Identifier of one toast. Distinct from the notification id, which may
/// repeat or be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific toast by ID.
    Dismiss(ToastId),
    /// Tick for checking expiry.
    Tick,
}

/// A toast: one notification plus its display bookkeeping.
#[derive(Debug, Clone)]
pub struct Entry {
    id: ToastId,
    notification: Notification,
    shown_at: Instant,
}

impl Entry {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }
}

/// Manages the toast queue and visible toasts.
#[derive(Debug)]
pub struct Manager {
    /// Currently visible toasts (oldest first).
    visible: VecDeque<Entry>,
    /// Queued toasts waiting to be displayed.
    queue: VecDeque<Entry>,
    next_id: u64,
    duration: Duration,
    max_visible: usize,
}

impl Default for Manager {
    fn default() -> Self {
        Self::with_limits(Duration::from_millis(TOAST_DURATION_MS), MAX_VISIBLE_TOASTS)
    }
}

impl Manager {
    /// Creates a new empty manager with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with a custom display duration and stack height.
    #[must_use]
    pub fn with_limits(duration: Duration, max_visible: usize) -> Self {
        Self {
            visible: VecDeque::new(),
            queue: VecDeque::new(),
            next_id: 0,
            duration,
            max_visible: max_visible.max(1),
        }
    }

    /// Pushes a notification to be displayed.
    pub fn push(&mut self, notification: Notification) -> ToastId {
        self.push_at(notification, Instant::now())
    }

    /// [`Manager::push`] with an explicit clock.
    pub fn push_at(&mut self, notification: Notification, now: Instant) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let entry = Entry {
            id,
            notification,
            shown_at: now,
        };

        if self.visible.len() < self.max_visible {
            self.visible.push_back(entry);
        } else {
            self.queue.push_back(entry);
        }
        id
    }

    /// Dismisses a toast by its ID.
    ///
    /// Returns `true` if the toast was found and removed.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        self.dismiss_at(id, Instant::now())
    }

    fn dismiss_at(&mut self, id: ToastId, now: Instant) -> bool {
        if let Some(pos) = self.visible.iter().position(|e| e.id == id) {
            self.visible.remove(pos);
            self.promote_from_queue(now);
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|e| e.id == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Removes expired toasts. Should be called periodically (e.g. every 100 ms).
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// [`Manager::tick`] with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) {
        let duration = self.duration;
        let before = self.visible.len();
        self.visible
            .retain(|e| now.saturating_duration_since(e.shown_at) < duration);
        if self.visible.len() < before {
            self.promote_from_queue(now);
        }
    }

    /// Handles a toast message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    /// Returns the currently visible toasts.
    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether there are any toasts (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Promotes queued toasts while there's space; their clock starts now.
    fn promote_from_queue(&mut self, now: Instant) {
        while self.visible.len() < self.max_visible {
            let Some(mut entry) = self.queue.pop_front() else {
                break;
            };
            entry.shown_at = now;
            self.visible.push_back(entry);
        }
    }
}
