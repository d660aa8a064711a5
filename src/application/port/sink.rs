// SPDX-License-Identifier: MPL-2.0
//! Rendering port: where received notifications go.

use crate::domain::Notification;

/// Anything able to display a notification.
///
/// Implementations must not block: `display` is called from the transport
/// task for every received notification.
pub trait NotificationSink: Send + Sync {
    fn display(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn display(&self, notification: &Notification) {
        self(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closures_act_as_sinks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_sink = Arc::clone(&seen);
        let sink = move |n: &Notification| {
            seen_by_sink.lock().expect("lock").push(n.id);
        };

        sink.display(&Notification::new(4, Level::Info, "a"));
        sink.display(&Notification::new(7, Level::Info, "b"));

        assert_eq!(*seen.lock().expect("lock"), vec![4, 7]);
    }

    #[test]
    fn shared_trait_objects_display() {
        let seen = Arc::new(Mutex::new(0u32));
        let seen_by_sink = Arc::clone(&seen);
        let sink: Arc<dyn NotificationSink> = Arc::new(move |_: &Notification| {
            *seen_by_sink.lock().expect("lock") += 1;
        });

        sink.display(&Notification::new(1, Level::Error, "x"));
        assert_eq!(*seen.lock().expect("lock"), 1);
    }
}
