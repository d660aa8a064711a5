// SPDX-License-Identifier: MPL-2.0
//! Subscriptions feeding the application loop.

use super::{Inbox, Message};
use iced::futures::SinkExt;
use iced::{stream, time, Subscription};
use std::sync::PoisonError;
use std::time::Duration;

/// Identifies the inbox bridge so iced keeps one instance alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InboxId;

/// Bridges notifications from the client's channel into messages.
///
/// The receiver is taken on first run; later rebuilds of the subscription
/// reuse the running stream.
pub fn create_inbox_subscription(inbox: Inbox) -> Subscription<Message> {
    Subscription::run_with_id(
        InboxId,
        stream::channel(100, move |mut output| async move {
            let receiver = inbox.lock().unwrap_or_else(PoisonError::into_inner).take();
            let Some(mut receiver) = receiver else {
                return;
            };

            while let Some(notification) = receiver.recv().await {
                if output.send(Message::Received(notification)).await.is_err() {
                    break;
                }
            }
        }),
    )
}

/// Fast ticks while toasts are on screen, a slow one to refresh the status
/// line otherwise.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        time::every(Duration::from_secs(1)).map(Message::Tick)
    }
}
