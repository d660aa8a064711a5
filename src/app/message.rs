// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::client::NotifyClient;
use crate::domain::Notification;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// A notification delivered by the client.
    Received(Notification),
    Notification(notifications::NotificationMessage),
    Tick(Instant), // Toast expiry and status refresh
    Start,
    Stop,
    /// Ask the service for a test notification.
    Test,
    TestCompleted(serde_json::Value),
    BaseInputChanged(String),
    ApplyBase,
}

/// Runtime flags passed from `main.rs` to the application.
#[derive(Debug)]
pub struct Flags {
    pub client: NotifyClient,
    /// Receiving half of the client's channel sink.
    pub inbox: UnboundedReceiver<Notification>,
    /// Start delivery as soon as the window opens.
    pub autostart: bool,
    pub theme_mode: ThemeMode,
}
