// SPDX-License-Identifier: MPL-2.0
//! Notification sinks for the front-ends.
//!
//! - [`ConsoleSink`]: prints each notification as text or as an HTML fragment
//! - [`ChannelSink`]: forwards notifications to the GUI event loop

use crate::application::port::NotificationSink;
use crate::config::OutputFormat;
use crate::domain::Notification;
use crate::ui::notifications::{render_html, render_plain};
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Writes one rendered toast per notification.
pub struct ConsoleSink {
    format: OutputFormat,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat, out: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            out: Mutex::new(out),
        }
    }

    /// Sink printing to standard output.
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, Box::new(std::io::stdout()))
    }

    fn render(&self, notification: &Notification) -> String {
        match self.format {
            OutputFormat::Text => render_plain(notification),
            OutputFormat::Html => render_html(notification),
        }
    }
}

impl NotificationSink for ConsoleSink {
    fn display(&self, notification: &Notification) {
        let rendered = self.render(notification);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{rendered}").and_then(|()| out.flush()) {
            tracing::warn!(error = %err, "failed to write notification");
        }
    }
}

/// Forwards notifications over an unbounded channel.
///
/// Once the receiver is gone, notifications are silently dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Creates the sink and the receiving half.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn display(&self, notification: &Notification) {
        let _ = self.tx.send(notification.clone());
    }
}
