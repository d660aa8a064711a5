// SPDX-License-Identifier: MPL-2.0
//! Toast window: wires a [`NotifyClient`] into the iced event loop.
//!
//! The client delivers into a [`ChannelSink`](crate::infrastructure::ChannelSink);
//! the inbox subscription turns each received notification into a
//! [`Message::Received`] that the toast manager stacks on screen.

pub mod headless;
mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::client::NotifyClient;
use crate::domain::Notification;
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

/// Receiving half of the client's sink, handed over to the inbox subscription.
pub(crate) type Inbox = Arc<Mutex<Option<UnboundedReceiver<Notification>>>>;

/// Root iced application state.
pub struct App {
    client: NotifyClient,
    inbox: Inbox,
    notifications: notifications::Manager,
    /// Contents of the service origin field.
    base_input: String,
    theme_mode: ThemeMode,
    /// Summary of the last test request.
    last_test: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("client", &self.client)
            .field("visible_toasts", &self.notifications.visible_count())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 560;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 420;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the state; autostart is deferred to the first update so the
    /// client is started inside the runtime.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let app = App {
            base_input: flags.client.base(),
            client: flags.client,
            inbox: Arc::new(Mutex::new(Some(flags.inbox))),
            notifications: notifications::Manager::new(),
            theme_mode: flags.theme_mode,
            last_test: None,
        };

        let task = if flags.autostart {
            Task::done(Message::Start)
        } else {
            Task::none()
        };
        (app, task)
    }

    fn title(&self) -> String {
        format!("Matrix Notify - {}", self.client.base())
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_inbox_subscription(Arc::clone(&self.inbox)),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Received(notification) => {
                self.notifications.push(notification);
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
            }
            Message::Tick(_) => {
                self.notifications.tick();
            }
            Message::Start => self.client.start(),
            Message::Stop => self.client.stop(),
            Message::Test => {
                let client = self.client.clone();
                return Task::perform(
                    async move { client.test().await.into_json() },
                    Message::TestCompleted,
                );
            }
            Message::TestCompleted(body) => {
                self.last_test = Some(describe_test_result(&body));
            }
            Message::BaseInputChanged(value) => {
                self.base_input = value;
            }
            Message::ApplyBase => {
                self.client.set_base(&self.base_input);
                self.base_input = self.client.base();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            state: self.client.state(),
            base_input: &self.base_input,
            last_test: self.last_test.as_deref(),
            notifications: &self.notifications,
        })
    }
}

/// Short summary of a test response for the status area.
fn describe_test_result(body: &serde_json::Value) -> String {
    if body
        .get("ok")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
    {
        return "test: ok".to_string();
    }
    let error = body
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("service reported failure");
    format!("test failed: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{
        EventStream, NotifyApi, OutgoingNotification, PullBatch, PullRequest, StreamRequest,
    };
    use crate::client::ClientOptions;
    use crate::domain::Level;
    use crate::error::TransportError;
    use crate::infrastructure::ChannelSink;
    use futures_util::future::BoxFuture;
    use futures_util::FutureExt;

    pub(crate) struct OfflineApi;

    impl NotifyApi for OfflineApi {
        fn open_stream(
            &self,
            _request: StreamRequest,
        ) -> BoxFuture<'_, Result<EventStream, TransportError>> {
            async { Err(TransportError::Http("offline".into())) }.boxed()
        }

        fn pull(&self, _request: PullRequest) -> BoxFuture<'_, Result<PullBatch, TransportError>> {
            async { Err(TransportError::Http("offline".into())) }.boxed()
        }

        fn trigger_test(
            &self,
            _base: String,
        ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>> {
            async { Err(TransportError::Http("offline".into())) }.boxed()
        }

        fn send(
            &self,
            _base: String,
            _notification: OutgoingNotification,
        ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>> {
            async { Err(TransportError::Http("offline".into())) }.boxed()
        }
    }

    fn app(autostart: bool) -> (App, Task<Message>) {
        let (sink, inbox) = ChannelSink::channel();
        let client = NotifyClient::new(
            Arc::new(OfflineApi),
            Arc::new(sink),
            ClientOptions::default(),
        );
        App::new(Flags {
            client,
            inbox,
            autostart,
            theme_mode: ThemeMode::Dark,
        })
    }

    #[test]
    fn new_app_prefills_base_input_with_client_origin() {
        let (app, _task) = app(false);
        assert_eq!(app.base_input, crate::config::DEFAULT_BASE_URL);
        assert!(app.client.state().stopped);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn received_notifications_become_toasts() {
        let (mut app, _task) = app(false);
        let _ = app.update(Message::Received(Notification::new(3, Level::Success, "done")));
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn apply_base_normalizes_and_updates_client() {
        let (mut app, _task) = app(false);
        let _ = app.update(Message::BaseInputChanged(" http://10.0.0.2:5069/ ".into()));
        let _ = app.update(Message::ApplyBase);
        assert_eq!(app.client.base(), "http://10.0.0.2:5069");
        assert_eq!(app.base_input, "http://10.0.0.2:5069");
        assert!(app.title().contains("10.0.0.2"));
    }

    #[tokio::test]
    async fn start_and_stop_messages_drive_the_client() {
        let (mut app, _task) = app(true);
        let _ = app.update(Message::Start);
        assert!(!app.client.state().stopped);
        let _ = app.update(Message::Stop);
        assert!(app.client.state().stopped);
    }

    #[test]
    fn test_results_are_summarized() {
        let (mut app, _task) = app(false);
        let _ = app.update(Message::TestCompleted(serde_json::json!({
            "ok": false,
            "error": "HTTP error: offline"
        })));
        assert_eq!(app.last_test.as_deref(), Some("test failed: HTTP error: offline"));
        assert_eq!(
            describe_test_result(&serde_json::json!({ "ok": true, "id": 9 })),
            "test: ok"
        );
    }

    #[test]
    fn inbox_is_handed_over_once() {
        let (app, _task) = app(false);
        assert!(app.inbox.lock().expect("lock").is_some());
        let _ = app.subscription();
        // Building the subscription does not consume the receiver.
        assert!(app.inbox.lock().expect("lock").is_some());
    }
}
