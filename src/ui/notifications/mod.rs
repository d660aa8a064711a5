// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.
//!
//! # Components
//!
//! - [`manager`] - `Manager` for stacking, queuing and expiring toasts
//! - [`toast`] - iced widget for the GUI overlay
//! - [`markup`] - style-isolated HTML fragments with escaped fields
//! - [`text`] - one-line terminal rendering and timestamp formatting
//!
//! # Usage
//!
//! ```
//! use matrix_notify::domain::{Level, Notification};
//! use matrix_notify::ui::notifications::{render_html, Manager};
//!
//! let mut manager = Manager::new();
//! let notification = Notification::new(5, Level::Error, "disk full");
//! manager.push(notification.clone());
//!
//! assert!(render_html(&notification).contains("disk full"));
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 6 s from the moment a toast becomes visible
//! - Max visible toasts: 4 (others are queued)
//! - Position: bottom-right corner

pub mod manager;
pub mod markup;
pub mod text;
pub mod toast;

pub use manager::{Entry, Manager, Message as NotificationMessage, ToastId};
pub use markup::{escape_html, render_html};
pub use text::{format_timestamp, render_plain};
pub use toast::Toast;
