// SPDX-License-Identifier: MPL-2.0
//! `matrix_notify` is a toast client for the Matrix OS notification service.
//!
//! It keeps a live feed over server-sent events, falls back to polling when
//! the service does not offer a stream, and renders each notification as a
//! toast in an iced window or on the terminal.
//!
//! # Layers
//!
//! - [`domain`] - notifications, resume cursor, reconnect backoff
//! - [`application`] - ports the client talks to ([`application::port`])
//! - [`infrastructure`] - HTTP/SSE adapter and notification sinks
//! - [`client`] - the [`client::NotifyClient`] state machine
//! - [`ui`] / [`app`] - toast rendering and the front-ends

#![doc(html_root_url = "https://docs.rs/matrix_notify/0.1.0")]

pub mod app;
pub mod application;
pub mod cli;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
