// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the notification service.
//!
//! [`HttpApi`] implements [`NotifyApi`] on top of `reqwest`. The event stream
//! is read with `bytes_stream()` and fed through [`sse::SseDecoder`]; JSON
//! bodies are decoded by [`wire`].
//!
//! # Push availability
//!
//! A stream request is reported as [`TransportError::Unsupported`] when the
//! service answers with a 4xx status or with a body that is not
//! `text/event-stream`. Connection failures and 5xx statuses are transient.

pub mod sse;
pub mod wire;

use crate::application::port::{
    EventStream, NotifyApi, OutgoingNotification, PullBatch, PullRequest, StreamRequest,
};
use crate::config::{PULL_PATH, SEND_PATH, STREAM_PATH, TEST_PATH};
use crate::error::TransportError;
use futures_util::future::BoxFuture;
use futures_util::{stream, FutureExt, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use sse::SseDecoder;
use std::time::Duration;

const EVENT_STREAM_MIME: &str = "text/event-stream";

/// `reqwest`-backed [`NotifyApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl HttpApi {
    /// Builds the adapter.
    ///
    /// `request_timeout` bounds pull, test and send requests and the time to
    /// establish any connection. An open event stream has no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the TLS backend cannot be initialised.
    pub fn new(request_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("MatrixNotify/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self {
            client,
            request_timeout,
        })
    }

    async fn post_json(
        &self,
        base: &str,
        path: &str,
        body: Option<&OutgoingNotification>,
    ) -> Result<serde_json::Value, TransportError> {
        let mut request = self
            .client
            .post(endpoint(base, path))
            .timeout(self.request_timeout);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Error answers from the service still carry `{ ok: false, error }`.
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(TransportError::Status(status.as_u16())),
            Err(err) => Err(err.into()),
        }
    }
}

impl NotifyApi for HttpApi {
    fn open_stream(
        &self,
        request: StreamRequest,
    ) -> BoxFuture<'_, Result<EventStream, TransportError>> {
        async move {
            let mut query = vec![("since", request.since.to_string())];
            if let Some(secs) = request.heartbeat_secs {
                query.push(("heartbeat", secs.to_string()));
            }

            let response = self
                .client
                .get(endpoint(&request.base, STREAM_PATH))
                .query(&query)
                .header(ACCEPT, EVENT_STREAM_MIME)
                .send()
                .await?;

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok());
            check_stream_response(response.status().as_u16(), content_type)?;

            let mut decoder = SseDecoder::new();
            let events = response
                .bytes_stream()
                .map(move |chunk| match chunk {
                    Ok(bytes) => decoder
                        .feed(&bytes)
                        .into_iter()
                        .map(|event| Ok(wire::classify_event(event)))
                        .collect::<Vec<_>>(),
                    Err(err) => vec![Err(TransportError::from(err))],
                })
                .flat_map(stream::iter)
                .boxed();
            Ok(events)
        }
        .boxed()
    }

    fn pull(&self, request: PullRequest) -> BoxFuture<'_, Result<PullBatch, TransportError>> {
        async move {
            let response = self
                .client
                .get(endpoint(&request.base, PULL_PATH))
                .query(&[
                    ("since", request.since.to_string()),
                    ("limit", request.limit.to_string()),
                    ("wait", request.wait_secs.to_string()),
                ])
                .timeout(self.request_timeout + Duration::from_secs(u64::from(request.wait_secs)))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status(status.as_u16()));
            }
            let bytes = response.bytes().await?;
            wire::decode_pull(&bytes)
        }
        .boxed()
    }

    fn trigger_test(
        &self,
        base: String,
    ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>> {
        async move { self.post_json(&base, TEST_PATH, None).await }.boxed()
    }

    fn send(
        &self,
        base: String,
        notification: OutgoingNotification,
    ) -> BoxFuture<'_, Result<serde_json::Value, TransportError>> {
        async move { self.post_json(&base, SEND_PATH, Some(&notification)).await }.boxed()
    }
}

/// Joins a service origin and an endpoint path.
fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Decides whether a stream response can be consumed.
fn check_stream_response(status: u16, content_type: Option<&str>) -> Result<(), TransportError> {
    if (400..500).contains(&status) {
        return Err(TransportError::Unsupported(format!("HTTP {status}")));
    }
    if !(200..300).contains(&status) {
        return Err(TransportError::Status(status));
    }
    match content_type {
        Some(mime)
            if mime
                .trim()
                .to_ascii_lowercase()
                .starts_with(EVENT_STREAM_MIME) =>
        {
            Ok(())
        }
        Some(mime) => Err(TransportError::Unsupported(format!(
            "unexpected content type {mime}"
        ))),
        None => Err(TransportError::Unsupported("missing content type".into())),
    }
}
