// SPDX-License-Identifier: MPL-2.0
//! JSON wire format of the notification service.
//!
//! Decoding is lenient the way the service's own web client is: only a
//! payload that is not a JSON object counts as malformed. Missing or
//! mistyped fields fall back to defaults (`id` 0, level `info`, the default
//! source) so the notification is still shown.

use super::sse::SseEvent;
use crate::application::port::{PullBatch, StreamEvent};
use crate::config::{DEFAULT_SOURCE, HEARTBEAT_EVENT};
use crate::domain::{Level, Notification};
use crate::error::TransportError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of a pull response.
///
/// Older service builds used `data` for the list; `notifications` wins when
/// both are present.
#[derive(Debug, Deserialize)]
struct WirePullResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    notifications: Option<Vec<Value>>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Decodes one notification payload.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] if `payload` is not a JSON object.
pub fn decode_notification(payload: &str) -> Result<Notification, TransportError> {
    let value: Value = serde_json::from_str(payload)?;
    notification_from_value(&value)
        .ok_or_else(|| TransportError::Decode("notification is not a JSON object".into()))
}

/// Builds a [`Notification`] from a decoded JSON value. `None` if not an object.
#[must_use]
pub fn notification_from_value(value: &Value) -> Option<Notification> {
    let object = value.as_object()?;

    let id = object.get("id").and_then(Value::as_u64).unwrap_or(0);
    let level = object
        .get("level")
        .and_then(Value::as_str)
        .map(Level::from_name)
        .unwrap_or_default();
    let message = text_field(object, "message").unwrap_or_default();
    let source = text_field(object, "source")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    let mut notification = Notification::new(id, level, message).with_source(source);
    if let Some(user) = text_field(object, "user") {
        notification = notification.with_user(user);
    }
    if let Some(ts) = text_field(object, "ts").filter(|s| !s.is_empty()) {
        notification = notification.with_timestamp(ts);
    }
    if let Some(details) = object.get("details").filter(|d| !is_blank(d)) {
        notification = notification.with_details(details.to_string());
    }
    Some(notification)
}

/// Classifies a dispatched SSE event.
#[must_use]
pub fn classify_event(event: SseEvent) -> StreamEvent {
    match event.event.as_str() {
        HEARTBEAT_EVENT => StreamEvent::Heartbeat,
        "message" => match decode_notification(&event.data) {
            Ok(notification) => StreamEvent::Notification(notification),
            Err(_) => StreamEvent::Malformed(event.data),
        },
        _ => StreamEvent::Ignored(event.event),
    }
}

/// Decodes a pull response body.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] if the body is not a JSON object.
pub fn decode_pull(body: &[u8]) -> Result<PullBatch, TransportError> {
    let response: WirePullResponse = serde_json::from_slice(body)?;
    if !response.ok {
        return Ok(PullBatch::failed());
    }

    let items = response
        .notifications
        .or(response.data)
        .unwrap_or_default();
    let mut batch = PullBatch::ok(Vec::with_capacity(items.len()));
    for item in &items {
        match notification_from_value(item) {
            Some(notification) => batch.notifications.push(notification),
            None => batch.malformed += 1,
        }
    }
    Ok(batch)
}

/// Strings verbatim, `null` as absent, anything else as its JSON text.
fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_event(data: &str) -> SseEvent {
        SseEvent {
            event: "message".into(),
            data: data.into(),
            id: None,
            retry: None,
        }
    }

    #[test]
    fn decodes_full_service_payload() {
        let n = decode_notification(
            r#"{"id":42,"ts":"2025-01-01T10:00:00","level":"warning","message":"disk at 90%","source":"A24","user":"Admin","details":{"disk":"/"}}"#,
        )
        .expect("decode");
        assert_eq!(n.id, 42);
        assert_eq!(n.level, Level::Warning);
        assert_eq!(n.message, "disk at 90%");
        assert_eq!(n.source, "A24");
        assert_eq!(n.user.as_deref(), Some("Admin"));
        assert_eq!(n.ts.as_deref(), Some("2025-01-01T10:00:00"));
        assert_eq!(n.details.as_deref(), Some(r#"{"disk":"/"}"#));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let n = decode_notification(r#"{"message":"hi","user":"","details":{}}"#).expect("decode");
        assert_eq!(n.id, 0);
        assert_eq!(n.level, Level::Info);
        assert_eq!(n.source, DEFAULT_SOURCE);
        assert!(n.user.is_none());
        assert!(n.details.is_none());
    }

    #[test]
    fn non_numeric_id_is_treated_as_missing() {
        let n = decode_notification(r#"{"id":"7","message":"x"}"#).expect("decode");
        assert_eq!(n.id, 0);
    }

    #[test]
    fn unknown_level_is_info() {
        let n = decode_notification(r#"{"id":1,"level":"critical"}"#).expect("decode");
        assert_eq!(n.level, Level::Info);
    }

    #[test]
    fn numeric_timestamp_is_kept_as_text() {
        let n = decode_notification(r#"{"id":1,"ts":1735725600000}"#).expect("decode");
        assert_eq!(n.ts.as_deref(), Some("1735725600000"));
    }

    #[test]
    fn non_object_payloads_are_malformed() {
        assert!(decode_notification("not json").is_err());
        assert!(decode_notification("[1,2]").is_err());
        assert!(decode_notification("\"text\"").is_err());
    }

    #[test]
    fn classify_recognizes_heartbeat() {
        let ping = SseEvent {
            event: "ping".into(),
            ..message_event("{}")
        };
        assert_eq!(classify_event(ping), StreamEvent::Heartbeat);
    }

    #[test]
    fn classify_flags_malformed_messages() {
        assert_eq!(
            classify_event(message_event("{oops")),
            StreamEvent::Malformed("{oops".into())
        );
    }

    #[test]
    fn classify_ignores_other_named_events() {
        let other = SseEvent {
            event: "status".into(),
            ..message_event("{}")
        };
        assert_eq!(classify_event(other), StreamEvent::Ignored("status".into()));
    }

    #[test]
    fn pull_prefers_notifications_over_data() {
        let batch = decode_pull(
            br#"{"ok":true,"notifications":[{"id":5,"message":"a"}],"data":[{"id":9}],"last_id":5}"#,
        )
        .expect("decode");
        assert!(batch.ok);
        assert_eq!(batch.notifications.len(), 1);
        assert_eq!(batch.notifications[0].id, 5);
    }

    #[test]
    fn pull_reads_legacy_data_field() {
        let batch = decode_pull(br#"{"ok":true,"data":[{"id":3}]}"#).expect("decode");
        assert_eq!(batch.notifications[0].id, 3);
    }

    #[test]
    fn pull_counts_malformed_items() {
        let body = br#"{"ok":true,"notifications":[{"id":1},7,"x"]}"#;
        let batch = decode_pull(body).expect("decode");
        assert_eq!(batch.notifications.len(), 1);
        assert_eq!(batch.malformed, 2);
    }

    #[test]
    fn pull_without_ok_flag_is_failed_batch() {
        let batch = decode_pull(br#"{"notifications":[{"id":1}]}"#).expect("decode");
        assert!(!batch.ok);
        assert!(batch.notifications.is_empty());
    }

    #[test]
    fn pull_rejects_non_json_body() {
        assert!(decode_pull(b"<html>").is_err());
    }
}
