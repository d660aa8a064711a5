// SPDX-License-Identifier: MPL-2.0
//! `HttpApi` against a local HTTP/1.1 server with canned replies.
//!
//! Each test binds a listener on an ephemeral port, answers exactly one
//! request and hands back what the adapter sent.

use futures_util::StreamExt;
use matrix_notify::application::port::{
    NotifyApi, OutgoingNotification, PullRequest, StreamEvent, StreamRequest,
};
use matrix_notify::domain::{Level, Notification};
use matrix_notify::error::TransportError;
use matrix_notify::infrastructure::HttpApi;
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// =============================================================================
// Canned server
// =============================================================================

/// What the adapter sent.
#[derive(Debug)]
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serves one connection, writing `parts` with a short pause between them
/// so each part reaches the client as its own read.
async fn serve_once(parts: Vec<Vec<u8>>) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let received = read_request(&mut socket).await;
        for part in parts {
            // The client may hang up once it has seen the status line.
            if socket.write_all(&part).await.is_err() || socket.flush().await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let _ = socket.shutdown().await;
        received
    });

    (format!("http://{addr}"), server)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let read = socket.read(&mut chunk).await.expect("read");
        assert!(read > 0, "connection closed before the request head");
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = buffer[head_end + 4..].to_vec();
    while body.len() < length {
        let read = socket.read(&mut chunk).await.expect("read body");
        assert!(read > 0, "connection closed before the request body");
        body.extend_from_slice(&chunk[..read]);
    }

    Received {
        request_line,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn reply(status: &str, content_type: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

fn chunked_head(status: &str, content_type: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nTransfer-Encoding: chunked\r\n\
         Connection: close\r\n\r\n"
    )
    .into_bytes()
}

fn chunk(data: &str) -> Vec<u8> {
    format!("{:x}\r\n{data}\r\n", data.len()).into_bytes()
}

fn api() -> HttpApi {
    HttpApi::new(Duration::from_secs(5)).expect("adapter")
}

// =============================================================================
// Pull
// =============================================================================

#[tokio::test]
async fn pull_sends_cursor_query_and_decodes_batch() {
    let body = r#"{"ok":true,"notifications":[{"id":8,"level":"success","message":"backup done"},7]}"#;
    let (base, server) = serve_once(vec![reply("200 OK", "application/json", body)]).await;

    let batch = api()
        .pull(PullRequest {
            base,
            since: 7,
            limit: 50,
            wait_secs: 0,
        })
        .await
        .expect("pull");

    let received = server.await.expect("server");
    assert_eq!(
        received.request_line,
        "GET /api/notify/pull?since=7&limit=50&wait=0 HTTP/1.1"
    );
    assert!(batch.ok);
    assert_eq!(
        batch.notifications,
        vec![Notification::new(8, Level::Success, "backup done")]
    );
    assert_eq!(batch.malformed, 1);
}

#[tokio::test]
async fn pull_reads_legacy_data_field() {
    let body = r#"{"ok":true,"data":[{"id":12,"message":"legacy"}]}"#;
    let (base, server) = serve_once(vec![reply("200 OK", "application/json", body)]).await;

    let batch = api()
        .pull(PullRequest {
            base: format!("{base}/"),
            since: 11,
            limit: 50,
            wait_secs: 0,
        })
        .await
        .expect("pull");

    let received = server.await.expect("server");
    assert!(received.request_line.starts_with("GET /api/notify/pull?since=11&"));
    assert_eq!(batch.notifications.len(), 1);
    assert_eq!(batch.notifications[0].id, 12);
}

#[tokio::test]
async fn pull_error_status_is_reported() {
    let body = r#"{"ok":false,"error":"maintenance"}"#;
    let (base, server) = serve_once(vec![reply(
        "503 Service Unavailable",
        "application/json",
        body,
    )])
    .await;

    let err = api()
        .pull(PullRequest {
            base,
            since: 0,
            limit: 50,
            wait_secs: 0,
        })
        .await
        .expect_err("status");

    server.await.expect("server");
    assert_eq!(err, TransportError::Status(503));
}

// =============================================================================
// Event stream
// =============================================================================

#[tokio::test]
async fn stream_decodes_events_split_across_chunks() {
    let (base, server) = serve_once(vec![
        chunked_head("200 OK", "text/event-stream; charset=utf-8"),
        chunk("event: ping\ndata: {}\n\n"),
        chunk("data: {\"id\":4,\"level\":\"error\","),
        chunk("\"message\":\"disk full\"}\n\n"),
        chunk("event: message\ndata: {oops\n\n"),
        chunk("event: digest\ndata: {}\n\n"),
        b"0\r\n\r\n".to_vec(),
    ])
    .await;

    let stream = api()
        .open_stream(StreamRequest {
            base,
            since: 3,
            heartbeat_secs: Some(15),
        })
        .await
        .expect("stream");
    let events: Vec<StreamEvent> = stream
        .map(|event| event.expect("event"))
        .collect()
        .await;

    let received = server.await.expect("server");
    assert_eq!(
        received.request_line,
        "GET /api/notify/stream?since=3&heartbeat=15 HTTP/1.1"
    );
    assert_eq!(received.header("accept"), Some("text/event-stream"));
    assert_eq!(
        events,
        vec![
            StreamEvent::Heartbeat,
            StreamEvent::Notification(Notification::new(4, Level::Error, "disk full")),
            StreamEvent::Malformed("{oops".to_string()),
            StreamEvent::Ignored("digest".to_string()),
        ]
    );
}

#[tokio::test]
async fn stream_without_heartbeat_omits_the_parameter() {
    let (base, server) = serve_once(vec![
        chunked_head("200 OK", "text/event-stream"),
        b"0\r\n\r\n".to_vec(),
    ])
    .await;

    let stream = api()
        .open_stream(StreamRequest {
            base,
            since: 0,
            heartbeat_secs: None,
        })
        .await
        .expect("stream");
    let events: Vec<_> = stream.collect().await;

    let received = server.await.expect("server");
    assert_eq!(received.request_line, "GET /api/notify/stream?since=0 HTTP/1.1");
    assert!(events.is_empty());
}

#[tokio::test]
async fn missing_stream_endpoint_is_unsupported() {
    let (base, server) = serve_once(vec![reply("404 Not Found", "text/plain", "no route")]).await;

    let err = api()
        .open_stream(StreamRequest {
            base,
            since: 0,
            heartbeat_secs: Some(15),
        })
        .await
        .err()
        .expect("404 must fail");

    server.await.expect("server");
    assert!(err.is_unsupported(), "{err}");
}

#[tokio::test]
async fn json_answer_to_stream_request_is_unsupported() {
    let (base, server) =
        serve_once(vec![reply("200 OK", "application/json", r#"{"ok":true}"#)]).await;

    let err = api()
        .open_stream(StreamRequest {
            base,
            since: 0,
            heartbeat_secs: None,
        })
        .await
        .err()
        .expect("json must fail");

    server.await.expect("server");
    assert!(err.is_unsupported(), "{err}");
}

#[tokio::test]
async fn stream_server_error_is_transient() {
    let (base, server) = serve_once(vec![reply(
        "503 Service Unavailable",
        "text/event-stream",
        "",
    )])
    .await;

    let err = api()
        .open_stream(StreamRequest {
            base,
            since: 0,
            heartbeat_secs: None,
        })
        .await
        .err()
        .expect("503 must fail");

    server.await.expect("server");
    assert_eq!(err, TransportError::Status(503));
}

// =============================================================================
// Test and send
// =============================================================================

#[tokio::test]
async fn trigger_test_posts_and_returns_body() {
    let body = r#"{"ok":true,"id":21}"#;
    let (base, server) = serve_once(vec![reply("200 OK", "application/json", body)]).await;

    let value = api().trigger_test(base).await.expect("test");

    let received = server.await.expect("server");
    assert_eq!(received.request_line, "POST /api/notify/test HTTP/1.1");
    assert_eq!(value, json!({ "ok": true, "id": 21 }));
}

#[tokio::test]
async fn error_status_with_json_body_passes_through() {
    let body = r#"{"ok":false,"error":"boom"}"#;
    let (base, server) = serve_once(vec![reply(
        "500 Internal Server Error",
        "application/json",
        body,
    )])
    .await;

    let value = api().trigger_test(base).await.expect("json body");

    server.await.expect("server");
    assert_eq!(value, json!({ "ok": false, "error": "boom" }));
}

#[tokio::test]
async fn error_status_without_json_body_is_reported() {
    let (base, server) = serve_once(vec![reply(
        "502 Bad Gateway",
        "text/html",
        "<html>bad gateway</html>",
    )])
    .await;

    let err = api().trigger_test(base).await.expect_err("no json");

    server.await.expect("server");
    assert_eq!(err, TransportError::Status(502));
}

#[tokio::test]
async fn send_posts_notification_as_json() {
    let (base, server) = serve_once(vec![reply(
        "200 OK",
        "application/json",
        r#"{"ok":true,"id":30}"#,
    )])
    .await;

    let outgoing = OutgoingNotification::new(Level::Warning, "disk at 90%")
        .with_source("A24")
        .with_user("Admin");
    let value = api().send(base, outgoing).await.expect("send");

    let received = server.await.expect("server");
    assert_eq!(received.request_line, "POST /api/notify/send HTTP/1.1");
    assert!(received
        .header("content-type")
        .is_some_and(|value| value.starts_with("application/json")));
    let sent: serde_json::Value = serde_json::from_str(&received.body).expect("json body");
    assert_eq!(
        sent,
        json!({ "level": "warning", "message": "disk at 90%", "source": "A24", "user": "Admin" })
    );
    assert_eq!(value, json!({ "ok": true, "id": 30 }));
}
