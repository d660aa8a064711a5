// SPDX-License-Identifier: MPL-2.0
//! Plain-text rendering of notifications.

use crate::domain::Notification;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Formats a service timestamp as local wall-clock time (`HH:MM:SS`).
///
/// Accepts the service's naive ISO-8601 UTC strings, RFC 3339 and epoch
/// milliseconds. Anything else is returned unchanged.
#[must_use]
pub fn format_timestamp(ts: &str) -> String {
    format_timestamp_in(ts, &Local)
}

/// [`format_timestamp`] in an explicit time zone.
pub fn format_timestamp_in<Tz>(ts: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let trimmed = ts.trim();
    parse_timestamp(trimmed).map_or_else(
        || trimmed.to_string(),
        |utc| utc.with_timezone(tz).format("%H:%M:%S").to_string(),
    )
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    if ts.is_empty() {
        return None;
    }
    let numeric = ts
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-');
    if numeric {
        #[allow(clippy::cast_possible_truncation)] // epoch milliseconds fit in i64
        return ts
            .parse::<f64>()
            .ok()
            .and_then(|millis| DateTime::<Utc>::from_timestamp_millis(millis as i64));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
        return Some(parsed.to_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(ts, format).ok())
        .map(|naive| naive.and_utc())
}

/// Parts of the meta line: source, optional user, time, id.
pub(crate) fn meta_parts(notification: &Notification) -> Vec<String> {
    let mut parts = vec![format!("src: {}", notification.source)];
    if let Some(user) = &notification.user {
        parts.push(format!("user: {user}"));
    }
    if let Some(ts) = &notification.ts {
        parts.push(format_timestamp(ts));
    }
    if notification.id > 0 {
        parts.push(format!("#{}", notification.id));
    }
    parts
}

/// One terminal line per notification: `[LEVEL] message · src: … · #id`.
///
/// Control characters are replaced so a payload cannot move the cursor or
/// inject escape sequences.
#[must_use]
pub fn render_plain(notification: &Notification) -> String {
    let mut line = format!(
        "[{}] {}",
        notification.level.title(),
        notification.message.trim()
    );
    for part in meta_parts(notification) {
        line.push_str(" · ");
        line.push_str(&part);
    }
    line.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;
    use chrono::FixedOffset;

    #[test]
    fn naive_service_timestamp_is_treated_as_utc() {
        assert_eq!(format_timestamp_in("2025-01-01T10:00:00.123456", &Utc), "10:00:00");
        let paris = FixedOffset::east_opt(3600).expect("offset");
        assert_eq!(format_timestamp_in("2025-01-01T10:00:00", &paris), "11:00:00");
    }

    #[test]
    fn rfc3339_timestamp_is_converted() {
        assert_eq!(format_timestamp_in("2025-01-01T10:00:00+02:00", &Utc), "08:00:00");
    }

    #[test]
    fn epoch_millis_are_accepted() {
        assert_eq!(format_timestamp_in("1735725600000", &Utc), "10:00:00");
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_timestamp_in("yesterday", &Utc), "yesterday");
        assert_eq!(format_timestamp_in("", &Utc), "");
    }

    #[test]
    fn plain_line_includes_meta() {
        let n = Notification::new(5, Level::Error, "disk full")
            .with_source("A24")
            .with_user("Admin");
        assert_eq!(
            render_plain(&n),
            "[ERROR] disk full · src: A24 · user: Admin · #5"
        );
    }

    #[test]
    fn plain_line_omits_missing_id() {
        let n = Notification::new(0, Level::Info, "hi");
        assert_eq!(render_plain(&n), "[INFO] hi · src: A26");
    }

    #[test]
    fn control_characters_are_neutralised() {
        let n = Notification::new(1, Level::Info, "line1\nline2\u{1b}[31m");
        let line = render_plain(&n);
        assert!(!line.contains('\n'));
        assert!(!line.contains('\u{1b}'));
    }
}
