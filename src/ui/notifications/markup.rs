// SPDX-License-Identifier: MPL-2.0
//! HTML rendering of notifications.
//!
//! The fragment is meant to be dropped into a foreign page: every element
//! resets inherited styles with `all: initial`, and every untrusted field is
//! escaped.

use super::text::meta_parts;
use crate::domain::{Level, Notification};

const ROOT_STYLE: &str = "all: initial; display: block; box-sizing: border-box; \
    min-width: 260px; max-width: 420px; color: #e6ffff; background: rgba(0,0,0,.75); \
    border: 1px solid #00fff9; border-radius: 12px; padding: 10px 12px; \
    box-shadow: 0 0 18px rgba(0,255,249,.35); \
    font-family: system-ui, Arial, sans-serif; font-size: 14px; line-height: 1.2;";
const TITLE_STYLE: &str = "all: initial; display: block; font: inherit; color: inherit; \
    font-weight: 800; margin-bottom: 4px; text-shadow: 0 0 8px rgba(0,255,249,.6);";
const MESSAGE_STYLE: &str = "all: initial; display: block; font: inherit; color: inherit; \
    white-space: pre-wrap; overflow-wrap: break-word;";
const META_STYLE: &str = "all: initial; display: block; font-family: inherit; \
    font-size: 11px; color: #aaeeff; opacity: .9; margin-top: 6px;";
const META_ITEM_STYLE: &str = "all: initial; display: inline-block; font: inherit; \
    color: inherit; margin-right: 8px;";

/// CSS accent color of a level.
#[must_use]
pub fn accent_hex(level: Level) -> &'static str {
    match level {
        Level::Info => "#8fd3ff",
        Level::Success => "#7CFFB2",
        Level::Warning => "#FFD166",
        Level::Error => "#FF6B6B",
    }
}

/// Escapes `& < > " '` for use in HTML text and attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders a style-isolated toast fragment.
#[must_use]
pub fn render_html(notification: &Notification) -> String {
    let accent = accent_hex(notification.level);
    let meta: String = meta_parts(notification)
        .iter()
        .map(|part| format!(r#"<span style="{META_ITEM_STYLE}">{}</span>"#, escape_html(part)))
        .collect();

    format!(
        concat!(
            r#"<div data-matrix-notify="{id}" data-level="{level}" style="{root} border-left: 6px solid {accent};">"#,
            r#"<div style="{title}">{title_text}</div>"#,
            r#"<div style="{message}">{message_text}</div>"#,
            r#"<div style="{meta_style}">{meta}</div>"#,
            "</div>"
        ),
        id = notification.id,
        level = notification.level.as_str(),
        root = ROOT_STYLE,
        accent = accent,
        title = TITLE_STYLE,
        title_text = notification.level.title(),
        message = MESSAGE_STYLE,
        message_text = escape_html(&notification.message),
        meta_style = META_STYLE,
        meta = meta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn script_payload_renders_as_text() {
        let n = Notification::new(1, Level::Info, "<img src=x onerror=alert(1)>");
        let html = render_html(&n);
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn source_and_user_are_escaped() {
        let n = Notification::new(2, Level::Warning, "ok")
            .with_source("<b>A24</b>")
            .with_user("\"admin\"");
        let html = render_html(&n);
        assert!(html.contains("src: &lt;b&gt;A24&lt;/b&gt;"));
        assert!(html.contains("user: &quot;admin&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn fragment_is_style_isolated_and_accented() {
        let html = render_html(&Notification::new(3, Level::Error, "boom"));
        assert!(html.starts_with("<div data-matrix-notify=\"3\""));
        assert!(html.contains("all: initial"));
        assert!(html.contains("border-left: 6px solid #FF6B6B"));
        assert!(html.contains(">ERROR<"));
        assert!(html.contains("#3"));
    }

    #[test]
    fn every_element_resets_inherited_styles() {
        let html = render_html(&Notification::new(4, Level::Info, "x").with_user("u"));
        let elements = html.matches("<div").count() + html.matches("<span").count();
        assert_eq!(html.matches("all: initial").count(), elements);
    }
}
