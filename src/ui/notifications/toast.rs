// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small dark cards with a level-colored accent border, a title,
//! the message and a meta line. iced text widgets never interpret markup, so
//! untrusted fields are shown verbatim.

use super::manager::{Entry, Manager, Message};
use super::text::meta_parts;
use crate::ui::design_tokens::{
    border, darken, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::{
    alignment,
    font::Weight,
    widget::{button, container, text, Column, Container, Row, Space, Text},
    Border, Color, Element, Font, Length, Theme,
};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast.
    pub fn view(entry: &Entry) -> Element<'_, Message> {
        let notification = entry.notification();
        let accent = palette::accent(notification.level);

        let title = Text::new(notification.level.title())
            .size(typography::TITLE_SM)
            .font(Font {
                weight: Weight::Bold,
                ..Font::default()
            })
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent),
            });

        let dismiss_button = button(text("×").size(typography::BODY))
            .on_press(Message::Dismiss(entry.id()))
            .padding(spacing::XXS)
            .style(move |theme, status| dismiss_button_style(theme, status, accent));

        let header = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(title)
            .push(Space::new().width(Length::Fill))
            .push(dismiss_button);

        let message = Text::new(notification.message.as_str())
            .size(typography::BODY)
            .style(|_theme: &Theme| text::Style {
                color: Some(palette::TOAST_TEXT),
            });

        let meta = meta_parts(notification).into_iter().fold(
            Row::new().spacing(spacing::XS),
            |row, part| row.push(caption(part)),
        );

        let mut content = Column::new()
            .spacing(spacing::XXS)
            .push(header)
            .push(message)
            .push(meta);
        if let Some(details) = &notification.details {
            content = content.push(caption(details.clone()));
        }

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding([spacing::XS + 2.0, spacing::SM])
            .style(move |_theme: &Theme| toast_container_style(accent))
            .into()
    }

    /// Renders the toast overlay with all visible toasts.
    ///
    /// Positions toasts in the bottom-right corner, stacked vertically,
    /// newest at the bottom.
    pub fn view_overlay(manager: &Manager) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> = manager.visible().map(Self::view).collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS + 2.0)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }
}

fn caption<'a>(content: String) -> Text<'a> {
    Text::new(content)
        .size(typography::CAPTION)
        .style(|_theme: &Theme| text::Style {
            color: Some(palette::TOAST_META),
        })
}

/// Style function for the toast container.
fn toast_container_style(accent: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::SURFACE,
            ..palette::BLACK
        })),
        border: Border {
            color: accent,
            width: border::WIDTH_ACCENT,
            radius: radius::LG.into(),
        },
        shadow: shadow::GLOW,
        text_color: Some(palette::TOAST_TEXT),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(_theme: &Theme, status: button::Status, accent: Color) -> button::Style {
    let hover_background = |alpha: f32| {
        Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: palette::TOAST_TEXT,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: hover_background(opacity::OVERLAY_SUBTLE),
            text_color: accent,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Pressed => button::Style {
            background: hover_background(opacity::OVERLAY_MEDIUM),
            text_color: darken(accent, 0.2),
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::TOAST_TEXT
            },
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Level, Notification};

    #[test]
    fn toast_container_style_uses_accent_color() {
        let accent = palette::accent(Level::Success);
        let style = toast_container_style(accent);

        assert_eq!(style.border.color, accent);
        assert_eq!(style.border.width, border::WIDTH_ACCENT);
        assert!(style.background.is_some());
    }

    #[test]
    fn dismiss_button_highlights_with_accent() {
        let accent = palette::accent(Level::Warning);
        let hovered = dismiss_button_style(&Theme::Dark, button::Status::Hovered, accent);
        assert_eq!(hovered.text_color, accent);
        let active = dismiss_button_style(&Theme::Dark, button::Status::Active, accent);
        assert!(active.background.is_none());
    }

    #[test]
    fn views_build_for_every_level() {
        let mut manager = Manager::new();
        for level in Level::ALL {
            manager.push(
                Notification::new(1, level, "<b>not bold</b>")
                    .with_user("Admin")
                    .with_details(r#"{"disk":"/"}"#),
            );
        }
        let _ = Toast::view_overlay(&manager);
    }
}
