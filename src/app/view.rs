// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! A control bar (service origin, start/stop, test) with the client status
//! underneath, and the toast overlay stacked on top.

use super::Message;
use crate::client::{ClientState, TransportMode};
use crate::config::DEFAULT_BASE_URL;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use iced::{
    alignment,
    widget::{button, text, text_input, Column, Container, Row, Stack, Text},
    Element, Length, Theme,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub state: ClientState,
    pub base_input: &'a str,
    /// Summary of the last test request, if any.
    pub last_test: Option<&'a str>,
    pub notifications: &'a notifications::Manager,
}

/// Renders the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let base_input = text_input(DEFAULT_BASE_URL, ctx.base_input)
        .on_input(Message::BaseInputChanged)
        .on_submit(Message::ApplyBase)
        .padding(6)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::BASE_INPUT_WIDTH));

    let toggle = if ctx.state.stopped {
        button(text("Start").size(typography::BODY)).on_press(Message::Start)
    } else {
        button(text("Stop").size(typography::BODY)).on_press(Message::Stop)
    };

    let controls = Row::new()
        .push(base_input)
        .push(button(text("Apply").size(typography::BODY)).on_press(Message::ApplyBase))
        .push(toggle)
        .push(button(text("Test").size(typography::BODY)).on_press(Message::Test))
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center);

    let mut body = Column::new()
        .push(controls)
        .push(caption(status_line(&ctx.state)))
        .spacing(spacing::SM)
        .padding(spacing::MD);

    if let Some(summary) = ctx.last_test {
        body = body.push(caption(summary.to_string()));
    }

    let overlay = Toast::view_overlay(ctx.notifications).map(Message::Notification);

    Stack::new()
        .push(
            Container::new(body)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(overlay)
        .into()
}

/// One-line summary of the client state.
pub fn status_line(state: &ClientState) -> String {
    let mut line = format!("{} · {} · last #{}", state.base, state.mode, state.last_id);
    if state.mode == TransportMode::Sse {
        line.push_str(&format!(" · retry {} ms", state.backoff_ms));
    }
    line
}

fn caption<'a>(content: String) -> Text<'a> {
    Text::new(content)
        .size(typography::CAPTION)
        .style(|_theme: &Theme| text::Style {
            color: Some(palette::GRAY_400),
        })
}
