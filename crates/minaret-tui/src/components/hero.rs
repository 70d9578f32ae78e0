//! Hero — welcome banner above the feature carousel.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;

pub const HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.colors();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to Minaret Live", colors.strong())),
        Line::from(Span::styled("Your mosque community hub", colors.muted())),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
