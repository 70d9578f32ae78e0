//! Status bar — bottom line with player state, directory state and keys.

use minaret_proto::session::PlayerState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.colors();
    let session = state.session();

    let (label, color) = match session.state() {
        PlayerState::Playing => ("PLAYING", colors.primary),
        PlayerState::Paused => ("PAUSED", colors.paused),
        PlayerState::Idle => ("IDLE", colors.muted_foreground),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(colors.primary_foreground)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("stations:{} ", state.visible_stations().label()),
            colors.muted(),
        ),
    ];
    if let Some(addr) = &state.control_addr {
        spans.push(Span::styled(format!("api:{} ", addr), colors.muted()));
    }

    let keys = if session.current().is_some() {
        " ↑↓/jk move  Enter select  Space play/pause  x close  +/- vol  m mute  l live  d menu  t theme  ? help  q quit"
    } else {
        " ↑↓/jk move  Enter play  Tab focus  l live  r refresh  d menu  t theme  ? help  q quit"
    };
    spans.push(Span::styled(keys, colors.muted()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
