//! Player bar — bottom panel for the selected station.
//!
//! Drawn only while a station is selected.  Identity comes from the session
//! snapshot; LIVE and the current track come from the freshest directory
//! data so a stale snapshot never shows an old broadcast state.

use minaret_proto::session::PlayerState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app_state::AppState;
use crate::components::truncate;
use crate::widgets::pane_chrome::pane_chrome;

pub const HEIGHT: u16 = 4;

/// Whether the bar occupies any space this frame.
pub fn is_visible(state: &AppState) -> bool {
    state.session().current().is_some()
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(current) = state.session().current() else {
        return;
    };
    let colors = state.colors();
    let session = state.session();

    let block = pane_chrome("Now Playing", false, None, colors);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    // ── Row 1: glyph, name, location, LIVE ──────────────────────────────────
    let (glyph, glyph_style) = match session.state() {
        PlayerState::Playing => ("▶", colors.active()),
        _ => ("⏸", Style::default().fg(colors.paused)),
    };
    let is_live = state.current_is_live();
    let live_w = if is_live { 7 } else { 0 };

    let volume = if session.is_muted() {
        "muted".to_string()
    } else {
        format!("vol {:>3.0}%", session.volume() * 100.0)
    };
    let right_w = volume.width() + 2;

    let width = inner.width as usize;
    let name_max = width.saturating_sub(4 + live_w + right_w).min(48);
    let name = truncate(&current.name, name_max);
    let loc_max = width.saturating_sub(4 + live_w + right_w + name.width() + 3);
    let location = truncate(&current.location, loc_max);

    let mut left = vec![
        Span::raw(" "),
        Span::styled(glyph, glyph_style),
        Span::raw(" "),
        Span::styled(name, colors.strong()),
    ];
    if !location.is_empty() {
        left.push(Span::styled(" · ", colors.muted()));
        left.push(Span::styled(location, colors.muted()));
    }
    if is_live {
        left.push(Span::raw("  "));
        left.push(Span::styled("● LIVE", colors.live_badge()));
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_w as u16)])
        .split(rows[0]);
    frame.render_widget(Paragraph::new(Line::from(left)), cols[0]);
    let volume_style = if session.is_muted() {
        Style::default().fg(colors.paused)
    } else {
        colors.text()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{} ", volume), volume_style)))
            .right_aligned(),
        cols[1],
    );

    // ── Row 2: track, stream format, hints ──────────────────────────────────
    let mut hints = String::new();
    if let Some(detail) = state
        .active_detail
        .as_ref()
        .filter(|d| session.is_current(&d.id))
    {
        hints.push_str(&format!(
            "{} kbps {} · ",
            detail.settings.bitrate,
            detail.settings.format.label()
        ));
    }
    let toggle_hint = if session.is_playing() {
        "space pause"
    } else {
        "space play"
    };
    hints.push_str(&format!("{} · m mute · x close ", toggle_hint));

    let track_max = width.saturating_sub(hints.width() + 6);
    let track = match state.current_track() {
        Some(t) => Span::styled(format!("   ♪ {}", truncate(&t, track_max)), colors.text()),
        None => Span::styled("   No track information", colors.muted()),
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hints.width() as u16)])
        .split(rows[1]);
    frame.render_widget(Paragraph::new(Line::from(track)), cols[0]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, colors.muted()))).right_aligned(),
        cols[1],
    );
}
