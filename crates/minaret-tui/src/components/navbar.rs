//! Navbar — one-row top bar: brand, session indicator, theme and menu hint.
//!
//! Not focusable.

use minaret_proto::session::PlayerState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::components::truncate;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.colors();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(area);

    let mut left = vec![Span::styled(" ☪ Minaret Live ", colors.active())];
    let session = state.session();
    if let Some(current) = session.current() {
        let name = truncate(&current.name, cols[0].width.saturating_sub(24) as usize);
        match session.state() {
            PlayerState::Playing => {
                left.push(Span::styled("● ", colors.live_badge()));
                left.push(Span::styled(name, colors.strong()));
            }
            _ => {
                left.push(Span::styled("⏸ ", ratatui::style::Style::default().fg(colors.paused)));
                left.push(Span::styled(name, colors.muted()));
            }
        }
    }
    frame.render_widget(Paragraph::new(Line::from(left)), cols[0]);

    let right = Line::from(vec![
        Span::styled(format!("{} ", state.theme.name().label()), colors.muted()),
        Span::styled("t", colors.active()),
        Span::styled(" theme  ", colors.muted()),
        Span::styled("d", colors.active()),
        Span::styled(" menu ", colors.muted()),
    ])
    .right_aligned();
    frame.render_widget(Paragraph::new(right), cols[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::test_support::*;
    use crate::components::render_rows;

    #[test]
    fn test_shows_selection_only_when_selected() {
        let mut state = state_with(vec![station("s1", "Masjid A", true)]);
        let rows = render_rows(80, 1, |f, area| draw(f, area, &state));
        assert!(rows[0].contains("Minaret Live"));
        assert!(!rows[0].contains("Masjid A"));

        state.store.select(state.stations.items()[0].snapshot());
        let rows = render_rows(80, 1, |f, area| draw(f, area, &state));
        assert!(rows[0].contains("● Masjid A"));
    }
}
