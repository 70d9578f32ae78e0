//! HelpOverlay component — centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Consume all keys while overlay is open
            _ => vec![Action::Noop],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let colors = state.colors();
        let popup = centered_rect(64, 26, area);

        let section = |title: &'static str| {
            Line::from(Span::styled(title, colors.muted().add_modifier(Modifier::BOLD)))
        };
        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(" keyboard shortcuts", colors.active())),
            Line::from(""),
            section(" listening"),
            help_row(colors, "enter", "play station (again: pause / resume)"),
            help_row(colors, "space", "pause / resume"),
            help_row(colors, "x", "close the player"),
            help_row(colors, "+ / -", "volume up / down"),
            help_row(colors, "m", "mute / unmute"),
            Line::from(""),
            section(" navigation"),
            help_row(colors, "↑ / ↓  or  j / k", "move selection"),
            help_row(colors, "← / →", "move between feature cards"),
            help_row(colors, "tab / shift-tab", "focus next / previous pane"),
            help_row(colors, "d", "open / close the menu"),
            Line::from(""),
            section(" directory & ui"),
            help_row(colors, "l", "live stations only on / off"),
            help_row(colors, "r", "refresh station lists"),
            help_row(colors, "t", "light / dark theme"),
            help_row(colors, "?", "toggle this help overlay"),
            help_row(colors, "q / Ctrl+C", "quit"),
            Line::from(""),
            Line::from(Span::styled(" press ? or esc to close", colors.muted())),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(colors.border(true))
                        .style(Style::default().bg(colors.card)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_row<'a>(colors: &Palette, key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("{:<18}", key), colors.active()),
        Span::styled(desc, colors.text()),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
