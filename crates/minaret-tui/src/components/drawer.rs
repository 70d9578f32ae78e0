//! Drawer — slide-in navigation menu on the left edge.

use minaret_proto::config::Config;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId, Destination},
    app_state::AppState,
    component::Component,
    widgets::pane_chrome::pane_chrome,
};

pub const WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Entry {
    Home,
    LiveStations,
    PrayerTimes,
    Settings,
    Theme,
}

const ENTRIES: [Entry; 5] = [
    Entry::Home,
    Entry::LiveStations,
    Entry::PrayerTimes,
    Entry::Settings,
    Entry::Theme,
];

impl Entry {
    fn label(self, state: &AppState) -> String {
        match self {
            Entry::Home => "Home".to_string(),
            Entry::LiveStations => "Live Stations".to_string(),
            Entry::PrayerTimes => "Prayer Times".to_string(),
            Entry::Settings => "Settings".to_string(),
            Entry::Theme => format!("Theme: {}", state.theme.name().label()),
        }
    }

    fn action(self) -> Vec<Action> {
        match self {
            Entry::Home => vec![Action::Navigate(Destination::Home), Action::ToggleDrawer],
            Entry::LiveStations => vec![
                Action::Navigate(Destination::LiveStations),
                Action::ToggleDrawer,
            ],
            Entry::PrayerTimes => vec![Action::Notify("Prayer times are coming soon".to_string())],
            Entry::Settings => vec![Action::Notify(format!(
                "Settings: {}",
                Config::config_path().display()
            ))],
            // Theme stays in the drawer so the change is visible straight away.
            Entry::Theme => vec![Action::ToggleTheme],
        }
    }
}

pub struct Drawer {
    selected: usize,
}

impl Drawer {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Component for Drawer {
    fn id(&self) -> ComponentId {
        ComponentId::Drawer
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1)
            }
            KeyCode::Enter => return ENTRIES[self.selected].action(),
            KeyCode::Esc => return vec![Action::ToggleDrawer],
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        // Opening starts at the top.
        if matches!(action, Action::ToggleDrawer) && !state.drawer_open {
            self.selected = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let colors = state.colors();
        frame.render_widget(Clear, area);
        let block = pane_chrome("Menu", focused, None, colors);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = ENTRIES
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let label = format!(" {} ", entry.label(state));
                if i == self.selected {
                    Line::from(vec![
                        Span::styled("›", colors.active()),
                        Span::styled(label, colors.selected()),
                    ])
                } else {
                    Line::from(vec![Span::raw(" "), Span::styled(label, colors.text())])
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Esc / d to close", colors.muted())));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::test_support::state_with;
    use ratatui::crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_live_entry_navigates_and_closes() {
        let state = state_with(vec![]);
        let mut drawer = Drawer::new();
        drawer.handle_key(press(KeyCode::Down), &state);
        let actions = drawer.handle_key(press(KeyCode::Enter), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::Navigate(Destination::LiveStations), Action::ToggleDrawer]
        ));
    }

    #[test]
    fn test_theme_entry_toggles_theme() {
        let state = state_with(vec![]);
        let mut drawer = Drawer::new();
        for _ in 0..10 {
            drawer.handle_key(press(KeyCode::Down), &state);
        }
        let actions = drawer.handle_key(press(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::ToggleTheme]));
    }
}
