//! FeatureCards — horizontal carousel of the four feature cards.
//!
//! ←/→ move the highlighted card while focused; Enter follows it.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId, Destination},
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub const HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feature {
    LiveBroadcasts,
    FindMosques,
    PrayerTimes,
    Community,
}

pub const FEATURES: [Feature; 4] = [
    Feature::LiveBroadcasts,
    Feature::FindMosques,
    Feature::PrayerTimes,
    Feature::Community,
];

impl Feature {
    pub fn title(self) -> &'static str {
        match self {
            Self::LiveBroadcasts => "Live Broadcasts",
            Self::FindMosques => "Find Mosques",
            Self::PrayerTimes => "Prayer Times",
            Self::Community => "Community",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::LiveBroadcasts => "Listen to live lectures, prayers and sermons from mosques",
            Self::FindMosques => "Discover mosques in your area with prayer times",
            Self::PrayerTimes => "Accurate prayer times based on your location",
            Self::Community => "Connect with your local mosque community",
        }
    }

    fn color(self, colors: &Palette) -> Color {
        match self {
            Self::LiveBroadcasts => colors.primary,
            Self::FindMosques => colors.blue,
            Self::PrayerTimes => colors.purple,
            Self::Community => colors.accent,
        }
    }

    /// What Enter on this card does.
    pub fn action(self) -> Action {
        match self {
            Self::LiveBroadcasts => Action::Navigate(Destination::LiveStations),
            Self::FindMosques => Action::Navigate(Destination::AllStations),
            Self::PrayerTimes => Action::Notify("Prayer times are coming soon".to_string()),
            Self::Community => Action::Notify("Community is coming soon".to_string()),
        }
    }
}

pub struct FeatureCards {
    selected: usize,
}

impl FeatureCards {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> Feature {
        FEATURES[self.selected]
    }
}

impl Component for FeatureCards {
    fn id(&self) -> ComponentId {
        ComponentId::FeatureCards
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1).min(FEATURES.len() - 1);
            }
            KeyCode::Enter => return vec![self.selected().action()],
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let colors = state.colors();
        // Narrow terminals show a sliding window of cards around the cursor.
        let fit = ((area.width / 24) as usize).clamp(1, FEATURES.len());
        let first = self.selected.saturating_sub(fit - 1).min(FEATURES.len() - fit);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, fit as u32); fit])
            .split(area);

        for (slot, feature) in FEATURES.iter().skip(first).take(fit).enumerate() {
            let is_selected = first + slot == self.selected;
            let accent = feature.color(colors);
            let border = if is_selected && focused {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                colors.border(false)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .style(Style::default().bg(colors.card))
                .title(Span::styled(
                    format!(" {} ", feature.title()),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ));
            let text = Paragraph::new(Line::from(Span::styled(
                feature.description(),
                colors.muted(),
            )))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(text, cols[slot]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_clamp_at_ends() {
        let state = crate::app_state::test_support::state_with(vec![]);
        let mut cards = FeatureCards::new();
        cards.handle_key(press(KeyCode::Left), &state);
        assert_eq!(cards.selected(), Feature::LiveBroadcasts);
        for _ in 0..10 {
            cards.handle_key(press(KeyCode::Right), &state);
        }
        assert_eq!(cards.selected(), Feature::Community);
    }

    #[test]
    fn test_enter_on_live_broadcasts_navigates() {
        let state = crate::app_state::test_support::state_with(vec![]);
        let mut cards = FeatureCards::new();
        let actions = cards.handle_key(press(KeyCode::Enter), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::Navigate(Destination::LiveStations)]
        ));
    }
}
