//! StationList component — the mosque station directory.
//!
//! Rows come from whichever listing `AppState::visible_stations` names.  The
//! active marker is derived from the session on every draw; the component
//! only keeps its cursor.

use minaret_proto::feed::LoadState;
use minaret_proto::station::Station;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::truncate,
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub struct StationList {
    pub list: ScrollableList<Station>,
    list_state: ListState,
}

impl StationList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            list_state: ListState::default(),
        }
    }

    /// Pull rows from the visible listing, keeping the cursor on the same
    /// station across refreshes.
    pub fn sync_stations(&mut self, state: &AppState) {
        let stations = state.visible_stations().items().to_vec();
        self.list.set_items_keep(stations, |a, b| a.id == b.id);
    }

    /// Switch to another listing: rows first, then the cursor to the top.
    pub fn reset(&mut self, state: &AppState) {
        self.sync_stations(state);
        self.list.select_first();
    }

    fn render_item<'a>(
        &self,
        station: &'a Station,
        is_cursor: bool,
        width: usize,
        state: &AppState,
    ) -> ListItem<'a> {
        let colors = state.colors();
        let session = state.session();
        let is_active = session.is_active(&station.id);
        let is_current = session.is_current(&station.id);

        let (icon, icon_style) = if is_active {
            ("▶", colors.active())
        } else if is_current {
            ("⏸", Style::default().fg(colors.paused))
        } else {
            (" ", colors.muted())
        };

        let name_style = if is_active {
            colors.active()
        } else if is_cursor {
            colors.strong()
        } else {
            colors.text()
        };

        let listeners = format!("{} listening ", station.listener_count);
        let badge = if station.is_live { "LIVE " } else { "" };
        let fixed = 4 + badge.len() + listeners.width();
        let name_max = width.saturating_sub(fixed).min(40);
        let name = truncate(&station.name, name_max);
        let loc_max = width.saturating_sub(fixed + name.width() + 2);
        let location = truncate(&station.location, loc_max);

        let used = 3 + name.width() + 2 + location.width() + badge.len();
        let pad = width.saturating_sub(used + listeners.width());

        let spans = vec![
            Span::raw(" "),
            Span::styled(icon, icon_style),
            Span::raw(" "),
            Span::styled(name, name_style),
            Span::raw("  "),
            Span::styled(location, colors.muted()),
            Span::raw(" ".repeat(pad)),
            Span::styled(badge, colors.live_badge()),
            Span::styled(listeners, colors.muted()),
        ];

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(colors.selected())
        } else {
            item
        }
    }
}

impl Component for StationList {
    fn id(&self) -> ComponentId {
        ComponentId::StationList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => {
                if let Some(station) = self.list.selected_item() {
                    return vec![Action::Select(station.snapshot())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let colors = state.colors();
        let listing = state.visible_stations();
        let title = if state.live_only {
            "Live Stations"
        } else {
            "Mosque Stations"
        };
        let count;
        let badge = match listing {
            LoadState::Failed(_) => Some(Badge {
                text: "ERR",
                color: colors.error,
            }),
            LoadState::Ready { .. } | LoadState::Empty if state.visible_refresh_error().is_some() => {
                Some(Badge {
                    text: "STALE",
                    color: colors.error,
                })
            }
            LoadState::Ready { value, .. } => {
                count = value.len().to_string();
                Some(Badge {
                    text: &count,
                    color: colors.muted_foreground,
                })
            }
            _ => None,
        };

        let block = pane_chrome(title, focused, badge, colors);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = match listing {
            LoadState::Loading => Some(Span::styled("  Loading stations…", colors.muted())),
            LoadState::Failed(err) => Some(Span::styled(
                format!(
                    "  Could not load stations from {}: {}  (r to retry)",
                    state.api_base, err
                ),
                Style::default().fg(colors.error),
            )),
            LoadState::Empty if state.live_only => Some(Span::styled(
                "  No stations are broadcasting right now",
                colors.muted(),
            )),
            LoadState::Empty => Some(Span::styled("  No stations yet", colors.muted())),
            LoadState::Ready { .. } => None,
        };
        if let Some(message) = message {
            frame.render_widget(
                Paragraph::new(Line::from(message)).wrap(Wrap { trim: false }),
                inner,
            );
            return;
        }

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let sel_in_view = self.list.selected_in_view();
        let items: Vec<ListItem> = self
            .list
            .visible_items(content_h)
            .iter()
            .enumerate()
            .map(|(row, station)| {
                self.render_item(station, row == sel_in_view, inner.width as usize, state)
            })
            .collect();

        let list = List::new(items).highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
