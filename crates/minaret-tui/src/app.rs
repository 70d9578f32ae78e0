//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - A second channel carries `Action`s from the local control API.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - After every message the session is published on a `watch` channel and
//!   the now-playing poll is re-aimed at the current selection.

use std::io;
use std::time::Duration;

use minaret_proto::config::Config;
use minaret_proto::directory::{self, DirectoryClient, DirectorySnapshot};
use minaret_proto::feed::{FetchTag, LoadState, Tagged};
use minaret_proto::session::Session;
use minaret_proto::state::{PersistentState, StateFile};
use minaret_proto::station::{NowPlaying, Station, StationDetail};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Terminal,
};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::{
    action::{Action, ComponentId, Destination},
    app_state::AppState,
    component::Component,
    components::{
        drawer::{self, Drawer},
        feature_cards::{self, FeatureCards},
        help_overlay::HelpOverlay,
        hero, navbar, player_bar,
        station_list::StationList,
    },
    focus::FocusRing,
    poller,
    widgets::{status_bar, toast::ToastManager},
};

const VOLUME_STEP: f32 = 0.05;

/// Messages into the event loop from background tasks.
pub enum AppMessage {
    Event(Event),
    Stations(directory::Result<Vec<Station>>),
    LiveStations(directory::Result<Vec<Station>>),
    NowPlaying(Tagged<directory::Result<NowPlaying>>),
    Detail(Tagged<directory::Result<StationDetail>>),
}

/// Channels the App publishes on.
pub struct Publishers {
    pub session_tx: watch::Sender<Session>,
    pub directory_tx: watch::Sender<DirectorySnapshot>,
}

pub struct App {
    state: AppState,
    config: Config,
    client: DirectoryClient,
    state_file: StateFile,
    tx: mpsc::Sender<AppMessage>,
    publishers: Publishers,

    // Components
    feature_cards: FeatureCards,
    station_list: StationList,
    drawer: Drawer,
    help_overlay: HelpOverlay,
    toast: ToastManager,
    focus: FocusRing,

    // Per-selection fetches
    poll_tag: Option<FetchTag>,
    poll_tasks: Vec<AbortHandle>,

    published_rev: u64,
    persisted_volume: f32,
    should_quit: bool,
}

impl App {
    pub fn new(
        state: AppState,
        config: Config,
        client: DirectoryClient,
        state_file: StateFile,
        tx: mpsc::Sender<AppMessage>,
        publishers: Publishers,
    ) -> Self {
        let mut focus = FocusRing::new(vec![ComponentId::FeatureCards, ComponentId::StationList]);
        focus.set(ComponentId::StationList);
        let published_rev = state.session().rev();
        let persisted_volume = state.session().volume();
        Self {
            state,
            config,
            client,
            state_file,
            tx,
            publishers,
            feature_cards: FeatureCards::new(),
            station_list: StationList::new(),
            drawer: Drawer::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            focus,
            poll_tag: None,
            poll_tasks: Vec::new(),
            published_rev,
            persisted_volume,
            should_quit: false,
        }
    }

    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<AppMessage>,
        mut control_rx: mpsc::Receiver<Action>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: directory listings ───────────────────────────────
        let list_poll = poller::spawn_list_poll(
            self.client.clone(),
            self.config.list_interval(),
            self.tx.clone(),
        );

        // Toast expiry check
        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                    // Drain whatever queued up behind it before drawing again.
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next).await;
                    }
                }

                Some(action) = control_rx.recv() => {
                    self.dispatch(action);
                    needs_redraw = true;
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }

            self.after_change().await;
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        list_poll.abort();
        self.stop_polls();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("minaret exiting");

        Ok(())
    }

    /// Returns true when the screen needs a redraw.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,

            AppMessage::Stations(result) => {
                if let Ok(stations) = &result {
                    debug!("station list: {} stations", stations.len());
                    self.publishers
                        .directory_tx
                        .send_replace(DirectorySnapshot::new(stations.clone()));
                }
                let failed = apply_listing(
                    &mut self.state.stations,
                    &mut self.state.stations_error,
                    result,
                );
                if let Some(e) = failed {
                    warn!("station list fetch failed: {}", e);
                    if !self.state.live_only {
                        self.toast.error("Could not load stations");
                    }
                }
                self.station_list.sync_stations(&self.state);
                true
            }
            AppMessage::LiveStations(result) => {
                let failed = apply_listing(
                    &mut self.state.live_stations,
                    &mut self.state.live_error,
                    result,
                );
                if let Some(e) = failed {
                    warn!("live station list fetch failed: {}", e);
                    if self.state.live_only {
                        self.toast.error("Could not load stations");
                    }
                }
                self.station_list.sync_stations(&self.state);
                true
            }

            AppMessage::NowPlaying(tagged) => match tagged.accept(&self.state.store) {
                Some(Ok(np)) => {
                    self.state.now_playing = Some(np);
                    true
                }
                Some(Err(e)) => {
                    // Keep showing the last accepted value.
                    warn!("now-playing fetch failed: {}", e);
                    false
                }
                None => false,
            },
            AppMessage::Detail(tagged) => match tagged.accept(&self.state.store) {
                Some(Ok(detail)) => {
                    self.state.active_detail = Some(detail);
                    true
                }
                Some(Err(e)) => {
                    warn!("station detail fetch failed: {}", e);
                    false
                }
                None => false,
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Global keys, active regardless of focus
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('d') => return vec![Action::ToggleDrawer],
            _ => {}
        }

        // The drawer takes navigation keys while it has focus.
        if self.focus.is_focused(ComponentId::Drawer) {
            return self.drawer.handle_key(key, &self.state);
        }

        let session = self.state.session();
        match key.code {
            KeyCode::Char(' ') => return vec![Action::TogglePlay],
            KeyCode::Char('x') => return vec![Action::Close],
            KeyCode::Char('m') => return vec![Action::Mute],
            KeyCode::Char('+') | KeyCode::Char('=') => {
                return vec![Action::Volume(session.volume() + VOLUME_STEP)];
            }
            KeyCode::Char('-') => {
                return vec![Action::Volume(session.volume() - VOLUME_STEP)];
            }
            KeyCode::Char('t') => return vec![Action::ToggleTheme],
            KeyCode::Char('l') => return vec![Action::SetLiveOnly(!self.state.live_only)],
            KeyCode::Char('r') => return vec![Action::Refresh],
            _ => {}
        }

        match self.focus.current() {
            Some(ComponentId::FeatureCards) => self.feature_cards.handle_key(key, &self.state),
            Some(ComponentId::StationList) => self.station_list.handle_key(key, &self.state),
            _ => vec![],
        }
    }

    fn dispatch(&mut self, action: Action) {
        // Broadcast action to all components first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.feature_cards.on_action(&action, s));
            out.extend(self.station_list.on_action(&action, s));
            out.extend(self.drawer.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Noop => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Session ───────────────────────────────────────────────────────
            Action::Select(snapshot) => self.state.store.select(snapshot),
            Action::TogglePlay => self.state.store.toggle_play(),
            Action::Close => self.state.store.close(),
            Action::Volume(v) => self.state.store.set_volume(v),
            Action::Mute => self.state.store.toggle_mute(),

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::Navigate(dest) => {
                self.state.live_only = dest == Destination::LiveStations;
                self.station_list.reset(&self.state);
                self.focus.set(match dest {
                    Destination::Home => ComponentId::FeatureCards,
                    Destination::AllStations | Destination::LiveStations => {
                        ComponentId::StationList
                    }
                });
            }

            // ── Directory ─────────────────────────────────────────────────────
            Action::SetLiveOnly(on) => {
                self.state.live_only = on;
                self.station_list.reset(&self.state);
                self.toast.info(if on {
                    "Showing live stations"
                } else {
                    "Showing all stations"
                });
            }
            Action::Refresh => {
                poller::spawn_refresh(self.client.clone(), self.tx.clone());
                self.toast.info("Refreshing stations…");
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleDrawer => {
                self.state.drawer_open = !self.state.drawer_open;
                if self.state.drawer_open {
                    self.focus.set_items(vec![
                        ComponentId::Drawer,
                        ComponentId::FeatureCards,
                        ComponentId::StationList,
                    ]);
                    self.focus.set(ComponentId::Drawer);
                } else {
                    self.focus
                        .set_items(vec![ComponentId::FeatureCards, ComponentId::StationList]);
                    self.focus.set(ComponentId::StationList);
                }
            }
            Action::ToggleTheme => {
                self.state.theme.toggle();
                info!("theme: {}", self.state.theme.name().label());
            }
            // The overlay flips itself in on_action.
            Action::ToggleHelp => {}
            Action::Notify(msg) => self.toast.info(msg),

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    async fn after_change(&mut self) {
        self.sync_polls();
        self.publish().await;
    }

    /// Keep the per-selection fetches aimed at the current selection: a new
    /// selection restarts them, `close` stops them.  Pausing keeps them.
    fn sync_polls(&mut self) {
        let want = FetchTag::for_current(&self.state.store);
        if want != self.poll_tag {
            self.stop_polls();
            self.state.now_playing = None;
            self.state.active_detail = None;
            self.poll_tag = want;
        }
        if !self.poll_tasks.is_empty() {
            return;
        }
        let Some(tag) = self.poll_tag.clone() else {
            return;
        };
        // Requests go by slug, which only the directory knows.  Retried on
        // the next message if the listing hasn't arrived yet.
        let Some(slug) = self
            .state
            .fresh_station(&tag.station)
            .map(|s| s.slug.clone())
        else {
            debug!("no slug yet for {}", tag.station);
            return;
        };
        debug!("starting now-playing poll for {} ({})", tag.station, slug);
        self.poll_tasks.push(poller::spawn_detail_fetch(
            self.client.clone(),
            tag.clone(),
            slug.clone(),
            self.tx.clone(),
        ));
        self.poll_tasks.push(poller::spawn_now_playing_poll(
            self.client.clone(),
            tag,
            slug,
            self.config.now_playing_interval(),
            self.tx.clone(),
        ));
    }

    fn stop_polls(&mut self) {
        for handle in self.poll_tasks.drain(..) {
            handle.abort();
        }
    }

    /// Publish the session to the control API and persist volume changes.
    /// The save is awaited so writes land in order and finish before exit.
    async fn publish(&mut self) {
        let session = self.state.session();
        if session.rev() == self.published_rev {
            return;
        }
        self.published_rev = session.rev();
        self.publishers.session_tx.send_replace(session.clone());

        if session.volume() != self.persisted_volume {
            self.persisted_volume = session.volume();
            let persistent = PersistentState::from_session(session);
            if let Err(e) = self.state_file.save(&persistent).await {
                warn!("failed to save {}: {}", self.state_file.path().display(), e);
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let colors = self.state.colors();
        frame.render_widget(Block::default().style(colors.base()), area);

        let player_h = if player_bar::is_visible(&self.state) {
            player_bar::HEIGHT
        } else {
            0
        };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(player_h),
                Constraint::Length(1),
            ])
            .split(area);
        let (nav_area, body_area, player_area, status_area) =
            (outer[0], outer[1], outer[2], outer[3]);

        navbar::draw(frame, nav_area, &self.state);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(hero::HEIGHT),
                Constraint::Length(feature_cards::HEIGHT),
                Constraint::Min(3),
            ])
            .split(body_area);
        hero::draw(frame, body[0], &self.state);
        self.feature_cards.draw(
            frame,
            body[1],
            self.focus.is_focused(self.feature_cards.id()),
            &self.state,
        );
        self.station_list.draw(
            frame,
            body[2],
            self.focus.is_focused(self.station_list.id()),
            &self.state,
        );

        if player_h > 0 {
            player_bar::draw(frame, player_area, &self.state);
        }
        status_bar::draw_keys_bar(frame, status_area, &self.state);

        // ── Drawer slides over the left edge of the body ──────────────────────
        if self.state.drawer_open {
            let drawer_area = Rect {
                width: drawer::WIDTH.min(body_area.width),
                ..body_area
            };
            self.drawer.draw(
                frame,
                drawer_area,
                self.focus.is_focused(self.drawer.id()),
                &self.state,
            );
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        let help_focused = self.focus.is_focused(self.help_overlay.id());
        self.help_overlay.draw(frame, area, help_focused, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area, colors);
    }
}

/// Apply a list fetch to `listing`.  A failure only replaces a listing that
/// never loaded; otherwise the last good rows stay and the error is kept in
/// `refresh_error`.  Returns the error text on failure.
fn apply_listing(
    listing: &mut LoadState<Vec<Station>>,
    refresh_error: &mut Option<String>,
    result: directory::Result<Vec<Station>>,
) -> Option<String> {
    match result {
        Ok(stations) => {
            *listing = LoadState::from_list(stations);
            *refresh_error = None;
            None
        }
        Err(e) => {
            let msg = e.to_string();
            match listing {
                LoadState::Loading | LoadState::Failed(_) => {
                    *listing = LoadState::Failed(msg.clone());
                }
                LoadState::Empty | LoadState::Ready { .. } => {
                    *refresh_error = Some(msg.clone());
                }
            }
            Some(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::test_support::*;
    use minaret_proto::feed::FetchTag;
    use minaret_proto::session::PlayerState;
    use ratatui::crossterm::event::KeyEvent;

    struct Harness {
        app: App,
        _rx: mpsc::Receiver<AppMessage>,
        session_rx: watch::Receiver<Session>,
        directory_rx: watch::Receiver<DirectorySnapshot>,
        _dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel(64);
        let (session_tx, session_rx) = watch::channel(Session::default());
        let (directory_tx, directory_rx) = watch::channel(DirectorySnapshot::default());
        // Nothing listens here; per-selection fetches fail quietly.
        let client = DirectoryClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let app = App::new(
            state_with(vec![]),
            Config::default(),
            client,
            StateFile::new(dir.path().join("state.json")),
            tx,
            Publishers {
                session_tx,
                directory_tx,
            },
        );
        Harness {
            app,
            _rx: rx,
            session_rx,
            directory_rx,
            _dir: dir,
        }
    }

    fn press(code: KeyCode) -> AppMessage {
        AppMessage::Event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    async fn load(h: &mut Harness, stations: Vec<Station>) {
        h.app.handle_message(AppMessage::Stations(Ok(stations))).await;
        h.app.after_change().await;
    }

    #[tokio::test]
    async fn test_enter_selects_and_same_row_toggles() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true), station("s2", "Masjid B", true)]).await;

        h.app.handle_message(press(KeyCode::Enter)).await;
        h.app.after_change().await;
        assert_eq!(h.app.state.session().state(), PlayerState::Playing);
        assert_eq!(h.app.state.session().current_id().unwrap().as_str(), "s1");

        h.app.handle_message(press(KeyCode::Enter)).await;
        assert_eq!(h.app.state.session().state(), PlayerState::Paused);

        h.app.handle_message(press(KeyCode::Down)).await;
        h.app.handle_message(press(KeyCode::Enter)).await;
        assert_eq!(h.app.state.session().state(), PlayerState::Playing);
        assert_eq!(h.app.state.session().current_id().unwrap().as_str(), "s2");
    }

    #[tokio::test]
    async fn test_session_published_on_change() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true)]).await;
        assert_eq!(h.directory_rx.borrow().stations().len(), 1);

        h.app.dispatch(Action::Select(station("s1", "Masjid A", true).snapshot()));
        h.app.after_change().await;
        assert!(h.session_rx.has_changed().unwrap());
        assert!(h.session_rx.borrow_and_update().is_playing());

        h.app.dispatch(Action::Close);
        h.app.after_change().await;
        assert_eq!(h.session_rx.borrow().state(), PlayerState::Idle);
    }

    #[tokio::test]
    async fn test_polls_follow_selection() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true), station("s2", "Masjid B", true)]).await;

        h.app.dispatch(Action::Select(station("s1", "Masjid A", true).snapshot()));
        h.app.after_change().await;
        let first = h.app.poll_tag.clone().unwrap();
        assert_eq!(first.station.as_str(), "s1");
        assert_eq!(h.app.poll_tasks.len(), 2);

        // Pause keeps the poll.
        h.app.dispatch(Action::TogglePlay);
        h.app.after_change().await;
        assert_eq!(h.app.poll_tag.as_ref(), Some(&first));

        h.app.dispatch(Action::Close);
        h.app.after_change().await;
        assert!(h.app.poll_tag.is_none());
        assert!(h.app.poll_tasks.is_empty());
    }

    #[tokio::test]
    async fn test_stale_now_playing_is_dropped() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true), station("s2", "Masjid B", true)]).await;

        h.app.dispatch(Action::Select(station("s1", "Masjid A", true).snapshot()));
        let old_tag = FetchTag::for_current(&h.app.state.store).unwrap();
        h.app.dispatch(Action::Select(station("s2", "Masjid B", true).snapshot()));
        h.app.after_change().await;

        let late = NowPlaying {
            station_name: "Masjid A".into(),
            is_live: false,
            current_track: None,
        };
        let redraw = h
            .app
            .handle_message(AppMessage::NowPlaying(Tagged::new(old_tag, Ok(late))))
            .await;
        assert!(!redraw);
        assert!(h.app.state.now_playing.is_none());
        assert_eq!(h.app.state.session().current_id().unwrap().as_str(), "s2");
    }

    #[tokio::test]
    async fn test_list_failure_sets_failed_and_toasts() {
        let mut h = harness();
        let err = minaret_proto::directory::DirectoryError::NotFound("stations".into());
        h.app.handle_message(AppMessage::Stations(Err(err))).await;
        assert!(matches!(h.app.state.stations, LoadState::Failed(_)));
        assert!(!h.app.toast.is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_listing() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true)]).await;
        h.app.dispatch(Action::Select(station("s1", "Masjid A", true).snapshot()));
        h.app.after_change().await;

        let err = minaret_proto::directory::DirectoryError::Api {
            status: "error".into(),
            message: "bad gateway".into(),
        };
        h.app.handle_message(AppMessage::Stations(Err(err))).await;

        assert_eq!(h.app.state.stations.items().len(), 1);
        assert!(h.app.state.current_is_live());
        assert!(h.app.state.visible_refresh_error().is_some());
        assert_eq!(h.app.station_list.list.selected_item().unwrap().id.as_str(), "s1");
        assert!(!h.app.toast.is_empty());

        // The next good fetch clears the stale marker.
        load(&mut h, vec![station("s1", "Masjid A", true)]).await;
        assert!(h.app.state.visible_refresh_error().is_none());
    }

    #[tokio::test]
    async fn test_full_frame_layout() {
        let mut h = harness();
        load(&mut h, vec![station("s1", "Masjid A", true)]).await;

        let rows = crate::components::render_rows(100, 30, |f, _| h.app.draw(f));
        assert!(rows.iter().any(|r| r.contains("Welcome to Minaret Live")));
        assert!(rows.iter().any(|r| r.contains("Masjid A")));

        h.app.handle_message(press(KeyCode::Char('d'))).await;
        let rows = crate::components::render_rows(100, 30, |f, _| h.app.draw(f));
        assert!(rows.iter().any(|r| r.contains("Home")));
    }

    #[tokio::test]
    async fn test_volume_saves_land_in_order() {
        let mut h = harness();
        for i in 1..=20 {
            h.app.dispatch(Action::Volume(i as f32 / 20.0));
            h.app.after_change().await;
        }
        h.app.dispatch(Action::Volume(0.3));
        h.app.after_change().await;
        assert_eq!(h.app.state_file.load(0.8).volume, 0.3);
    }

    #[tokio::test]
    async fn test_volume_keys_clamp_and_persist() {
        let mut h = harness();
        for _ in 0..10 {
            h.app.handle_message(press(KeyCode::Char('+'))).await;
        }
        h.app.after_change().await;
        assert_eq!(h.app.state.session().volume(), 1.0);
        assert_eq!(h.app.persisted_volume, 1.0);
        assert_eq!(h.app.state_file.load(0.8).volume, 1.0);

        h.app.handle_message(press(KeyCode::Char('m'))).await;
        assert!(h.app.state.session().is_muted());
        h.app.handle_message(press(KeyCode::Char('m'))).await;
        assert_eq!(h.app.state.session().volume(), 1.0);
    }

    #[tokio::test]
    async fn test_drawer_takes_focus_and_live_toggle() {
        let mut h = harness();
        h.app.handle_message(press(KeyCode::Char('d'))).await;
        assert!(h.app.state.drawer_open);
        assert!(h.app.focus.is_focused(ComponentId::Drawer));

        h.app.handle_message(press(KeyCode::Char('d'))).await;
        assert!(!h.app.state.drawer_open);
        assert!(h.app.focus.is_focused(ComponentId::StationList));

        h.app.handle_message(press(KeyCode::Char('l'))).await;
        assert!(h.app.state.live_only);
        h.app.handle_message(press(KeyCode::Char('l'))).await;
        assert!(!h.app.state.live_only);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let mut h = harness();
        h.app.handle_message(press(KeyCode::Char('?'))).await;
        assert!(h.app.help_overlay.visible);
        h.app.handle_message(press(KeyCode::Char('q'))).await;
        assert!(!h.app.help_overlay.visible);
        assert!(!h.app.should_quit);
    }
}
