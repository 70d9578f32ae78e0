//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use minaret_proto::feed::LoadState;
use minaret_proto::session::{Session, SessionStore};
use minaret_proto::station::{NowPlaying, Station, StationDetail, StationId};

use crate::theme::{Palette, ThemeStore};

/// The full shared state of the application.
pub struct AppState {
    // ── Session ─────────────────────────────────────────────────────────────
    /// Sole owner of the now-playing selection.  Surfaces read it through
    /// `session()`; only App calls the mutations.
    pub store: SessionStore,

    // ── Directory ───────────────────────────────────────────────────────────
    pub stations: LoadState<Vec<Station>>,
    pub live_stations: LoadState<Vec<Station>>,
    /// Last refresh error for a listing that still shows older rows.
    pub stations_error: Option<String>,
    pub live_error: Option<String>,
    /// Station list shows `/stations/live` instead of `/stations`.
    pub live_only: bool,
    /// Latest accepted now-playing reply for the selected station.
    pub now_playing: Option<NowPlaying>,
    /// Latest accepted detail record for the selected station.
    pub active_detail: Option<StationDetail>,

    // ── UI ──────────────────────────────────────────────────────────────────
    pub theme: ThemeStore,
    pub drawer_open: bool,
    pub api_base: String,
    /// Local control API address when it is running.
    pub control_addr: Option<String>,
}

impl AppState {
    pub fn new(store: SessionStore, theme: ThemeStore, api_base: String) -> Self {
        Self {
            store,
            stations: LoadState::Loading,
            live_stations: LoadState::Loading,
            stations_error: None,
            live_error: None,
            live_only: false,
            now_playing: None,
            active_detail: None,
            theme,
            drawer_open: false,
            api_base,
            control_addr: None,
        }
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn colors(&self) -> &'static Palette {
        self.theme.colors()
    }

    /// Whichever listing the station list is showing.
    pub fn visible_stations(&self) -> &LoadState<Vec<Station>> {
        if self.live_only {
            &self.live_stations
        } else {
            &self.stations
        }
    }

    /// Refresh error for the visible listing, if its rows are stale.
    pub fn visible_refresh_error(&self) -> Option<&str> {
        if self.live_only {
            self.live_error.as_deref()
        } else {
            self.stations_error.as_deref()
        }
    }

    /// Fresh directory data for `id`.  The session keeps only a snapshot, so
    /// anything that may have changed since selection is read from here.
    pub fn fresh_station(&self, id: &StationId) -> Option<&Station> {
        self.stations
            .items()
            .iter()
            .chain(self.live_stations.items())
            .find(|s| &s.id == id)
    }

    /// Live flag for the selected station: the now-playing poll is the most
    /// recent source, then the directory listing.
    pub fn current_is_live(&self) -> bool {
        let Some(id) = self.session().current_id() else {
            return false;
        };
        if let Some(np) = &self.now_playing {
            return np.is_live;
        }
        self.fresh_station(id).map(|s| s.is_live).unwrap_or(false)
    }

    /// Display string of the selected station's current track.
    pub fn current_track(&self) -> Option<String> {
        let id = self.session().current_id()?;
        if let Some(np) = &self.now_playing {
            return np.current_track.as_ref().and_then(|t| t.display());
        }
        self.fresh_station(id)
            .and_then(|s| s.current_track.as_ref())
            .and_then(|t| t.display())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_fresh_lookup_by_id_not_snapshot() {
        let mut state = state_with(vec![station("s1", "Masjid A", true)]);
        state.store.select(state.stations.items()[0].snapshot());

        // Directory refresh flips the live flag; the snapshot is untouched.
        state.stations = LoadState::from_list(vec![station("s1", "Masjid A (renamed)", false)]);
        assert!(!state.current_is_live());
        assert_eq!(state.session().current().unwrap().name, "Masjid A");
        assert_eq!(
            state.fresh_station(&StationId::new("s1")).unwrap().name,
            "Masjid A (renamed)"
        );
    }

    #[test]
    fn test_selected_station_missing_from_latest_list() {
        let mut state = state_with(vec![station("s1", "Masjid A", true)]);
        state.store.select(state.stations.items()[0].snapshot());
        state.stations = LoadState::Empty;

        assert!(state.session().is_playing());
        assert!(!state.current_is_live());
        assert!(state.current_track().is_none());
    }

    #[test]
    fn test_now_playing_overrides_listing() {
        let mut state = state_with(vec![station("s1", "Masjid A", false)]);
        state.store.select(state.stations.items()[0].snapshot());
        state.now_playing = Some(NowPlaying {
            station_name: "Masjid A".into(),
            is_live: true,
            current_track: None,
        });
        assert!(state.current_is_live());
        assert!(state.current_track().is_none());
    }
}
