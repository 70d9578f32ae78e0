//! Session store: the single source of truth for "what is playing".
//!
//! One optional selected station (a snapshot), a play/pause flag and an
//! output volume.  Every surface that needs to know whether station X is the
//! one playing asks the store; none keeps its own copy.
//!
//! ```text
//!   Idle ──select──▶ Playing ◀──toggle──▶ Paused
//!     ▲                 │                    │
//!     └──────close──────┴────────close───────┘
//! ```
//!
//! All transitions are synchronous, total and replace the whole record at
//! once, so an observer never sees `is_playing == true` without a station.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::station::{StationId, StationSnapshot};

/// Volume a fresh session starts at, and the level `unmute` falls back to
/// when nothing audible was ever set.
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Derived playback state.  Never stored; computed from `Session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Paused,
    Playing,
}

impl PlayerState {
    pub fn label(self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Paused => "paused",
            PlayerState::Playing => "playing",
        }
    }
}

/// The session record.  Fields are private so the invariants can only be
/// changed through [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    current: Option<StationSnapshot>,
    is_playing: bool,
    volume: f32,
    /// Monotonic revision, bumped on every observable change.
    rev: u64,
}

impl Session {
    fn new(volume: f32) -> Self {
        Self {
            current: None,
            is_playing: false,
            volume: sanitize_volume(volume).unwrap_or(DEFAULT_VOLUME),
            rev: 0,
        }
    }

    pub fn current(&self) -> Option<&StationSnapshot> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<&StationId> {
        self.current.as_ref().map(|s| &s.id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }

    pub fn state(&self) -> PlayerState {
        match (&self.current, self.is_playing) {
            (None, _) => PlayerState::Idle,
            (Some(_), false) => PlayerState::Paused,
            (Some(_), true) => PlayerState::Playing,
        }
    }

    /// True when `id` is the selected station, playing or not.
    pub fn is_current(&self, id: &StationId) -> bool {
        self.current_id() == Some(id)
    }

    /// The per-row highlight every surface derives: selected *and* playing.
    pub fn is_active(&self, id: &StationId) -> bool {
        self.is_playing && self.is_current(id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

/// Owner of the [`Session`].  Exposes the four mutations plus the derived
/// mute helpers; everything else is a read.
#[derive(Debug, Clone)]
pub struct SessionStore {
    session: Session,
    /// Last non-zero volume, restored by `unmute`.
    last_audible: f32,
    /// Bumped whenever the selected station changes identity (new selection
    /// or close).  In-flight fetches capture it so replies from an earlier
    /// selection can be told apart.
    epoch: u64,
}

impl SessionStore {
    pub fn new(volume: f32) -> Self {
        let session = Session::new(volume);
        let last_audible = if session.volume > 0.0 {
            session.volume
        } else {
            DEFAULT_VOLUME
        };
        Self {
            session,
            last_audible,
            epoch: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn last_audible_volume(&self) -> f32 {
        self.last_audible
    }

    // ── Mutations ─────────────────────────────────────────────────────────────

    /// Select a station.  The same id toggles play/pause; a different id
    /// replaces the selection and always starts playing.
    pub fn select(&mut self, station: StationSnapshot) {
        if self.session.is_current(&station.id) {
            debug!("session: reselect {} → toggle", station.id);
            self.toggle_play();
            return;
        }
        debug!("session: select {} ({})", station.id, station.name);
        self.epoch += 1;
        self.commit(Session {
            current: Some(station),
            is_playing: true,
            ..self.session.clone()
        });
    }

    /// Flip play/pause.  No-op while idle.
    pub fn toggle_play(&mut self) {
        if self.session.current.is_none() {
            return;
        }
        self.commit(Session {
            is_playing: !self.session.is_playing,
            ..self.session.clone()
        });
    }

    /// Drop the selection; playback stops in the same transition.
    pub fn close(&mut self) {
        if self.session.current.is_none() && !self.session.is_playing {
            return;
        }
        debug!("session: close");
        self.epoch += 1;
        self.commit(Session {
            current: None,
            is_playing: false,
            ..self.session.clone()
        });
    }

    /// Set the output volume, clamped to `[0, 1]`.  NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        let Some(volume) = sanitize_volume(volume) else {
            return;
        };
        if volume > 0.0 {
            self.last_audible = volume;
        }
        if volume == self.session.volume {
            return;
        }
        self.commit(Session {
            volume,
            ..self.session.clone()
        });
    }

    // ── Derived helpers ───────────────────────────────────────────────────────

    pub fn mute(&mut self) {
        if self.session.volume > 0.0 {
            self.last_audible = self.session.volume;
        }
        self.set_volume(0.0);
    }

    /// Restore exactly the level that was audible before muting.
    pub fn unmute(&mut self) {
        if !self.session.is_muted() {
            return;
        }
        self.set_volume(self.last_audible);
    }

    pub fn toggle_mute(&mut self) {
        if self.session.is_muted() {
            self.unmute();
        } else {
            self.mute();
        }
    }

    fn commit(&mut self, mut next: Session) {
        next.rev = self.session.rev + 1;
        debug_assert!(!next.is_playing || next.current.is_some());
        self.session = next;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

fn sanitize_volume(v: f32) -> Option<f32> {
    if v.is_nan() {
        None
    } else {
        Some(v.clamp(0.0, 1.0))
    }
}
