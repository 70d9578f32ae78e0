//! Action enum — all user-initiated intents and internal events.

use minaret_proto::station::StationSnapshot;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    FeatureCards,
    StationList,
    Drawer,
    HelpOverlay,
}

/// Where the navigation drawer can send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    AllStations,
    LiveStations,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Session ──────────────────────────────────────────────────────────────
    Select(StationSnapshot), // select or, for the current station, toggle
    TogglePlay,
    Close,
    Volume(f32),
    Mute, // toggle mute (remember/restore level)

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    Navigate(Destination),

    // ── Directory ────────────────────────────────────────────────────────────
    SetLiveOnly(bool),
    Refresh,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleDrawer,
    ToggleTheme,
    ToggleHelp,
    Notify(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}
