//! Tagging and gating of per-station fetches.
//!
//! A now-playing poll or detail fetch is issued for whatever station is
//! selected at that moment.  By the time it resolves the user may have closed
//! the player or switched stations, so every request carries a [`FetchTag`]
//! and its reply is checked against the live session before it is applied.
//! Replies that fail the check are dropped; they never touch the selection.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::session::SessionStore;
use crate::station::StationId;

/// Interval of the full station-list refresh.
pub const LIST_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Interval of the now-playing poll for the selected station.
pub const NOW_PLAYING_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Which selection a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTag {
    pub station: StationId,
    pub epoch: u64,
}

impl FetchTag {
    /// Tag for the current selection, or `None` while idle (nothing to fetch).
    pub fn for_current(store: &SessionStore) -> Option<Self> {
        store.session().current_id().map(|id| Self {
            station: id.clone(),
            epoch: store.epoch(),
        })
    }

    /// True when the session still shows the selection this tag was made for.
    pub fn matches(&self, store: &SessionStore) -> bool {
        store.epoch() == self.epoch && store.session().is_current(&self.station)
    }
}

/// A reply paired with the tag of the request that produced it.
#[derive(Debug, Clone)]
pub struct Tagged<T> {
    pub tag: FetchTag,
    pub value: T,
}

impl<T> Tagged<T> {
    pub fn new(tag: FetchTag, value: T) -> Self {
        Self { tag, value }
    }

    /// Unwrap the value if the reply is still relevant, `None` if stale.
    pub fn accept(self, store: &SessionStore) -> Option<T> {
        if self.tag.matches(store) {
            Some(self.value)
        } else {
            tracing::debug!(
                "discarding stale reply for {} (epoch {}, now {})",
                self.tag.station,
                self.tag.epoch,
                store.epoch()
            );
            None
        }
    }
}

/// Remote data as a surface sees it.  Loading, failed, successful-but-empty
/// and populated are four different things and render differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Failed(String),
    Empty,
    Ready {
        value: T,
        fetched_at: DateTime<Local>,
    },
}

impl<T> LoadState<T> {
    pub fn ready(value: T) -> Self {
        Self::Ready {
            value,
            fetched_at: Local::now(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Failed(_) => "error",
            Self::Empty => "empty",
            Self::Ready { .. } => "ready",
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// Build from a successful list fetch: an empty list is `Empty`, not
    /// `Ready(vec![])`.
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::ready(items)
        }
    }

    /// Items when ready; an empty slice in every other state.
    pub fn items(&self) -> &[T] {
        self.value().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::StationSnapshot;

    fn snap(id: &str) -> StationSnapshot {
        StationSnapshot::new(id, "Masjid", "Kontagora", format!("/mosque-{}", id))
    }

    #[test]
    fn test_no_tag_while_idle() {
        let store = SessionStore::default();
        assert!(FetchTag::for_current(&store).is_none());
    }

    #[test]
    fn test_reply_for_current_is_accepted() {
        let mut store = SessionStore::default();
        store.select(snap("s1"));
        let tag = FetchTag::for_current(&store).unwrap();
        assert_eq!(Tagged::new(tag, 7).accept(&store), Some(7));
    }

    #[test]
    fn test_reply_after_close_is_discarded() {
        let mut store = SessionStore::default();
        store.select(snap("s1"));
        let tag = FetchTag::for_current(&store).unwrap();
        store.close();

        assert_eq!(Tagged::new(tag, "now playing").accept(&store), None);
        assert!(store.session().current().is_none());
        assert!(!store.session().is_playing());
    }

    #[test]
    fn test_reply_for_previous_station_is_discarded() {
        let mut store = SessionStore::default();
        store.select(snap("s1"));
        let tag = FetchTag::for_current(&store).unwrap();
        store.select(snap("s2"));
        assert!(Tagged::new(tag, ()).accept(&store).is_none());
    }

    #[test]
    fn test_reply_from_earlier_selection_of_same_station_is_discarded() {
        let mut store = SessionStore::default();
        store.select(snap("s1"));
        let old = FetchTag::for_current(&store).unwrap();
        store.close();
        store.select(snap("s1"));
        assert!(!old.matches(&store));
        assert!(FetchTag::for_current(&store).unwrap().matches(&store));
    }

    #[test]
    fn test_pause_keeps_tag_valid() {
        let mut store = SessionStore::default();
        store.select(snap("s1"));
        let tag = FetchTag::for_current(&store).unwrap();
        store.toggle_play();
        assert!(tag.matches(&store));
    }

    #[test]
    fn test_load_state_distinguishes_empty() {
        let empty: LoadState<Vec<u8>> = LoadState::from_list(vec![]);
        assert_eq!(empty, LoadState::Empty);
        assert!(empty.items().is_empty());

        let full = LoadState::from_list(vec![1u8, 2]);
        assert_eq!(full.items(), &[1, 2]);
        assert_eq!(full.label(), "ready");

        let failed: LoadState<Vec<u8>> = LoadState::Failed("boom".into());
        assert_eq!(failed.label(), "error");
        assert!(LoadState::<Vec<u8>>::default().is_loading());
    }
}
