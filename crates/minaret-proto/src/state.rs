//! Persisted session state.
//!
//! Only the volume survives a restart.  The selection and play flag always
//! come back as idle: a live stream cannot resume where it left off.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::session::{Session, SessionStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentState {
    pub volume: f32,
}

impl PersistentState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            volume: session.volume(),
        }
    }

    /// Fresh store seeded with the persisted volume.
    pub fn restore(&self) -> SessionStore {
        SessionStore::new(self.volume)
    }
}

#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, falling back to `default_volume` when the
    /// file is missing or unreadable.
    pub fn load(&self, default_volume: f32) -> PersistentState {
        if let Ok(content) = std::fs::read_to_string(&self.path) {
            match serde_json::from_str::<PersistentState>(&content) {
                Ok(persistent) => return persistent,
                Err(e) => warn!("ignoring unreadable {}: {}", self.path.display(), e),
            }
        }
        PersistentState {
            volume: default_volume,
        }
    }

    pub async fn save(&self, state: &PersistentState) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Readers only ever see a complete file.
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PlayerState;
    use crate::station::StationSnapshot;

    #[tokio::test]
    async fn test_volume_survives_restart_selection_does_not() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("nested").join("state.json"));

        let mut store = file.load(0.8).restore();
        store.select(StationSnapshot::new("s1", "Masjid A", "Kontagora", "/mosque-s1"));
        store.set_volume(0.3);
        file.save(&PersistentState::from_session(store.session()))
            .await
            .unwrap();

        let restored = file.load(0.8).restore();
        assert_eq!(restored.session().volume(), 0.3);
        assert_eq!(restored.session().state(), PlayerState::Idle);
        assert!(restored.session().current().is_none());
        assert!(!restored.session().is_playing());
    }

    #[tokio::test]
    async fn test_sequential_saves_keep_last_value() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));
        for i in 1..=20 {
            file.save(&PersistentState {
                volume: i as f32 / 20.0,
            })
            .await
            .unwrap();
        }
        assert_eq!(file.load(0.8).volume, 1.0);
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("absent.json"));
        assert_eq!(file.load(0.8).volume, 0.8);
    }

    #[test]
    fn test_corrupt_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(StateFile::new(path).load(0.5).volume, 0.5);
    }

    #[test]
    fn test_out_of_range_persisted_volume_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{ "volume": 3.5 }"#).unwrap();
        let store = StateFile::new(path).load(0.8).restore();
        assert_eq!(store.session().volume(), 1.0);
    }
}
