use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Placeholder artwork shown until the backend reports something better.
pub const DEFAULT_ALBUM_ART: &str = "https://picsum.photos/400/400";

/// The single displayed snapshot. Owned by the [`Store`], mutated only
/// through [`Store::merge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub is_playing: bool,
    /// 0-100, clamped on every merge
    pub volume: u8,
    pub track_name: String,
    pub artist_name: String,
    pub album_art: String,
    pub is_muted: bool,
    pub is_connected: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            volume: 50,
            track_name: "Waiting for Status...".to_string(),
            artist_name: "Media Remote".to_string(),
            album_art: DEFAULT_ALBUM_ART.to_string(),
            is_muted: false,
            is_connected: false,
        }
    }
}

/// A state-shaped value where `None` means "no change". This is how a poll
/// or command result reports connectivity without clobbering track metadata
/// it has no knowledge of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatePatch {
    pub is_playing: Option<bool>,
    pub volume: Option<u8>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_art: Option<String>,
    pub is_muted: Option<bool>,
    pub is_connected: Option<bool>,
}

impl StatePatch {
    pub fn playing(flag: bool) -> Self {
        Self {
            is_playing: Some(flag),
            ..Self::default()
        }
    }

    pub fn connected(flag: bool) -> Self {
        Self {
            is_connected: Some(flag),
            ..Self::default()
        }
    }
}

impl PlayerState {
    fn apply(&mut self, patch: &StatePatch) {
        if let Some(v) = patch.is_playing {
            self.is_playing = v;
        }
        if let Some(v) = patch.volume {
            self.volume = v.min(100);
        }
        if let Some(ref v) = patch.track_name {
            self.track_name = v.clone();
        }
        if let Some(ref v) = patch.artist_name {
            self.artist_name = v.clone();
        }
        if let Some(ref v) = patch.album_art {
            self.album_art = v.clone();
        }
        if let Some(v) = patch.is_muted {
            self.is_muted = v;
        }
        if let Some(v) = patch.is_connected {
            self.is_connected = v;
        }
    }
}

/// Holds the current [`PlayerState`] and notifies observers on every merge.
///
/// Built on a `watch` channel: `send_modify` serializes concurrent merges
/// (dispatch reconciliations racing background polls land in completion
/// order, last write wins) and wakes every subscriber.
pub struct Store {
    tx: watch::Sender<PlayerState>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PlayerState::default());
        Self { tx }
    }

    /// Apply every present field of `patch`, leaving absent fields
    /// unchanged, and return the new snapshot. Total; no error path.
    pub fn merge(&self, patch: StatePatch) -> PlayerState {
        self.tx.send_modify(|state| state.apply(&patch));
        self.tx.borrow().clone()
    }

    pub fn snapshot(&self) -> PlayerState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
