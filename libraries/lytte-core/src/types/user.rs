/// User domain type
use crate::types::{Track, TrackId, UploadedFile, UserId};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in listening history
pub const HISTORY_LIMIT: usize = 50;

/// The singleton user record for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Profile picture reference
    pub profile_pic: String,

    /// Listening history, most recent first, capped at [`HISTORY_LIMIT`]
    pub history: Vec<Track>,

    /// Ids of downloaded tracks
    pub downloads: Vec<TrackId>,

    /// Ids of liked tracks
    pub liked_songs: Vec<TrackId>,
}

impl User {
    /// Create a new user with empty collections
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            profile_pic: String::new(),
            history: Vec::new(),
            downloads: Vec::new(),
            liked_songs: Vec::new(),
        }
    }

    /// Record a play in listening history
    ///
    /// Prepends the track, removing any earlier entry with the same id, and
    /// truncates to [`HISTORY_LIMIT`]. Re-playing a track moves it to the
    /// front rather than duplicating it.
    pub fn record_play(&mut self, track: Track) {
        self.history.retain(|t| t.id != track.id);
        self.history.insert(0, track);
        self.history.truncate(HISTORY_LIMIT);
    }
}

/// Request to change the user profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name, if changing
    pub name: Option<String>,

    /// New profile picture file, if changing
    pub profile_pic: Option<UploadedFile>,
}
