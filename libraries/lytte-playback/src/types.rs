//! Core types for transport control

use lytte_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Advance through the fixed cycle `Off → All → One → Off`
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Configuration for the transport engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial shuffle setting (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial autoplay setting (default: off)
    pub autoplay: bool,

    /// Seed for shuffle selection, for deterministic tests
    pub rng_seed: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            autoplay: false,
            rng_seed: None,
        }
    }
}

/// Read-only view of the playback session
///
/// Everything the presentation layer needs to render the player bar and
/// queue view in one struct.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackSnapshot {
    /// Currently loaded track, if any
    pub current_track: Option<Track>,

    /// Whether playback is running
    pub is_playing: bool,

    /// Position within the current track
    pub position: Duration,

    /// Duration of the current track as reported by the audio primitive
    pub duration: Duration,

    /// Volume level (0.0-1.0)
    pub volume: f32,

    /// Whether audio is muted
    pub muted: bool,

    /// The play queue
    pub queue: Vec<Track>,

    /// Index of the current track within the queue
    pub queue_index: Option<usize>,

    /// Shuffle setting
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Autoplay setting
    pub autoplay: bool,
}
