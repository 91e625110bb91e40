//! Playback events
//!
//! Event-based communication for UI synchronization. The engine queues an
//! event at each observable change; the host drains them with
//! `TransportEngine::drain_events` and updates its views.

use lytte_core::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the transport engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Play/pause state changed
    StateChanged {
        /// Whether playback is now running
        is_playing: bool,
    },

    /// A different track became current
    TrackChanged {
        /// Id of the new current track
        track_id: TrackId,
        /// Id of the superseded track, if any
        previous_track_id: Option<TrackId>,
    },

    /// Queue contents changed (new context or autoplay growth)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Position update from the audio primitive
    PositionUpdate {
        /// Current playback position
        position: Duration,
        /// Total track duration
        duration: Duration,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// A playback failure the user should see
    Error {
        /// Error message
        message: String,
    },
}
