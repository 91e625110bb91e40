//! Lytte Playback
//!
//! Transport engine and queue/autoplay policy for Lytte.
//!
//! This crate provides:
//! - Play queue with index-based navigation
//! - Shuffle selection (uniform, never the same track twice in a row)
//! - Repeat modes (Off, All, One)
//! - Autoplay growth when the queue runs out
//! - Volume control (clamped 0.0-1.0, mute/unmute)
//! - Listening-history recording through the catalog
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! [`TransportEngine`] owns the ephemeral playback session and is the only
//! thing that mutates it. It drives an [`AudioSink`] (the audio-element
//! boundary the host implements) and calls a [`lytte_core::CatalogStore`]
//! for history, membership toggles, and autoplay picks. The primitive's
//! feedback flows back in through
//! [`on_position_tick`](TransportEngine::on_position_tick) and
//! [`handle_track_ended`](TransportEngine::handle_track_ended).
//!
//! The engine is single-owner and event-driven: intents run to completion,
//! suspending only at catalog awaits, and a generation counter discards
//! autoplay results that a newer intent has overtaken.
//!
//! # Example
//!
//! ```rust
//! use lytte_playback::{RepeatMode, TransportConfig};
//!
//! // Repeat cycles through the fixed order used by the player bar button
//! let mut repeat = RepeatMode::Off;
//! repeat = repeat.cycled();
//! assert_eq!(repeat, RepeatMode::All);
//!
//! // Deterministic shuffle for tests
//! let config = TransportConfig {
//!     rng_seed: Some(42),
//!     ..TransportConfig::default()
//! };
//! assert_eq!(config.volume, 1.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod events;
mod queue;
mod shuffle;
mod sink;
pub mod types;
mod volume;

// Public exports
pub use engine::TransportEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use sink::AudioSink;
pub use types::{PlaybackSnapshot, RepeatMode, TransportConfig};
