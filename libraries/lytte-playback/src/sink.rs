//! Audio primitive boundary
//!
//! Abstracts the underlying playback element (an HTML audio element, a
//! native output, a test double) behind a command interface.

use crate::error::Result;
use std::time::Duration;

/// Commands to the audio playback primitive
///
/// The engine drives the sink; the host wires the primitive's feedback
/// (position ticks, end-of-media) back into
/// `TransportEngine::on_position_tick` and
/// `TransportEngine::handle_track_ended`. Loading a new source supersedes
/// any in-flight load; the sink is expected to drop stale callbacks once
/// its source changes.
pub trait AudioSink: Send {
    /// Load a new source by its playable reference
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping position
    fn pause(&mut self) -> Result<()>;

    /// Move the playback position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set the output gain (0.0 = silent, 1.0 = unity)
    fn set_volume(&mut self, gain: f32) -> Result<()>;
}

/// Sink that accepts every command and does nothing
///
/// For tests that only exercise state transitions.
#[cfg(test)]
pub struct NullSink;

#[cfg(test)]
impl AudioSink for NullSink {
    fn load(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn seek(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) -> Result<()> {
        Ok(())
    }
}
