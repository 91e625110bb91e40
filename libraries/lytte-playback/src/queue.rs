//! Play queue with index-based navigation
//!
//! Holds the current play context: the ordered track sequence that
//! next/previous navigate within, plus the index of the current track.

use lytte_core::{Track, TrackId};
use std::collections::HashSet;

/// The current play context
///
/// Invariant after any successful start: `tracks[current].id` equals the
/// current track's id. The queue is replaced wholesale when playback starts
/// from a new context and grows only through autoplay appends.
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a new context, pointing at `index`
    pub fn set_context(&mut self, tracks: Vec<Track>, index: usize) {
        debug_assert!(index < tracks.len());
        self.tracks = tracks;
        self.current = Some(index.min(self.tracks.len().saturating_sub(1)));
    }

    /// Collapse to a single-track queue
    pub fn set_single(&mut self, track: Track) {
        self.tracks = vec![track];
        self.current = Some(0);
    }

    /// Move the current index to `index`, returning the track there
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        if index < self.tracks.len() {
            self.current = Some(index);
            self.tracks.get(index)
        } else {
            None
        }
    }

    /// Append a track (autoplay growth), returning its index
    pub fn append(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// All queued tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Ids of all queued tracks
    pub fn track_ids(&self) -> HashSet<TrackId> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}
