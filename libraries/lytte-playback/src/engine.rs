//! Transport engine - core orchestration
//!
//! Coordinates the play queue, shuffle/repeat/autoplay policy, and volume,
//! drives the audio sink, and records plays into the catalog.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::PlayQueue,
    shuffle::next_shuffle_index,
    sink::AudioSink,
    types::{PlaybackSnapshot, RepeatMode, TransportConfig},
    volume::Volume,
};
use lytte_core::{CatalogStore, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Central transport control
///
/// Owns the ephemeral playback session: current track, play/pause state,
/// position, volume, the play queue, and the shuffle/repeat/autoplay
/// settings. All mutations go through the intent methods; the presentation
/// layer reads back through [`snapshot`](Self::snapshot) and
/// [`drain_events`](Self::drain_events).
///
/// Catalog calls are best-effort: a failed history append or autoplay
/// lookup is logged and never disturbs session state. Every track-changing
/// intent bumps an internal generation counter, and an autoplay lookup
/// whose generation is stale by the time it resolves is discarded.
pub struct TransportEngine<C: CatalogStore> {
    catalog: C,
    sink: Box<dyn AudioSink>,

    // Session state
    queue: PlayQueue,
    is_playing: bool,
    position: Duration,
    duration: Duration,
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    autoplay: bool,

    // Membership caches, refreshed from the catalog after each toggle
    liked: HashSet<TrackId>,
    downloaded: HashSet<TrackId>,

    // Invalidates in-flight autoplay lookups
    generation: u64,

    rng: StdRng,
    pending_events: Vec<PlaybackEvent>,
}

impl<C: CatalogStore> TransportEngine<C> {
    /// Create a new transport engine
    pub fn new(catalog: C, sink: Box<dyn AudioSink>, config: TransportConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog,
            sink,
            queue: PlayQueue::new(),
            is_playing: false,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: Volume::new(config.volume),
            shuffle: config.shuffle,
            repeat: config.repeat,
            autoplay: config.autoplay,
            liked: HashSet::new(),
            downloaded: HashSet::new(),
            generation: 0,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback control =====

    /// Start playing `track`
    ///
    /// With a context, the queue becomes that context and the index points
    /// at `track` within it (matched by id). A track missing from its own
    /// context falls back to a single-track queue, as does a call without
    /// a context. Starting a new play always supersedes any in-flight
    /// playback; the play is recorded in listening history.
    pub async fn play(&mut self, track: Track, context: Option<Vec<Track>>) -> Result<()> {
        self.bump_generation();
        let previous = self.queue.current_track().map(|t| t.id.clone());
        match context {
            Some(tracks) => match tracks.iter().position(|t| t.id == track.id) {
                Some(index) => self.queue.set_context(tracks, index),
                None => {
                    debug!(track = %track.id, "track not in supplied context, playing alone");
                    self.queue.set_single(track);
                }
            },
            None => self.queue.set_single(track),
        }
        self.emit_queue_changed();

        let Some(current) = self.queue.current_track().cloned() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        self.begin_playback(current, previous).await
    }

    /// Toggle between play and pause
    ///
    /// No-op without a current track. Position is untouched.
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.queue.current_track().is_none() {
            return Ok(());
        }
        if self.is_playing {
            self.sink.pause()?;
            self.set_playing(false);
        } else {
            self.sink.play()?;
            self.set_playing(true);
        }
        Ok(())
    }

    /// Advance to the next track
    ///
    /// Shuffle picks a uniformly random index, never the current one twice
    /// in a row while alternatives exist. Sequential playback past the last
    /// index wraps under repeat-all, grows the queue by one catalog pick
    /// under autoplay, and otherwise stops without advancing.
    pub async fn next(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        let generation = self.bump_generation();

        let len = self.queue.len();
        let candidate = if self.shuffle {
            next_shuffle_index(&mut self.rng, len, self.queue.current_index())
        } else {
            self.queue.current_index().map_or(0, |i| i + 1)
        };

        if candidate < len {
            return self.start_at(candidate).await;
        }

        // Sequential playback ran off the end of the queue
        match self.repeat {
            RepeatMode::All => self.start_at(0).await,
            _ if self.autoplay => self.extend_with_autoplay(generation).await,
            _ => {
                self.set_playing(false);
                Ok(())
            }
        }
    }

    /// Go back to the previous track
    ///
    /// Wraps from the first index to the last. Always stays within the
    /// existing queue; never consults repeat or autoplay.
    pub async fn previous(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        self.bump_generation();

        let len = self.queue.len();
        let candidate = match self.queue.current_index() {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        };
        self.start_at(candidate).await
    }

    /// React to the audio primitive's end-of-media signal
    ///
    /// Repeat-one restarts the same track in place, with no new history
    /// entry and no queue-policy consultation. Everything else advances
    /// like [`next`](Self::next).
    pub async fn handle_track_ended(&mut self) -> Result<()> {
        if self.repeat == RepeatMode::One && self.queue.current_track().is_some() {
            self.position = Duration::ZERO;
            self.sink.seek(Duration::ZERO)?;
            self.sink.play()?;
            self.set_playing(true);
            return Ok(());
        }
        self.next().await
    }

    /// Seek within the current track
    ///
    /// The requested position is clamped to `[0, duration]`.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if self.queue.current_track().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        let clamped = position.min(self.duration);
        self.sink.seek(clamped)?;
        self.position = clamped;
        Ok(())
    }

    // ===== Volume =====

    /// Set volume, clamped to `[0.0, 1.0]`
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        self.volume.set_level(level);
        self.push_volume()
    }

    /// Toggle mute, preserving the volume level
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.volume.toggle_mute();
        self.push_volume()
    }

    /// Get current volume level (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Mode toggles =====

    /// Flip the shuffle setting
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Flip the autoplay setting
    pub fn toggle_autoplay(&mut self) {
        self.autoplay = !self.autoplay;
    }

    /// Advance repeat through `Off → All → One → Off`
    pub fn cycle_repeat(&mut self) {
        self.repeat = self.repeat.cycled();
    }

    // ===== Position sync =====

    /// Record the audio primitive's reported position and duration
    ///
    /// Pure state sync, last write wins.
    pub fn on_position_tick(&mut self, position: Duration, duration: Duration) {
        self.position = position;
        self.duration = duration;
        self.pending_events
            .push(PlaybackEvent::PositionUpdate { position, duration });
    }

    // ===== User collections =====

    /// Reload the liked/downloaded membership caches from the catalog
    pub async fn refresh_collections(&mut self) -> Result<()> {
        self.liked = id_set(self.catalog.liked_songs().await?);
        self.downloaded = id_set(self.catalog.downloads().await?);
        Ok(())
    }

    /// Toggle liked membership for a track
    ///
    /// Reads membership from the catalog, issues the add or remove, then
    /// refreshes the local cache. Returns the new membership.
    pub async fn toggle_like(&mut self, id: &TrackId) -> Result<bool> {
        let liked = id_set(self.catalog.liked_songs().await?);
        if liked.contains(id) {
            self.catalog.remove_liked_song(id).await?;
        } else {
            self.catalog.add_liked_song(id).await?;
        }
        self.liked = id_set(self.catalog.liked_songs().await?);
        Ok(self.liked.contains(id))
    }

    /// Toggle downloaded membership for a track
    ///
    /// Same shape as [`toggle_like`](Self::toggle_like).
    pub async fn toggle_download(&mut self, id: &TrackId) -> Result<bool> {
        let downloaded = id_set(self.catalog.downloads().await?);
        if downloaded.contains(id) {
            self.catalog.remove_download(id).await?;
        } else {
            self.catalog.add_download(id).await?;
        }
        self.downloaded = id_set(self.catalog.downloads().await?);
        Ok(self.downloaded.contains(id))
    }

    /// Check the cached liked membership for a track
    pub fn is_liked(&self, id: &TrackId) -> bool {
        self.liked.contains(id)
    }

    /// Check the cached downloaded membership for a track
    pub fn is_downloaded(&self, id: &TrackId) -> bool {
        self.downloaded.contains(id)
    }

    // ===== State queries =====

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_track()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// The play queue in order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Index of the current track within the queue
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Position within the current track
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the current track
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current shuffle setting
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Current autoplay setting
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// The injected catalog store
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Full session readout for the presentation layer
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.queue.current_track().cloned(),
            is_playing: self.is_playing,
            position: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            queue: self.queue.tracks().to_vec(),
            queue_index: self.queue.current_index(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            autoplay: self.autoplay,
        }
    }

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain; the host applies
    /// them to its views in order.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.pending_events
                .push(PlaybackEvent::StateChanged { is_playing: playing });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn push_volume(&mut self) -> Result<()> {
        self.sink.set_volume(self.volume.gain())?;
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
        Ok(())
    }

    /// Start the track at `index` within the existing queue
    async fn start_at(&mut self, index: usize) -> Result<()> {
        let previous = self.queue.current_track().map(|t| t.id.clone());
        let Some(track) = self.queue.select(index).cloned() else {
            return Err(PlaybackError::NoTrackLoaded);
        };
        self.begin_playback(track, previous).await
    }

    /// Load and start a track, recording the play
    async fn begin_playback(&mut self, track: Track, previous: Option<TrackId>) -> Result<()> {
        self.position = Duration::ZERO;
        self.duration = track.duration;
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id: previous,
        });
        self.set_playing(true);

        if let Err(err) = self.load_and_play(&track) {
            // A source that failed to load must not report as playing
            self.set_playing(false);
            self.pending_events.push(PlaybackEvent::Error {
                message: err.to_string(),
            });
            return Err(err);
        }

        if let Err(err) = self.catalog.add_to_history(&track).await {
            warn!(track = %track.id, %err, "failed to record play in history");
        }
        Ok(())
    }

    fn load_and_play(&mut self, track: &Track) -> Result<()> {
        self.sink.load(&track.url)?;
        self.sink.play()?;
        Ok(())
    }

    /// Ask the catalog for one autoplay track and play it
    ///
    /// The queue grows by exactly one. A result arriving after a newer
    /// intent (stale generation) is discarded; an empty or failed lookup
    /// leaves the session exactly as it was.
    async fn extend_with_autoplay(&mut self, generation: u64) -> Result<()> {
        let exclude = self.queue.track_ids();
        let fetched = self.catalog.autoplay_track(&exclude).await;
        if self.generation != generation {
            debug!("discarding stale autoplay result");
            return Ok(());
        }
        match fetched {
            Ok(Some(track)) => {
                let index = self.queue.append(track);
                self.emit_queue_changed();
                self.start_at(index).await
            }
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(%err, "autoplay lookup failed");
                Ok(())
            }
        }
    }
}

fn id_set(tracks: Vec<Track>) -> HashSet<TrackId> {
    tracks.into_iter().map(|t| t.id).collect()
}
