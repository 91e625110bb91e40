//! Integration tests for the transport engine
//!
//! These tests drive real playback scenarios through a mock catalog and a
//! recording sink: queue traversal, repeat and shuffle behavior, autoplay
//! growth, history recording, and failure handling.

use lytte_core::{
    Album, AlbumId, AlbumRef, CatalogStore, LytteError, ProfileUpdate, Result as CoreResult,
    SongUpload, Track, TrackId, User,
};
use lytte_playback::{
    AudioSink, PlaybackError, PlaybackEvent, RepeatMode, Result, TransportConfig, TransportEngine,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

fn create_test_track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        album: AlbumRef {
            id: AlbumId::new("album-1"),
            title: "Test Album".to_string(),
            cover: "local://covers/test".to_string(),
        },
        duration: Duration::from_secs(180),
        url: format!("local://audio/{}", id),
        album_art_url: None,
        added_at: chrono::Utc::now(),
    }
}

/// Mock catalog over in-memory state
///
/// Autoplay picks the first non-excluded library track, so tests stay
/// deterministic without touching the engine's RNG.
#[derive(Default)]
struct MockCatalog {
    inner: Mutex<MockCatalogInner>,
}

#[derive(Default)]
struct MockCatalogInner {
    library: Vec<Track>,
    history: Vec<Track>,
    liked: Vec<TrackId>,
    downloaded: Vec<TrackId>,
    fail_history: bool,
}

impl MockCatalog {
    fn with_library(tracks: Vec<Track>) -> Self {
        Self {
            inner: Mutex::new(MockCatalogInner {
                library: tracks,
                ..MockCatalogInner::default()
            }),
        }
    }

    fn fail_history(&self) {
        self.inner.lock().unwrap().fail_history = true;
    }

    fn history_ids(&self) -> Vec<TrackId> {
        self.inner
            .lock()
            .unwrap()
            .history
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }
}

impl CatalogStore for MockCatalog {
    async fn get_user(&self) -> CoreResult<User> {
        Ok(User::new("Test"))
    }

    async fn update_user_profile(&self, _update: ProfileUpdate) -> CoreResult<User> {
        Ok(User::new("Test"))
    }

    async fn get_albums(&self) -> CoreResult<Vec<Album>> {
        Ok(Vec::new())
    }

    async fn get_album(&self, _id: &AlbumId) -> CoreResult<Option<Album>> {
        Ok(None)
    }

    async fn search_tracks(&self, _query: &str) -> CoreResult<Vec<Track>> {
        Ok(self.inner.lock().unwrap().library.clone())
    }

    async fn autoplay_track(&self, exclude: &HashSet<TrackId>) -> CoreResult<Option<Track>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .library
            .iter()
            .find(|t| !exclude.contains(&t.id))
            .cloned())
    }

    async fn upload_song(&self, _upload: SongUpload) -> CoreResult<Track> {
        Err(LytteError::transfer("not supported by mock"))
    }

    async fn add_to_history(&self, track: &Track) -> CoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_history {
            return Err(LytteError::store("history unavailable"));
        }
        let id = track.id.clone();
        inner.history.retain(|t| t.id != id);
        inner.history.insert(0, track.clone());
        Ok(())
    }

    async fn history(&self) -> CoreResult<Vec<Track>> {
        Ok(self.inner.lock().unwrap().history.clone())
    }

    async fn downloads(&self) -> CoreResult<Vec<Track>> {
        let inner = self.inner.lock().unwrap();
        let tracks = inner
            .library
            .iter()
            .filter(|t| inner.downloaded.contains(&t.id))
            .cloned()
            .collect();
        Ok(tracks)
    }

    async fn liked_songs(&self) -> CoreResult<Vec<Track>> {
        let inner = self.inner.lock().unwrap();
        let tracks = inner
            .library
            .iter()
            .filter(|t| inner.liked.contains(&t.id))
            .cloned()
            .collect();
        Ok(tracks)
    }

    async fn add_download(&self, id: &TrackId) -> CoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.downloaded.contains(id) {
            inner.downloaded.push(id.clone());
        }
        Ok(())
    }

    async fn remove_download(&self, id: &TrackId) -> CoreResult<()> {
        self.inner.lock().unwrap().downloaded.retain(|d| d != id);
        Ok(())
    }

    async fn add_liked_song(&self, id: &TrackId) -> CoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.liked.contains(id) {
            inner.liked.push(id.clone());
        }
        Ok(())
    }

    async fn remove_liked_song(&self, id: &TrackId) -> CoreResult<()> {
        self.inner.lock().unwrap().liked.retain(|l| l != id);
        Ok(())
    }
}

/// What the engine told the sink to do
#[derive(Debug, Clone, PartialEq)]
enum SinkCommand {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
}

/// Sink that records every command for later inspection
struct RecordingSink {
    commands: Arc<Mutex<Vec<SinkCommand>>>,
    fail_load: bool,
}

impl RecordingSink {
    fn new() -> (Self, Arc<Mutex<Vec<SinkCommand>>>) {
        let commands = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                commands: Arc::clone(&commands),
                fail_load: false,
            },
            commands,
        )
    }

    fn failing() -> (Self, Arc<Mutex<Vec<SinkCommand>>>) {
        let (mut sink, commands) = Self::new();
        sink.fail_load = true;
        (sink, commands)
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, url: &str) -> Result<()> {
        if self.fail_load {
            return Err(PlaybackError::Sink(format!("cannot load {url}")));
        }
        self.commands
            .lock()
            .unwrap()
            .push(SinkCommand::Load(url.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.lock().unwrap().push(SinkCommand::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.lock().unwrap().push(SinkCommand::Pause);
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.commands.lock().unwrap().push(SinkCommand::Seek(position));
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.commands
            .lock()
            .unwrap()
            .push(SinkCommand::SetVolume(gain));
        Ok(())
    }
}

fn create_engine(
    library: Vec<Track>,
    config: TransportConfig,
) -> (
    TransportEngine<MockCatalog>,
    Arc<Mutex<Vec<SinkCommand>>>,
) {
    let (sink, commands) = RecordingSink::new();
    let engine = TransportEngine::new(MockCatalog::with_library(library), Box::new(sink), config);
    (engine, commands)
}

fn abc() -> Vec<Track> {
    vec![
        create_test_track("a"),
        create_test_track("b"),
        create_test_track("c"),
    ]
}

fn seeded_config() -> TransportConfig {
    TransportConfig {
        rng_seed: Some(42),
        ..TransportConfig::default()
    }
}

fn current_id<C: CatalogStore>(engine: &TransportEngine<C>) -> TrackId {
    engine.current_track().unwrap().id.clone()
}

// ===== Sequential traversal =====

#[tokio::test]
async fn sequential_next_visits_queue_in_order_then_stops() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    assert_eq!(engine.queue_index(), Some(0));

    engine.next().await.unwrap();
    assert_eq!(engine.queue_index(), Some(1));
    assert_eq!(current_id(&engine), TrackId::new("b"));
    assert!(engine.is_playing());

    engine.next().await.unwrap();
    assert_eq!(engine.queue_index(), Some(2));
    assert_eq!(current_id(&engine), TrackId::new("c"));

    // Past the last index: no track change, playback stops
    engine.next().await.unwrap();
    assert_eq!(engine.queue_index(), Some(2));
    assert_eq!(current_id(&engine), TrackId::new("c"));
    assert!(!engine.is_playing());
    assert_eq!(engine.queue().len(), 3);
}

#[tokio::test]
async fn next_on_empty_queue_is_noop() {
    let (mut engine, commands) = create_engine(Vec::new(), seeded_config());

    engine.next().await.unwrap();
    assert!(engine.current_track().is_none());
    assert!(commands.lock().unwrap().is_empty());
}

// ===== Repeat modes =====

#[tokio::test]
async fn repeat_all_wraps_from_last_to_first() {
    let queue = abc();
    let config = TransportConfig {
        repeat: RepeatMode::All,
        ..seeded_config()
    };
    let (mut engine, _commands) = create_engine(queue.clone(), config);

    engine.play(queue[2].clone(), Some(queue.clone())).await.unwrap();
    assert_eq!(engine.queue_index(), Some(2));

    engine.next().await.unwrap();
    assert_eq!(engine.queue_index(), Some(0));
    assert_eq!(current_id(&engine), TrackId::new("a"));
    assert!(engine.is_playing());
}

#[tokio::test]
async fn repeat_one_replays_same_track_on_ended() {
    let queue = abc();
    let config = TransportConfig {
        repeat: RepeatMode::One,
        // Shuffle on to prove repeat-one bypasses selection logic entirely
        shuffle: true,
        ..seeded_config()
    };
    let (mut engine, commands) = create_engine(queue.clone(), config);

    engine.play(queue[1].clone(), Some(queue.clone())).await.unwrap();
    engine.on_position_tick(Duration::from_secs(170), Duration::from_secs(180));
    let history_before = engine.catalog().history_ids().len();

    engine.handle_track_ended().await.unwrap();

    assert_eq!(current_id(&engine), TrackId::new("b"));
    assert_eq!(engine.queue_index(), Some(1));
    assert_eq!(engine.position(), Duration::ZERO);
    assert!(engine.is_playing());

    // Restart went through seek, not a fresh load
    let recorded = commands.lock().unwrap();
    assert_eq!(recorded.last(), Some(&SinkCommand::Play));
    assert!(recorded.contains(&SinkCommand::Seek(Duration::ZERO)));

    // Replaying the identical track adds no history entry
    assert_eq!(engine.catalog().history_ids().len(), history_before);
}

#[tokio::test]
async fn track_ended_without_repeat_one_advances() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    engine.handle_track_ended().await.unwrap();

    assert_eq!(current_id(&engine), TrackId::new("b"));
}

// ===== Shuffle =====

#[tokio::test]
async fn shuffle_never_repeats_current_index_immediately() {
    let queue = abc();
    let config = TransportConfig {
        shuffle: true,
        repeat: RepeatMode::All,
        ..seeded_config()
    };
    let (mut engine, _commands) = create_engine(queue.clone(), config);

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();

    let mut previous = engine.queue_index().unwrap();
    for _ in 0..100 {
        engine.next().await.unwrap();
        let index = engine.queue_index().unwrap();
        assert_ne!(index, previous);
        assert!(index < 3);
        previous = index;
    }
}

// ===== Previous =====

#[tokio::test]
async fn previous_wraps_from_first_to_last() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    engine.previous().await.unwrap();

    assert_eq!(engine.queue_index(), Some(2));
    assert_eq!(current_id(&engine), TrackId::new("c"));
}

#[tokio::test]
async fn previous_never_grows_the_queue() {
    let queue = abc();
    let config = TransportConfig {
        autoplay: true,
        ..seeded_config()
    };
    let (mut engine, _commands) = create_engine(queue.clone(), config);

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    for _ in 0..10 {
        engine.previous().await.unwrap();
        assert_eq!(engine.queue().len(), 3);
    }
}

// ===== Autoplay =====

#[tokio::test]
async fn autoplay_appends_one_fresh_track_and_plays_it() {
    let queue = abc();
    let mut library = queue.clone();
    library.push(create_test_track("d"));

    let config = TransportConfig {
        autoplay: true,
        ..seeded_config()
    };
    let (mut engine, _commands) = create_engine(library, config);

    engine.play(queue[2].clone(), Some(queue.clone())).await.unwrap();
    engine.next().await.unwrap();

    // Queue grew by exactly one, with a track that was not already queued
    assert_eq!(engine.queue().len(), 4);
    assert_eq!(engine.queue_index(), Some(3));
    assert_eq!(current_id(&engine), TrackId::new("d"));
    assert!(engine.is_playing());
}

#[tokio::test]
async fn autoplay_with_exhausted_catalog_changes_nothing() {
    let queue = abc();
    let config = TransportConfig {
        autoplay: true,
        ..seeded_config()
    };
    // Library holds only the queued tracks, so every candidate is excluded
    let (mut engine, _commands) = create_engine(queue.clone(), config);

    engine.play(queue[2].clone(), Some(queue.clone())).await.unwrap();
    let was_playing = engine.is_playing();

    engine.next().await.unwrap();

    assert_eq!(engine.queue().len(), 3);
    assert_eq!(engine.queue_index(), Some(2));
    assert_eq!(current_id(&engine), TrackId::new("c"));
    assert_eq!(engine.is_playing(), was_playing);
}

#[tokio::test]
async fn repeat_all_takes_precedence_over_autoplay() {
    let queue = abc();
    let mut library = queue.clone();
    library.push(create_test_track("d"));

    let config = TransportConfig {
        autoplay: true,
        repeat: RepeatMode::All,
        ..seeded_config()
    };
    let (mut engine, _commands) = create_engine(library, config);

    engine.play(queue[2].clone(), Some(queue.clone())).await.unwrap();
    engine.next().await.unwrap();

    assert_eq!(engine.queue().len(), 3);
    assert_eq!(engine.queue_index(), Some(0));
}

// ===== Play invariants and history =====

#[tokio::test]
async fn play_keeps_queue_index_aligned_with_current_track() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    for track in &queue {
        engine.play(track.clone(), Some(queue.clone())).await.unwrap();
        let index = engine.queue_index().unwrap();
        assert_eq!(engine.queue()[index].id, track.id);
        assert_eq!(current_id(&engine), track.id);
    }
}

#[tokio::test]
async fn replaying_a_track_keeps_one_history_entry_in_front() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    engine.play(queue[1].clone(), Some(queue.clone())).await.unwrap();
    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();

    let history = engine.catalog().history_ids();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], TrackId::new("a"));
    assert_eq!(history[1], TrackId::new("b"));
}

#[tokio::test]
async fn history_failure_does_not_block_playback() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());
    engine.catalog().fail_history();

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();

    assert!(engine.is_playing());
    assert_eq!(current_id(&engine), TrackId::new("a"));
}

// ===== Transport basics =====

#[tokio::test]
async fn toggle_play_pauses_and_resumes_without_resetting_position() {
    let queue = abc();
    let (mut engine, commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    engine.on_position_tick(Duration::from_secs(42), Duration::from_secs(180));

    engine.toggle_play().unwrap();
    assert!(!engine.is_playing());
    assert_eq!(engine.position(), Duration::from_secs(42));
    assert_eq!(commands.lock().unwrap().last(), Some(&SinkCommand::Pause));

    engine.toggle_play().unwrap();
    assert!(engine.is_playing());
    assert_eq!(engine.position(), Duration::from_secs(42));
}

#[tokio::test]
async fn play_loads_source_and_starts_sink() {
    let queue = abc();
    let (mut engine, commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[1].clone(), Some(queue.clone())).await.unwrap();

    let recorded = commands.lock().unwrap();
    assert_eq!(
        recorded.as_slice(),
        &[
            SinkCommand::Load("local://audio/b".to_string()),
            SinkCommand::Play,
        ]
    );
}

#[tokio::test]
async fn failed_source_load_reconciles_state_and_surfaces_error() {
    let queue = abc();
    let (sink, _commands) = RecordingSink::failing();
    let mut engine = TransportEngine::new(
        MockCatalog::with_library(queue.clone()),
        Box::new(sink),
        seeded_config(),
    );

    let result = engine.play(queue[0].clone(), Some(queue.clone())).await;
    assert!(result.is_err());
    assert!(!engine.is_playing());

    let events = engine.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Error { .. })));
}

// ===== Collections =====

#[tokio::test]
async fn like_toggle_round_trips_membership() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());
    let id = queue[0].id.clone();

    assert!(engine.toggle_like(&id).await.unwrap());
    assert!(engine.is_liked(&id));

    assert!(!engine.toggle_like(&id).await.unwrap());
    assert!(!engine.is_liked(&id));
}

#[tokio::test]
async fn download_toggle_round_trips_membership() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());
    let id = queue[1].id.clone();

    assert!(engine.toggle_download(&id).await.unwrap());
    assert!(engine.is_downloaded(&id));

    assert!(!engine.toggle_download(&id).await.unwrap());
    assert!(!engine.is_downloaded(&id));
}

#[tokio::test]
async fn refresh_collections_syncs_caches_from_catalog() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.catalog().add_liked_song(&queue[2].id).await.unwrap();
    assert!(!engine.is_liked(&queue[2].id));

    engine.refresh_collections().await.unwrap();
    assert!(engine.is_liked(&queue[2].id));
}

// ===== Events and snapshot =====

#[tokio::test]
async fn play_emits_queue_track_and_state_events() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[0].clone(), Some(queue.clone())).await.unwrap();
    let events = engine.drain_events();

    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::QueueChanged { length: 3 })));
    assert!(events.iter().any(
        |e| matches!(e, PlaybackEvent::TrackChanged { track_id, .. } if *track_id == queue[0].id)
    ));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::StateChanged { is_playing: true })));

    // Drained: a second call comes back empty
    assert!(engine.drain_events().is_empty());
}

#[tokio::test]
async fn snapshot_reflects_session_state() {
    let queue = abc();
    let (mut engine, _commands) = create_engine(queue.clone(), seeded_config());

    engine.play(queue[1].clone(), Some(queue.clone())).await.unwrap();
    engine.on_position_tick(Duration::from_secs(30), Duration::from_secs(180));
    engine.set_volume(0.35).unwrap();
    engine.toggle_autoplay();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.current_track.unwrap().id, queue[1].id);
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.position, Duration::from_secs(30));
    assert_eq!(snapshot.duration, Duration::from_secs(180));
    assert_eq!(snapshot.volume, 0.35);
    assert_eq!(snapshot.queue.len(), 3);
    assert_eq!(snapshot.queue_index, Some(1));
    assert!(snapshot.autoplay);
}

#[tokio::test]
async fn mute_sends_zero_gain_and_keeps_level() {
    let queue = abc();
    let (mut engine, commands) = create_engine(queue, seeded_config());

    engine.set_volume(0.8).unwrap();
    engine.toggle_mute().unwrap();

    assert_eq!(engine.volume(), 0.8);
    let recorded = commands.lock().unwrap();
    assert_eq!(recorded.last(), Some(&SinkCommand::SetVolume(0.0)));
}
