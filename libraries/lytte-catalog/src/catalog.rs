//! Catalog operations over the JSON store

use crate::seed;
use crate::store::JsonStore;
use lytte_core::{
    Album, AlbumId, CatalogStore, LytteError, ProfileUpdate, Result, SongUpload, Track, TrackId,
    User,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

const USER_KEY: &str = "lytte-user";
const ALBUMS_KEY: &str = "lytte-albums";
const TRACKS_KEY: &str = "lytte-tracks";

/// Cover given to albums created without custom art
fn placeholder_cover(album_title: &str) -> String {
    format!("https://picsum.photos/seed/{album_title}/300/300")
}

/// Mint a local object URL for an uploaded file
///
/// Stands in for a real transfer: the "upload" never leaves the machine.
fn object_url(file_name: &str) -> String {
    format!("local://blobs/{}/{}", Uuid::new_v4(), file_name)
}

#[derive(Debug, Clone)]
struct CatalogState {
    user: User,
    albums: Vec<Album>,
    tracks: Vec<Track>,
}

/// The catalog store
///
/// Owns the user record, album list, and track list, persisting all three
/// through a [`JsonStore`] on every mutation. Mutations are serialized
/// through a single interior lock; the lock is never held across an await.
#[derive(Debug)]
pub struct MusicCatalog {
    store: JsonStore,
    state: Mutex<CatalogState>,
    rng: Mutex<StdRng>,
}

impl MusicCatalog {
    /// Open a catalog rooted at `dir`, seeding sample content on first run
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_rng(dir, StdRng::from_entropy())
    }

    /// Open a catalog with a seeded RNG for deterministic autoplay picks
    pub fn open_seeded(dir: impl Into<PathBuf>, rng_seed: u64) -> Result<Self> {
        Self::open_with_rng(dir, StdRng::seed_from_u64(rng_seed))
    }

    fn open_with_rng(dir: impl Into<PathBuf>, rng: StdRng) -> Result<Self> {
        let store = JsonStore::open(dir)?;

        let user = store.load_or_seed(USER_KEY, seed::default_user)?;

        // Albums and tracks reference each other by id, so when either is
        // missing or corrupt both are reseeded from one generation pass.
        let albums: Option<Vec<Album>> = store.load(ALBUMS_KEY)?;
        let tracks: Option<Vec<Track>> = store.load(TRACKS_KEY)?;
        let (albums, tracks) = match (albums, tracks) {
            (Some(albums), Some(tracks)) => (albums, tracks),
            _ => {
                let (albums, tracks) = seed::default_library();
                store.save(ALBUMS_KEY, &albums)?;
                store.save(TRACKS_KEY, &tracks)?;
                (albums, tracks)
            }
        };

        Ok(Self {
            store,
            state: Mutex::new(CatalogState {
                user,
                albums,
                tracks,
            }),
            rng: Mutex::new(rng),
        })
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, state: &CatalogState) -> Result<()> {
        self.store.save(USER_KEY, &state.user)?;
        self.store.save(ALBUMS_KEY, &state.albums)?;
        self.store.save(TRACKS_KEY, &state.tracks)?;
        Ok(())
    }
}

impl CatalogStore for MusicCatalog {
    async fn get_user(&self) -> Result<User> {
        Ok(self.state().user.clone())
    }

    async fn update_user_profile(&self, update: ProfileUpdate) -> Result<User> {
        let mut state = self.state();
        if let Some(name) = update.name {
            if !name.trim().is_empty() {
                state.user.name = name;
            }
        }
        if let Some(file) = update.profile_pic {
            state.user.profile_pic = object_url(&file.file_name);
        }
        self.persist(&state)?;
        Ok(state.user.clone())
    }

    async fn get_albums(&self) -> Result<Vec<Album>> {
        Ok(self.state().albums.clone())
    }

    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>> {
        Ok(self.state().albums.iter().find(|a| &a.id == id).cloned())
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let needle = query.to_lowercase();
        let results = self
            .state()
            .tracks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.artist.to_lowercase().contains(&needle)
                    || t.album.title.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(results)
    }

    async fn autoplay_track(&self, exclude: &HashSet<TrackId>) -> Result<Option<Track>> {
        let state = self.state();
        let available: Vec<&Track> = state
            .tracks
            .iter()
            .filter(|t| !exclude.contains(&t.id))
            .collect();
        if available.is_empty() {
            return Ok(None);
        }
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..available.len());
        Ok(Some(available[index].clone()))
    }

    async fn upload_song(&self, upload: SongUpload) -> Result<Track> {
        upload.validate()?;

        let mut state = self.state();
        // Stage the mutation so a failed persist leaves nothing behind
        let mut next = state.clone();

        let album_title = upload.album_title.to_lowercase();
        let position = next
            .albums
            .iter()
            .position(|a| a.title.to_lowercase() == album_title);
        let album_index = match position {
            Some(index) => {
                // A fresh upload may supply better art than the placeholder
                if let Some(art) = &upload.album_art_url {
                    if next.albums[index].cover.starts_with("https://picsum.photos/") {
                        next.albums[index].cover = art.clone();
                    }
                }
                index
            }
            None => {
                let cover = upload
                    .album_art_url
                    .clone()
                    .unwrap_or_else(|| placeholder_cover(&upload.album_title));
                next.albums
                    .push(Album::new(&upload.album_title, &upload.artist, cover));
                next.albums.len() - 1
            }
        };

        let mut track = Track::new(
            &upload.title,
            &upload.artist,
            next.albums[album_index].to_ref(),
            upload.duration.unwrap_or_default(),
            object_url(&upload.file.file_name),
        );
        track.album_art_url = upload.album_art_url;

        next.tracks.push(track.clone());
        next.albums[album_index].tracks.push(track.clone());

        self.persist(&next)
            .map_err(|err| LytteError::transfer(err.to_string()))?;
        *state = next;
        Ok(track)
    }

    async fn add_to_history(&self, track: &Track) -> Result<()> {
        let mut state = self.state();
        state.user.record_play(track.clone());
        self.persist(&state)
    }

    async fn history(&self) -> Result<Vec<Track>> {
        Ok(self.state().user.history.clone())
    }

    async fn downloads(&self) -> Result<Vec<Track>> {
        let state = self.state();
        Ok(state
            .tracks
            .iter()
            .filter(|t| state.user.downloads.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn liked_songs(&self) -> Result<Vec<Track>> {
        let state = self.state();
        Ok(state
            .tracks
            .iter()
            .filter(|t| state.user.liked_songs.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn add_download(&self, id: &TrackId) -> Result<()> {
        let mut state = self.state();
        if !state.user.downloads.contains(id) {
            state.user.downloads.push(id.clone());
            self.persist(&state)?;
        }
        Ok(())
    }

    async fn remove_download(&self, id: &TrackId) -> Result<()> {
        let mut state = self.state();
        if state.user.downloads.contains(id) {
            state.user.downloads.retain(|d| d != id);
            self.persist(&state)?;
        }
        Ok(())
    }

    async fn add_liked_song(&self, id: &TrackId) -> Result<()> {
        let mut state = self.state();
        if !state.user.liked_songs.contains(id) {
            state.user.liked_songs.push(id.clone());
            self.persist(&state)?;
        }
        Ok(())
    }

    async fn remove_liked_song(&self, id: &TrackId) -> Result<()> {
        let mut state = self.state();
        if state.user.liked_songs.contains(id) {
            state.user.liked_songs.retain(|l| l != id);
            self.persist(&state)?;
        }
        Ok(())
    }
}
