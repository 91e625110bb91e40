//! First-run sample content
//!
//! Seeds the store with one album and a few demo tracks so a fresh
//! installation has something to play.

use lytte_core::{Album, Track, User};
use std::time::Duration;

/// Default session user
pub(crate) fn default_user() -> User {
    let mut user = User::new("Music Lover");
    user.profile_pic = "https://i.pravatar.cc/150?u=lytte".to_string();
    user
}

/// Default album and track lists
pub(crate) fn default_library() -> (Vec<Album>, Vec<Track>) {
    let mut album = Album::new(
        "Night Drive",
        "Various Artists",
        "https://picsum.photos/seed/night-drive/300/300",
    );

    let tracks = vec![
        Track::new(
            "Neon Skyline",
            "Aria Vale",
            album.to_ref(),
            Duration::from_secs(214),
            "local://demo/neon-skyline.mp3",
        ),
        Track::new(
            "Midnight Transit",
            "Cobalt Echo",
            album.to_ref(),
            Duration::from_secs(187),
            "local://demo/midnight-transit.mp3",
        ),
        Track::new(
            "Harbor Lights",
            "Nova Reed",
            album.to_ref(),
            Duration::from_secs(243),
            "local://demo/harbor-lights.mp3",
        ),
    ];

    album.tracks = tracks.clone();
    (vec![album], tracks)
}
