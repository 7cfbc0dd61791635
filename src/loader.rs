//! Playlist loading through the host bridge

use std::sync::Arc;

use anyhow::Result;

use crate::model::PlaylistDescriptor;
use crate::source::LibrarySource;

/// Thin loader over [`LibrarySource::fetch_playlist`].
///
/// No retry and no caching: every refresh cycle re-fetches each playlist so
/// edits show up on the next cycle, and the scheduler already tolerates
/// individual failures. A fetch error is passed through unmodified as the
/// cause.
#[derive(Clone)]
pub struct PlaylistLoader {
    source: Arc<dyn LibrarySource>,
}

impl PlaylistLoader {
    pub fn new(source: Arc<dyn LibrarySource>) -> Self {
        Self { source }
    }

    pub async fn load(&self, link: &str) -> Result<PlaylistDescriptor> {
        tracing::debug!(link, "fetching playlist");
        let playlist = self.source.fetch_playlist(link).await?;
        tracing::trace!(link, tracks = playlist.tracks.len(), "playlist loaded");
        Ok(playlist)
    }
}
