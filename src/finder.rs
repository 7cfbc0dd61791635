//! Containment queries over the current index generation

use std::sync::Arc;

use crate::model::{LibraryIndex, PlaylistDescriptor};

/// Answers "which of the user's playlists contain this track".
///
/// This is the surface handed to the UI trigger. Callers gate on
/// [`is_ready`](Self::is_ready) before enabling their trigger; a query
/// issued before the first index build yields an empty result, not an
/// error.
#[derive(Clone)]
pub struct PlaylistFinder {
    index: LibraryIndex,
}

impl PlaylistFinder {
    pub fn new(index: LibraryIndex) -> Self {
        Self { index }
    }

    /// True once the first full index build has completed.
    pub async fn is_ready(&self) -> bool {
        self.index.is_ready().await
    }

    pub async fn find_playlists_containing(&self, track_id: &str) -> Vec<Arc<PlaylistDescriptor>> {
        let matches = self.index.query(track_id).await;
        tracing::debug!(track_id, matches = matches.len(), "containment query");
        matches
    }
}
