//! In-memory index of the user's playlists with atomic generation swap

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::types::PlaylistDescriptor;

/// One immutable snapshot of the indexed library.
///
/// A generation is built in full before it is published and never mutated
/// afterwards, so a reader holding an `Arc<Generation>` can keep using it
/// after a newer generation has been installed.
pub struct Generation {
    by_id: HashMap<String, Arc<PlaylistDescriptor>>,
    ordered: Vec<Arc<PlaylistDescriptor>>,
    built_at: DateTime<Utc>,
}

impl Generation {
    fn build(playlists: Vec<PlaylistDescriptor>) -> Self {
        let mut by_id = HashMap::with_capacity(playlists.len());
        let mut ordered = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            let playlist = Arc::new(playlist);
            match by_id.insert(playlist.id.clone(), playlist.clone()) {
                None => ordered.push(playlist),
                Some(_) => {
                    // Duplicate links in one cycle should not happen; keep
                    // the latest descriptor and drop the earlier entry.
                    tracing::debug!(id = %playlist.id, "duplicate playlist id in generation");
                    ordered.retain(|existing| existing.id != playlist.id);
                    ordered.push(playlist);
                }
            }
        }
        Self {
            by_id,
            ordered,
            built_at: Utc::now(),
        }
    }

    /// Playlists in this generation, in the order they were collected.
    pub fn playlists(&self) -> impl Iterator<Item = &Arc<PlaylistDescriptor>> {
        self.ordered.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<PlaylistDescriptor>> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Linear scan: every playlist whose track list contains `track_id`.
    /// A playlist appears at most once even if the track repeats in it.
    pub fn containing(&self, track_id: &str) -> Vec<Arc<PlaylistDescriptor>> {
        self.ordered
            .iter()
            .filter(|playlist| playlist.contains_track(track_id))
            .cloned()
            .collect()
    }
}

/// Shared handle to the current library generation.
///
/// The refresh scheduler is the only writer; everything else reads. Each
/// rebuild constructs the new [`Generation`] entirely off to the side and
/// publishes it with a single pointer store under the write lock, so a
/// concurrent reader sees either the old generation in full or the new one
/// in full, never a mix.
#[derive(Clone)]
pub struct LibraryIndex {
    current: Arc<RwLock<Option<Arc<Generation>>>>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Install a new generation built from `playlists`.
    pub async fn replace(&self, playlists: Vec<PlaylistDescriptor>) {
        let generation = Arc::new(Generation::build(playlists));
        tracing::debug!(playlists = generation.len(), "installing new index generation");
        *self.current.write().await = Some(generation);
    }

    /// Playlists in the current generation containing `track_id`.
    /// Empty before the first [`replace`](Self::replace) completes.
    pub async fn query(&self, track_id: &str) -> Vec<Arc<PlaylistDescriptor>> {
        match self.snapshot().await {
            Some(generation) => generation.containing(track_id),
            None => Vec::new(),
        }
    }

    /// True once at least one full rebuild has been installed.
    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// The current generation, if any; holders keep a consistent view even
    /// across later replaces.
    pub async fn snapshot(&self) -> Option<Arc<Generation>> {
        self.current.read().await.clone()
    }
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::TrackRef;

    fn playlist(id: &str, tracks: &[&str]) -> PlaylistDescriptor {
        PlaylistDescriptor {
            id: id.to_string(),
            name: format!("playlist {id}"),
            description: String::new(),
            cover_ref: String::new(),
            tracks: tracks.iter().map(|t| TrackRef::new(*t)).collect(),
        }
    }

    #[tokio::test]
    async fn query_returns_every_playlist_containing_the_track() {
        let index = LibraryIndex::new();
        index
            .replace(vec![
                playlist("A", &["t1", "t2"]),
                playlist("B", &["t2", "t3"]),
            ])
            .await;

        let mut ids: Vec<_> = index
            .query("t2")
            .await
            .iter()
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        assert_eq!(ids, ["A", "B"]);
        assert!(index.query("t9").await.is_empty());
    }

    #[tokio::test]
    async fn playlist_with_repeated_track_appears_once() {
        let index = LibraryIndex::new();
        index.replace(vec![playlist("A", &["t1", "t1", "t1"])]).await;

        let matches = index.query("t1").await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "A");
    }

    #[tokio::test]
    async fn not_ready_until_first_replace_and_queries_are_empty() {
        let index = LibraryIndex::new();
        assert!(!index.is_ready().await);
        assert!(index.query("t1").await.is_empty());
        assert!(index.snapshot().await.is_none());

        index.replace(vec![]).await;
        assert!(index.is_ready().await);
        assert!(index.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_is_idempotent_for_the_same_input() {
        let index = LibraryIndex::new();
        let build = || vec![playlist("A", &["t1"]), playlist("B", &["t1", "t2"])];

        index.replace(build()).await;
        let first: Vec<_> = index.query("t1").await.iter().map(|p| p.id.clone()).collect();

        index.replace(build()).await;
        let second: Vec<_> = index.query("t1").await.iter().map(|p| p.id.clone()).collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn old_generation_stays_valid_after_a_replace() {
        let index = LibraryIndex::new();
        index.replace(vec![playlist("A", &["t1"])]).await;
        let old = index.snapshot().await.unwrap();

        index.replace(vec![playlist("B", &["t2"])]).await;

        // The superseded generation is unchanged for readers holding it.
        assert_eq!(old.containing("t1").len(), 1);
        assert!(old.containing("t2").is_empty());

        // New readers see only the new generation.
        assert!(index.query("t1").await.is_empty());
        assert_eq!(index.query("t2").await.len(), 1);
    }

    #[tokio::test]
    async fn clones_of_the_handle_share_the_same_generations() {
        let index = LibraryIndex::new();
        let other = index.clone();
        index.replace(vec![playlist("A", &["t1"])]).await;

        assert!(other.is_ready().await);
        assert_eq!(other.query("t1").await.len(), 1);
    }

    #[tokio::test]
    async fn generation_lookup_by_id() {
        let index = LibraryIndex::new();
        index.replace(vec![playlist("A", &["t1"])]).await;

        let generation = index.snapshot().await.unwrap();
        assert_eq!(generation.get("A").unwrap().id, "A");
        assert!(generation.get("Z").is_none());
        assert_eq!(generation.len(), 1);
        assert!(generation.built_at() <= Utc::now());
    }
}
