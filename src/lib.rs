//! Playlist library indexing for "which of my playlists contain this song"
//! features in music-client extensions.
//!
//! The host client owns the UI and the RPC bridge to the streaming backend;
//! this crate owns the host-independent middle layer:
//!
//! - [`flatten`]: walk the library's nested folder tree into a flat list of
//!   playlist links worth indexing (owned by the user, non-empty)
//! - [`PlaylistLoader`]: fetch one playlist's descriptor through a
//!   [`LibrarySource`]
//! - [`LibraryIndex`]: immutable generations of loaded playlists, swapped in
//!   atomically so queries never see a half-built index
//! - [`RefreshScheduler`]: background loop that rebuilds the index on a fixed
//!   period, tolerating per-playlist fetch failures
//! - [`PlaylistFinder`]: the containment query surface handed to the UI layer
//!
//! The host implements [`LibrarySource`] over whatever bridge it has and
//! gates its UI trigger on [`PlaylistFinder::is_ready`].

mod finder;
mod flatten;
mod loader;
pub mod logging;
mod model;
mod refresh;
mod source;

pub use finder::PlaylistFinder;
pub use flatten::{DEFAULT_MAX_FOLDER_DEPTH, flatten, flatten_with_depth};
pub use loader::PlaylistLoader;
pub use model::{FolderNode, Generation, LibraryIndex, PlaylistDescriptor, TrackRef};
pub use refresh::{CycleReport, LoadFailure, RefreshOptions, RefreshScheduler, refresh_once};
pub use source::{LibrarySource, ProgressSink};
