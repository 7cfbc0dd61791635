//! Model module - library data types and the playlist index
//!
//! - `types`: folder tree nodes, playlist descriptors, track references
//! - `index`: generation-swapped in-memory index of loaded playlists

mod index;
mod types;

pub use index::{Generation, LibraryIndex};
pub use types::{FolderNode, PlaylistDescriptor, TrackRef};
