//! Port traits for the host-provided library bridge

use anyhow::Result;

use crate::model::{FolderNode, PlaylistDescriptor};

/// Access to the user's playlist library, however the host exposes it.
///
/// Production implementations wrap the client's RPC/IPC bridge; tests use
/// the generated mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LibrarySource: Send + Sync {
    /// The full folder/playlist tree of the user's library.
    async fn fetch_folder_tree(&self) -> Result<FolderNode>;

    /// One playlist's metadata and ordered track list.
    async fn fetch_playlist(&self, link: &str) -> Result<PlaylistDescriptor>;
}

/// Best-effort progress notifications during the initial index build.
///
/// Implementations must swallow their own failures; a broken notification
/// channel must never affect indexing.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink: Send + Sync {
    fn report_progress(&self, percent: u8);
}
