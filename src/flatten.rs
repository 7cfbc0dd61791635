//! Flattening the library folder tree into indexable playlist links

use crate::model::FolderNode;

/// Ceiling on folder nesting while walking the tree. The host is trusted to
/// return a finite tree, but a cyclic or self-referential payload would
/// otherwise recurse without bound.
pub const DEFAULT_MAX_FOLDER_DEPTH: usize = 64;

/// Collect the links of playlists worth indexing: owned by the user and
/// non-empty. Followed and empty playlists are filtered out deliberately,
/// not reported as errors. Folders never appear in the output.
///
/// Traversal is depth-first pre-order, visiting a folder's children in the
/// order the host gave them.
pub fn flatten(root: &FolderNode) -> Vec<String> {
    flatten_with_depth(root, DEFAULT_MAX_FOLDER_DEPTH)
}

/// [`flatten`] with an explicit nesting ceiling; folders deeper than
/// `max_depth` are skipped with a warning and the walk continues.
pub fn flatten_with_depth(root: &FolderNode, max_depth: usize) -> Vec<String> {
    let mut links = Vec::new();
    walk(root, 0, max_depth, &mut links);
    links
}

fn walk(node: &FolderNode, depth: usize, max_depth: usize, out: &mut Vec<String>) {
    match node {
        FolderNode::Folder { rows } => {
            if depth >= max_depth {
                tracing::warn!(depth, "folder nesting exceeds ceiling, skipping subtree");
                return;
            }
            for child in rows {
                walk(child, depth + 1, max_depth, out);
            }
        }
        FolderNode::Playlist {
            link,
            owned_by_self,
            item_count,
        } => {
            if *owned_by_self && *item_count > 0 {
                out.push(link.clone());
            }
        }
    }
}
