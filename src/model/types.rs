//! Core type definitions for the library tree and playlists

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A node of the user's library folder tree, as the host bridge reports it.
///
/// The bridge's rootlist payload tags rows with `type` and uses camelCase
/// field names; the serde attributes mirror that shape so a host adapter can
/// deserialize rows directly. Nodes are transient: they live for one tree
/// walk and are not retained by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FolderNode {
    /// A folder holding an ordered list of child nodes.
    Folder {
        #[serde(default)]
        rows: Vec<FolderNode>,
    },
    /// A reference to a playlist; the full descriptor is fetched separately.
    Playlist {
        link: String,
        #[serde(default, rename = "ownedBySelf")]
        owned_by_self: bool,
        #[serde(default, rename = "totalLength")]
        item_count: u32,
    },
}

impl FolderNode {
    pub fn folder(rows: Vec<FolderNode>) -> Self {
        Self::Folder { rows }
    }

    pub fn playlist(link: impl Into<String>, owned_by_self: bool, item_count: u32) -> Self {
        Self::Playlist {
            link: link.into(),
            owned_by_self,
            item_count,
        }
    }

    /// Decode a rootlist bridge payload (`{ "rows": [...] }`) into the root
    /// folder node of the library.
    pub fn from_rootlist_json(value: serde_json::Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct Rootlist {
            #[serde(default)]
            rows: Vec<FolderNode>,
        }

        let rootlist: Rootlist = serde_json::from_value(value)?;
        Ok(Self::Folder {
            rows: rootlist.rows,
        })
    }
}

/// A reference to one track within a playlist.
///
/// Containment is exact string equality of `id`; the crate never inspects
/// the identifier's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub id: String,
}

impl TrackRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A fully materialized playlist: metadata plus its ordered track list.
///
/// Track order reflects the playlist's own ordering at fetch time; no order
/// is guaranteed across refresh cycles if the user reorders concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_ref: String,
    #[serde(default)]
    pub tracks: Vec<TrackRef>,
}

impl PlaylistDescriptor {
    /// Decode a playlist bridge payload, which nests metadata under
    /// `playlist` and the track rows under `items`.
    pub fn from_bridge_json(value: serde_json::Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct Body {
            playlist: Meta,
            #[serde(default)]
            items: Vec<Item>,
        }

        #[derive(Deserialize)]
        struct Meta {
            link: String,
            name: String,
            #[serde(default)]
            description: String,
            #[serde(default)]
            picture: String,
        }

        #[derive(Deserialize)]
        struct Item {
            link: String,
        }

        let body: Body = serde_json::from_value(value)?;
        Ok(Self {
            id: body.playlist.link,
            name: body.playlist.name,
            description: body.playlist.description,
            cover_ref: body.playlist.picture,
            tracks: body
                .items
                .into_iter()
                .map(|item| TrackRef { id: item.link })
                .collect(),
        })
    }

    /// Whether this playlist contains the given track at least once.
    pub fn contains_track(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|track| track.id == track_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rootlist_json_decodes_into_nested_folder_nodes() {
        let payload = json!({
            "rows": [
                {
                    "type": "folder",
                    "rows": [
                        { "type": "playlist", "link": "spotify:playlist:inner",
                          "ownedBySelf": true, "totalLength": 12 },
                    ]
                },
                { "type": "playlist", "link": "spotify:playlist:outer",
                  "ownedBySelf": false, "totalLength": 3 },
            ]
        });

        let root = FolderNode::from_rootlist_json(payload).unwrap();
        assert_eq!(
            root,
            FolderNode::folder(vec![
                FolderNode::folder(vec![FolderNode::playlist(
                    "spotify:playlist:inner",
                    true,
                    12
                )]),
                FolderNode::playlist("spotify:playlist:outer", false, 3),
            ])
        );
    }

    #[test]
    fn rootlist_json_tolerates_missing_optional_fields() {
        let payload = json!({
            "rows": [
                { "type": "playlist", "link": "spotify:playlist:bare" },
                { "type": "folder" },
            ]
        });

        let root = FolderNode::from_rootlist_json(payload).unwrap();
        assert_eq!(
            root,
            FolderNode::folder(vec![
                FolderNode::playlist("spotify:playlist:bare", false, 0),
                FolderNode::folder(vec![]),
            ])
        );
    }

    #[test]
    fn playlist_bridge_json_decodes_metadata_and_track_rows() {
        let payload = json!({
            "playlist": {
                "link": "spotify:playlist:abc",
                "name": "Road Trip",
                "description": "windows down",
                "picture": "spotify:image:cover"
            },
            "items": [
                { "link": "spotify:track:t1" },
                { "link": "spotify:track:t2" },
            ]
        });

        let playlist = PlaylistDescriptor::from_bridge_json(payload).unwrap();
        assert_eq!(playlist.id, "spotify:playlist:abc");
        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.cover_ref, "spotify:image:cover");
        assert_eq!(
            playlist.tracks,
            vec![
                TrackRef::new("spotify:track:t1"),
                TrackRef::new("spotify:track:t2"),
            ]
        );
        assert!(playlist.contains_track("spotify:track:t2"));
        assert!(!playlist.contains_track("spotify:track:t9"));
    }
}
