use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const TRACK_NOT_FOUND: &str = "Track Not Found";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const ALBUM_NOT_FOUND: &str = "Album Not Found";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const ARTIST_NOT_FOUND: &str = "Artist Not Found";
pub const UNKNOWN_PLAYLIST: &str = "Unknown Playlist";
pub const PLAYLIST_NOT_FOUND: &str = "Playlist Not Found";
pub const UNKNOWN_TRACK_LINK: &str = "Unknown Track Link";
pub const UNKNOWN_ALBUM_LINK: &str = "Unknown Album Link";
pub const UNKNOWN_ARTIST_LINK: &str = "Unknown Artist Link";
pub const UNKNOWN_PLAYLIST_LINK: &str = "Unknown Playlist Link";
pub const UNKNOWN_ARTIST_URL: &str = "Unknown Artist URL";
pub const UNKNOWN_DURATION: &str = "Unknown Duration";
pub const NO_DESCRIPTION: &str = "No Description Available";
pub const UNKNOWN_OWNER: &str = "Unknown Owner";

/// The four searchable catalog kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl SearchKind {
    /// Value of the provider's `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
            SearchKind::Playlist => "playlist",
        }
    }

    /// Key of the result container in a search response (`tracks`, `albums`, ...).
    pub fn container(&self) -> &'static str {
        match self {
            SearchKind::Track => "tracks",
            SearchKind::Album => "albums",
            SearchKind::Artist => "artists",
            SearchKind::Playlist => "playlists",
        }
    }

    /// Resolve an optional caller-supplied kind. Absent or empty means track.
    pub fn resolve(kind: Option<&str>) -> Result<Self> {
        match kind {
            None => Ok(SearchKind::Track),
            Some(k) if k.is_empty() => Ok(SearchKind::Track),
            Some(k) => k.parse(),
        }
    }
}

impl FromStr for SearchKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "track" | "song" | "music track" => Ok(SearchKind::Track),
            "album" | "music album" => Ok(SearchKind::Album),
            "artist" | "singer" => Ok(SearchKind::Artist),
            "playlist" | "music playlist" | "songs playlist" => Ok(SearchKind::Playlist),
            _ => Err(CatalogError::validation(
                "invalid search type, expected one of: track, album, artist, playlist",
            )),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{query, type}` request as received from a JSON-speaking caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            query: query.into(),
            kind: kind.map(str::to_string),
        }
    }

    /// Type-check a loosely shaped JSON object. Non-string fields are validation errors.
    pub fn from_value(v: Value) -> Result<Self> {
        let query = match v.get("query") {
            Some(Value::String(q)) if !q.is_empty() => q.clone(),
            _ => return Err(CatalogError::validation("please provide a search query")),
        };
        let kind = match v.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(k)) => Some(k.clone()),
            Some(_) => {
                return Err(CatalogError::validation(
                    "please provide a valid search type, eg: track, album, artist, playlist",
                ))
            }
        };
        Ok(Self { query, kind })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub thumbnail: Option<String>,
    pub link: String,
    pub artist_link: String,
    pub artists_links: Vec<String>,
    pub album: String,
    pub duration: String,
    pub duration_in_ms: Option<u64>,
    pub raw_data: Option<Value>,
}

impl TrackInfo {
    pub fn not_found() -> Self {
        Self {
            title: TRACK_NOT_FOUND.into(),
            artist: UNKNOWN_ARTIST.into(),
            thumbnail: None,
            link: UNKNOWN_TRACK_LINK.into(),
            artist_link: UNKNOWN_ARTIST_URL.into(),
            artists_links: Vec::new(),
            album: UNKNOWN_ALBUM.into(),
            duration: UNKNOWN_DURATION.into(),
            duration_in_ms: None,
            raw_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    pub title: String,
    pub artist: String,
    pub thumbnail: Option<String>,
    pub link: String,
    pub artist_link: String,
    pub raw_data: Option<Value>,
}

impl AlbumInfo {
    pub fn not_found() -> Self {
        Self {
            title: ALBUM_NOT_FOUND.into(),
            artist: UNKNOWN_ARTIST.into(),
            thumbnail: None,
            link: UNKNOWN_ALBUM_LINK.into(),
            artist_link: UNKNOWN_ARTIST_URL.into(),
            raw_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    pub name: String,
    pub thumbnail: Option<String>,
    pub link: String,
    pub followers: Option<u64>,
    pub raw_data: Option<Value>,
}

impl ArtistInfo {
    pub fn not_found() -> Self {
        Self {
            name: ARTIST_NOT_FOUND.into(),
            thumbnail: None,
            link: UNKNOWN_ARTIST_LINK.into(),
            followers: None,
            raw_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub title: String,
    pub description: String,
    pub playlist_owner: String,
    pub total_tracks: Option<u64>,
    pub thumbnail: Option<String>,
    pub link: String,
    pub raw_data: Option<Value>,
}

impl PlaylistInfo {
    pub fn not_found() -> Self {
        Self {
            title: PLAYLIST_NOT_FOUND.into(),
            description: NO_DESCRIPTION.into(),
            playlist_owner: UNKNOWN_OWNER.into(),
            total_tracks: None,
            thumbnail: None,
            link: UNKNOWN_PLAYLIST_LINK.into(),
            raw_data: None,
        }
    }
}

/// A normalized search result. Serialized with a `kind` tag so cached
/// entries round-trip through any JSON store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchResult {
    Track(TrackInfo),
    Album(AlbumInfo),
    Artist(ArtistInfo),
    Playlist(PlaylistInfo),
}

impl SearchResult {
    pub fn not_found(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Track => SearchResult::Track(TrackInfo::not_found()),
            SearchKind::Album => SearchResult::Album(AlbumInfo::not_found()),
            SearchKind::Artist => SearchResult::Artist(ArtistInfo::not_found()),
            SearchKind::Playlist => SearchResult::Playlist(PlaylistInfo::not_found()),
        }
    }

    pub fn kind(&self) -> SearchKind {
        match self {
            SearchResult::Track(_) => SearchKind::Track,
            SearchResult::Album(_) => SearchKind::Album,
            SearchResult::Artist(_) => SearchKind::Artist,
            SearchResult::Playlist(_) => SearchKind::Playlist,
        }
    }

    /// True when the upstream search matched nothing.
    pub fn is_not_found(&self) -> bool {
        self.raw_data().is_none()
    }

    pub fn raw_data(&self) -> Option<&Value> {
        match self {
            SearchResult::Track(t) => t.raw_data.as_ref(),
            SearchResult::Album(a) => a.raw_data.as_ref(),
            SearchResult::Artist(a) => a.raw_data.as_ref(),
            SearchResult::Playlist(p) => p.raw_data.as_ref(),
        }
    }

    /// Canonical link of the matched item (or the kind's link sentinel).
    pub fn link(&self) -> &str {
        match self {
            SearchResult::Track(t) => &t.link,
            SearchResult::Album(a) => &a.link,
            SearchResult::Artist(a) => &a.link,
            SearchResult::Playlist(p) => &p.link,
        }
    }

    pub fn into_track(self) -> Option<TrackInfo> {
        match self {
            SearchResult::Track(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_album(self) -> Option<AlbumInfo> {
        match self {
            SearchResult::Album(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_artist(self) -> Option<ArtistInfo> {
        match self {
            SearchResult::Artist(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_playlist(self) -> Option<PlaylistInfo> {
        match self {
            SearchResult::Playlist(p) => Some(p),
            _ => None,
        }
    }
}
