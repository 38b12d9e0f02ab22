use super::CatalogProvider;
use crate::error::{CatalogError, Result};
use crate::models::*;
use crate::util;
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

/// A simple offline provider for consumers' tests.
/// It logs operations and returns deterministic records built from the query.
pub struct MockCatalog {}

impl MockCatalog {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn mock_link(kind: SearchKind, id: &str) -> String {
    format!("https://{}/{}/{}", util::WEB_PLAYER_HOST, kind, id)
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str, kind: Option<&str>) -> Result<SearchResult> {
        if query.is_empty() {
            return Err(CatalogError::validation("please provide a search query"));
        }
        let kind = SearchKind::resolve(kind)?;
        info!("MockCatalog: search {} {}", kind, query);
        let link = mock_link(kind, query);
        let raw = Some(json!({ "name": query, "mock": true }));
        Ok(match kind {
            SearchKind::Track => SearchResult::Track(TrackInfo {
                title: query.into(),
                artist: "Mock Artist".into(),
                link,
                artists_links: vec![mock_link(SearchKind::Artist, "mock")],
                artist_link: mock_link(SearchKind::Artist, "mock"),
                album: "Mock Album".into(),
                duration: crate::normalize::format_duration(180_000),
                duration_in_ms: Some(180_000),
                raw_data: raw,
                ..TrackInfo::not_found()
            }),
            SearchKind::Album => SearchResult::Album(AlbumInfo {
                title: query.into(),
                artist: "Mock Artist".into(),
                link,
                artist_link: mock_link(SearchKind::Artist, "mock"),
                raw_data: raw,
                ..AlbumInfo::not_found()
            }),
            SearchKind::Artist => SearchResult::Artist(ArtistInfo {
                name: query.into(),
                link,
                followers: Some(0),
                raw_data: raw,
                ..ArtistInfo::not_found()
            }),
            SearchKind::Playlist => SearchResult::Playlist(PlaylistInfo {
                title: query.into(),
                playlist_owner: "mock".into(),
                total_tracks: Some(0),
                link,
                raw_data: raw,
                ..PlaylistInfo::not_found()
            }),
        })
    }

    async fn get_recommendation(&self, track_url: &str) -> Result<String> {
        util::validate_track_url(track_url)?;
        let id = util::track_id_from_url(track_url);
        info!("MockCatalog: recommendation for {}", id);
        Ok(format!("{}{}-next", util::TRACK_URL_PREFIX, id))
    }

    async fn get_access_token(&self) -> Result<String> {
        Ok("mock-token".into())
    }
}
