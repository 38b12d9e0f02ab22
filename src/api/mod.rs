pub mod spotify;
pub mod mock;
pub mod spotify_auth;

use crate::error::Result;
use crate::models::{SearchRequest, SearchResult};

/// Provider trait: the lookup operations consumers (bots, pickers) need.
/// Implementations: spotify::SpotifyClient and mock::MockCatalog.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search by name. `kind` is an alias such as "track", "song", "singer"; absent means track.
    async fn search(&self, query: &str, kind: Option<&str>) -> Result<SearchResult>;

    /// Same as `search`, for callers holding a `{query, type}` request.
    async fn search_request(&self, req: &SearchRequest) -> Result<SearchResult> {
        self.search(&req.query, req.kind.as_deref()).await
    }

    /// Link of one track recommended from a seed track link.
    async fn get_recommendation(&self, track_url: &str) -> Result<String>;

    /// Current bearer token, refreshed when expired.
    async fn get_access_token(&self) -> Result<String>;

    /// Return the provider's name (for logging, UI, etc)
    fn name(&self) -> &str;
}
