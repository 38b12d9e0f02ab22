use super::spotify_auth::{self, CachedToken};
use super::CatalogProvider;
use crate::cache::{self, CacheStore};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{SearchKind, SearchResult};
use crate::{normalize, util};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const MAX_LINKS_LIMIT: u32 = 20;

/// `{"error": {"status": 400, "message": "..."}}` as returned by the Web API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn upstream_error(status: u16, body: &str) -> CatalogError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(b) => CatalogError::Upstream {
            status,
            message: b.error.message,
        },
        Err(_) => CatalogError::Unknown(format!("unexpected status {}: {}", status, body)),
    }
}

/// Spotify catalog client using the client-credentials flow.
/// The bearer token is cached in memory until shortly before it expires.
/// Endpoints come from `Config` (and so may be overridden by SPOTIFY_AUTH_BASE / SPOTIFY_API_BASE).
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    auth_base: String,
    api_base: String,
    market: String,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl: Duration,
    token: tokio::sync::Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::from_config(&Config::new(client_id, client_secret))
    }

    pub fn from_config(cfg: &Config) -> Self {
        let cache: Option<Arc<dyn CacheStore>> = if cfg.cache_enabled {
            Some(cache::shared())
        } else {
            None
        };
        Self {
            client: Client::new(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            auth_base: cfg.auth_base.trim_end_matches('/').to_string(),
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            market: cfg.market.clone(),
            cache,
            cache_ttl: cfg.cache_ttl(),
            token: tokio::sync::Mutex::new(None),
        }
    }

    /// Cache found results in `store` instead of the process-wide one.
    pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(store);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn get_access_token(&self) -> Result<String> {
        let mut lock = self.token.lock().await;
        if let Some(t) = lock.as_ref() {
            if t.is_fresh() {
                return Ok(t.access_token.clone());
            }
            debug!("Spotify token expired, refreshing");
        }
        let fresh = spotify_auth::request_client_credentials_token(
            &self.client,
            &self.auth_base,
            &self.client_id,
            &self.client_secret,
        )
        .await?;
        let access_token = fresh.access_token.clone();
        *lock = Some(fresh);
        Ok(access_token)
    }

    /// Drop the cached token so the next call requests a new one.
    pub async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// Dispatch a search by kind alias. Absent kind means track.
    pub async fn search(&self, query: &str, kind: Option<&str>) -> Result<SearchResult> {
        if query.is_empty() {
            return Err(CatalogError::validation("please provide a search query"));
        }
        let kind = SearchKind::resolve(kind)?;
        self.search_kind(kind, query).await
    }

    pub async fn search_track(&self, query: &str) -> Result<SearchResult> {
        self.search_kind(SearchKind::Track, query).await
    }

    pub async fn search_album(&self, query: &str) -> Result<SearchResult> {
        self.search_kind(SearchKind::Album, query).await
    }

    pub async fn search_artist(&self, query: &str) -> Result<SearchResult> {
        self.search_kind(SearchKind::Artist, query).await
    }

    pub async fn search_playlist(&self, query: &str) -> Result<SearchResult> {
        self.search_kind(SearchKind::Playlist, query).await
    }

    /// Search one kind and normalize its first match. Zero matches is the
    /// kind's not-found record, not an error.
    pub async fn search_kind(&self, kind: SearchKind, query: &str) -> Result<SearchResult> {
        if query.is_empty() {
            return Err(CatalogError::validation(format!(
                "please provide a {} name to search on Spotify",
                kind
            )));
        }
        let key = util::cache_key(kind, query);
        if let Some(hit) = self.cached(kind, &key).await {
            debug!("serving {} from cache", key);
            return Ok(hit);
        }

        let token = self.get_access_token().await?;
        // Only track searches pin market and limit; the rest use provider defaults.
        let url = match kind {
            SearchKind::Track => format!(
                "{}/search?q={}&type=track&limit=1&market={}",
                self.api_base,
                urlencoding::encode(query),
                urlencoding::encode(&self.market)
            ),
            _ => format!(
                "{}/search?q={}&type={}",
                self.api_base,
                urlencoding::encode(query),
                kind
            ),
        };
        let j = self.get_json(&url, &token).await?;
        let result = normalize::normalize(kind, &j);

        if !result.is_not_found() {
            if let Some(store) = &self.cache {
                let v = serde_json::to_value(&result)?;
                store.set(&key, v, self.cache_ttl).await;
            }
        }
        Ok(result)
    }

    /// External links of up to `limit` (1..=20) matching tracks in the configured market.
    pub async fn search_track_links(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        if query.is_empty() {
            return Err(CatalogError::validation("please provide a search query"));
        }
        if !(1..=MAX_LINKS_LIMIT).contains(&limit) {
            return Err(CatalogError::validation(format!(
                "limit must be between 1 and {}",
                MAX_LINKS_LIMIT
            )));
        }
        let token = self.get_access_token().await?;
        let url = format!(
            "{}/search?q={}&type=track&limit={}&market={}",
            self.api_base,
            urlencoding::encode(query),
            limit,
            urlencoding::encode(&self.market)
        );
        let j = self.get_json(&url, &token).await?;
        let links = j["tracks"]["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|it| it["external_urls"]["spotify"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(links)
    }

    /// Link of a single track recommended from the seed track link.
    pub async fn get_recommendation(&self, track_url: &str) -> Result<String> {
        util::validate_track_url(track_url)?;
        let id = util::track_id_from_url(track_url);
        let token = self.get_access_token().await?;
        let url = format!(
            "{}/recommendations?seed_tracks={}&limit=1&market={}",
            self.api_base,
            urlencoding::encode(id),
            urlencoding::encode(&self.market)
        );
        let j = self.get_json(&url, &token).await?;
        j["tracks"][0]["external_urls"]["spotify"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CatalogError::unknown("no recommendation returned for track"))
    }

    async fn cached(&self, kind: SearchKind, key: &str) -> Option<SearchResult> {
        let store = self.cache.as_ref()?;
        let v = store.get(key).await?;
        match serde_json::from_value::<SearchResult>(v) {
            Ok(r) if r.kind() == kind => Some(r),
            _ => {
                warn!("ignoring malformed cache entry {}", key);
                None
            }
        }
    }

    async fn get_json(&self, url: &str, token: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Spotify request failed: {} => {}", status, body);
            return Err(upstream_error(status.as_u16(), &body));
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogProvider for SpotifyClient {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn search(&self, query: &str, kind: Option<&str>) -> Result<SearchResult> {
        SpotifyClient::search(self, query, kind).await
    }

    async fn get_recommendation(&self, track_url: &str) -> Result<String> {
        SpotifyClient::get_recommendation(self, track_url).await
    }

    async fn get_access_token(&self) -> Result<String> {
        SpotifyClient::get_access_token(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_body_is_upstream() {
        let e = upstream_error(400, r#"{"error":{"status":400,"message":"No search query"}}"#);
        match e {
            CatalogError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No search query");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unstructured_error_body_is_unknown() {
        assert!(matches!(upstream_error(502, "<html>bad gateway</html>"), CatalogError::Unknown(_)));
        assert!(matches!(upstream_error(400, r#"{"error":"invalid"}"#), CatalogError::Unknown(_)));
    }
}
