use crate::error::{CatalogError, Result};
use crate::models::SearchKind;

pub const WEB_PLAYER_HOST: &str = "open.spotify.com";
pub const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";

pub fn cache_key(kind: SearchKind, query: &str) -> String {
    format!("{}_{}", kind.as_str(), query)
}

/// Check that `url` is a web-player track link. All three checks must pass.
pub fn validate_track_url(url: &str) -> Result<()> {
    let valid = url.contains(WEB_PLAYER_HOST)
        && url.contains("/track/")
        && url.contains(TRACK_URL_PREFIX);
    if !valid {
        return Err(CatalogError::validation(
            "invalid Spotify track URL, please provide a valid Spotify track URL",
        ));
    }
    Ok(())
}

/// Track id is everything after the last `/`.
pub fn track_id_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or("")
}
