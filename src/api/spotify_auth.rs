use crate::error::{CatalogError, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Seconds shaved off the provider's lifetime so a token never expires mid-request.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at_ms: i64, // epoch millis
}

impl CachedToken {
    /// Build from the provider's `expires_in`, applying the safety margin.
    pub fn issued_now(access_token: String, expires_in: i64) -> Self {
        let lifetime_ms = expires_in.saturating_sub(EXPIRY_MARGIN_SECS).saturating_mul(1000);
        Self {
            access_token,
            expires_at_ms: Utc::now().timestamp_millis().saturating_add(lifetime_ms),
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.expires_at_ms > Utc::now().timestamp_millis()
    }
}

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// Run the client-credentials grant against `<auth_base>/api/token`.
/// Every failure is reported as `CatalogError::Auth`.
pub async fn request_client_credentials_token(
    client: &Client,
    auth_base: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<CachedToken> {
    let url = format!("{}/api/token", auth_base.trim_end_matches('/'));
    let resp = client
        .post(&url)
        .header(AUTHORIZATION, basic_auth_header(client_id, client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| CatalogError::Auth(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CatalogError::Auth(format!("{} - {}", status, body)));
    }
    let tr: TokenResponse = resp
        .json()
        .await
        .map_err(|e| CatalogError::Auth(format!("parse token response: {}", e)))?;
    let access_token = tr
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CatalogError::Auth("no access_token in response".into()))?;
    let expires_in = tr.expires_in.unwrap_or(3600);
    debug!("obtained Spotify access token, expires in {}s", expires_in);
    Ok(CachedToken::issued_now(access_token, expires_in))
}
