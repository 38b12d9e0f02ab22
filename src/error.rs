use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Terminal outcome of a failed catalog call. Nothing is retried.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Bad caller input: empty query, unknown kind, malformed track URL.
    #[error("validation error: {0}")]
    Validation(String),

    /// Token acquisition failed.
    #[error("error while getting Spotify access token: {0}")]
    Auth(String),

    /// The provider answered with a structured error body.
    #[error("Spotify API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The request never completed.
    #[error("error while making request to Spotify API: {0}")]
    Transport(String),

    #[error("{0}")]
    Unknown(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        // A decode failure means a response did arrive.
        if e.is_decode() {
            CatalogError::Unknown(e.to_string())
        } else {
            CatalogError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Unknown(format!("parse response json: {}", e))
    }
}
