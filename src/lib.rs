//! Spotify catalog lookups (track / album / artist / playlist by name, plus
//! recommendations) over the client-credentials flow, returning records
//! whose shape never depends on what the provider sent back.
pub mod config;
pub mod error;
pub mod models;
pub mod api;
pub mod cache;
pub mod normalize;
pub mod util;

pub use api::mock::MockCatalog;
pub use api::spotify::SpotifyClient;
pub use api::CatalogProvider;
pub use cache::{CacheStore, MemoryCache};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use models::{AlbumInfo, ArtistInfo, PlaylistInfo, SearchKind, SearchRequest, SearchResult, TrackInfo};
