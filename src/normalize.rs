//! Field-mapping tables from raw Spotify search items to normalized records.
//!
//! Every mapper takes the matched upstream item and fills each missing field
//! with its sentinel, so records of a given kind always have the same shape.
use crate::models::*;
use serde_json::Value;

/// Map the first matched item of a search response for `kind`, or the kind's
/// not-found record when the response holds no usable item.
pub fn normalize(kind: SearchKind, response: &Value) -> SearchResult {
    match first_item(kind, response) {
        Some(item) => match kind {
            SearchKind::Track => SearchResult::Track(track_info(item)),
            SearchKind::Album => SearchResult::Album(album_info(item)),
            SearchKind::Artist => SearchResult::Artist(artist_info(item)),
            SearchKind::Playlist => SearchResult::Playlist(playlist_info(item)),
        },
        None => SearchResult::not_found(kind),
    }
}

/// First non-null entry of `<container>.items`. Playlist results are padded with nulls.
pub fn first_item(kind: SearchKind, response: &Value) -> Option<&Value> {
    response[kind.container()]["items"]
        .as_array()?
        .iter()
        .find(|it| it.is_object())
}

pub fn track_info(item: &Value) -> TrackInfo {
    let artists = item["artists"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    // Nameless entries still count toward "and N more".
    let names: Vec<&str> = artists
        .iter()
        .map(|a| text(&a["name"]).unwrap_or(UNKNOWN_ARTIST))
        .collect();
    let joined = join_artist_names(&names);
    let duration_in_ms = item["duration_ms"].as_u64();
    TrackInfo {
        title: text_or(&item["name"], UNKNOWN_TRACK),
        artist: if joined.is_empty() { UNKNOWN_ARTIST.into() } else { joined },
        thumbnail: first_image(&item["album"]["images"]),
        link: text_or(&item["external_urls"]["spotify"], UNKNOWN_TRACK_LINK),
        artist_link: text_or(&item["artists"][0]["external_urls"]["spotify"], UNKNOWN_ARTIST_URL),
        artists_links: artists
            .iter()
            .filter_map(|a| text(&a["external_urls"]["spotify"]))
            .map(str::to_string)
            .collect(),
        album: text_or(&item["album"]["name"], UNKNOWN_ALBUM),
        duration: duration_in_ms
            .map(format_duration)
            .unwrap_or_else(|| UNKNOWN_DURATION.into()),
        duration_in_ms,
        raw_data: Some(item.clone()),
    }
}

pub fn album_info(item: &Value) -> AlbumInfo {
    AlbumInfo {
        title: text_or(&item["name"], UNKNOWN_ALBUM),
        artist: text_or(&item["artists"][0]["name"], UNKNOWN_ARTIST),
        thumbnail: first_image(&item["images"]),
        link: text_or(&item["external_urls"]["spotify"], UNKNOWN_ALBUM_LINK),
        artist_link: text_or(&item["artists"][0]["external_urls"]["spotify"], UNKNOWN_ARTIST_URL),
        raw_data: Some(item.clone()),
    }
}

pub fn artist_info(item: &Value) -> ArtistInfo {
    ArtistInfo {
        name: text_or(&item["name"], UNKNOWN_ARTIST),
        thumbnail: first_image(&item["images"]),
        link: text_or(&item["external_urls"]["spotify"], UNKNOWN_ARTIST_LINK),
        followers: item["followers"]["total"].as_u64(),
        raw_data: Some(item.clone()),
    }
}

pub fn playlist_info(item: &Value) -> PlaylistInfo {
    PlaylistInfo {
        title: text_or(&item["name"], UNKNOWN_PLAYLIST),
        description: text_or(&item["description"], NO_DESCRIPTION),
        playlist_owner: text_or(&item["owner"]["display_name"], UNKNOWN_OWNER),
        total_tracks: item["tracks"]["total"].as_u64(),
        thumbnail: first_image(&item["images"]),
        link: text_or(&item["external_urls"]["spotify"], UNKNOWN_PLAYLIST_LINK),
        raw_data: Some(item.clone()),
    }
}

/// Join artist names for display: `A`, `A and B`, or `A, B and N more`.
/// Commas inside a single name are dropped first.
pub fn join_artist_names<S: AsRef<str>>(names: &[S]) -> String {
    let clean: Vec<String> = names.iter().map(|n| n.as_ref().replace(',', "")).collect();
    match clean.as_slice() {
        [] => String::new(),
        [a] => a.clone(),
        [a, b] => format!("{} and {}", a, b),
        [a, b, rest @ ..] => format!("{}, {} and {} more", a, b, rest.len()),
    }
}

/// Render a millisecond duration from its coarsest non-zero unit down to seconds.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!(
            "{} days {} hours {} mins {} secs",
            days,
            hours % 24,
            minutes % 60,
            seconds % 60
        )
    } else if hours > 0 {
        format!("{} hours {} mins {} secs", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{} mins {} secs", minutes, seconds % 60)
    } else {
        format!("{} seconds", seconds)
    }
}

fn text(v: &Value) -> Option<&str> {
    v.as_str().filter(|s| !s.is_empty())
}

fn text_or(v: &Value, sentinel: &str) -> String {
    text(v).unwrap_or(sentinel).to_string()
}

fn first_image(images: &Value) -> Option<String> {
    text(&images[0]["url"]).map(str::to_string)
}
