//! Rick and Morty API response types, as sent on the wire.
//!
//! Unknown fields are ignored so API additions do not break decoding.

use serde::Deserialize;

// --- Character ---

/// Response from `character/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCharacter {
    /// Character ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Life status ("Alive", "Dead", "unknown").
    pub status: String,
    /// Species.
    pub species: String,
    /// Subspecies or variant (often empty).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Gender ("Female", "Male", "Genderless", "unknown").
    pub gender: String,
    /// Place of origin.
    pub origin: RemoteLocationRef,
    /// Last known location.
    pub location: RemoteLocationRef,
    /// Avatar image URL.
    pub image: String,
    /// Episode URLs the character appears in.
    #[serde(default)]
    pub episode: Vec<String>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created: String,
}

/// Name + URL reference to a location.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLocationRef {
    /// Location name.
    pub name: String,
    /// Location URL (empty for "unknown").
    #[serde(default)]
    pub url: String,
}

// --- Episode ---

/// Response from `episode/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEpisode {
    /// Episode ID.
    pub id: u32,
    /// Episode title.
    pub name: String,
    /// Air date (e.g. "December 2, 2013").
    pub air_date: String,
    /// Episode code (e.g. "S01E01").
    pub episode: String,
    /// Character URLs appearing in the episode.
    #[serde(default)]
    pub characters: Vec<String>,
    /// Creation timestamp (RFC 3339).
    #[serde(default)]
    pub created: String,
}

// --- Pages ---

/// `info` block of a paginated response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePageInfo {
    /// Total number of records.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub prev: Option<String>,
}

/// Response from `character/?page={n}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCharacterPage {
    /// Pagination metadata.
    pub info: RemotePageInfo,
    /// Characters on this page.
    pub results: Vec<RemoteCharacter>,
}

/// Response from `episode?page={n}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEpisodePage {
    /// Pagination metadata.
    pub info: RemotePageInfo,
    /// Episodes on this page.
    pub results: Vec<RemoteEpisode>,
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteErrorResponse {
    /// Error text (e.g. "Character not found").
    pub error: String,
}
