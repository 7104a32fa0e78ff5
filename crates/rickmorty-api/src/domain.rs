//! Domain types handed to callers after mapping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Life status of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterStatus {
    /// Alive.
    Alive,
    /// Dead.
    Dead,
    /// Unknown, or any value the API adds later.
    Unknown,
}

impl CharacterStatus {
    /// Parses the API's status text. Unrecognized text maps to `Unknown`.
    #[must_use]
    pub fn from_api_str(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alive" => Self::Alive,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Gender of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterGender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Genderless.
    Genderless,
    /// Unknown, or any value the API adds later.
    Unknown,
}

impl CharacterGender {
    /// Parses the API's gender text. Unrecognized text maps to `Unknown`.
    #[must_use]
    pub fn from_api_str(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            "genderless" => Self::Genderless,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Genderless => "No gender",
            Self::Unknown => "Not specified",
        }
    }
}

impl std::fmt::Display for CharacterGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A named place, optionally resolvable to a location ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Location name ("unknown" when the API does not know it).
    pub name: String,
    /// Location ID, `None` when the API sends no URL.
    pub id: Option<u32>,
}

/// A character record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Character ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Life status.
    pub status: CharacterStatus,
    /// Species.
    pub species: String,
    /// Subspecies or variant (may be empty).
    pub kind: String,
    /// Gender.
    pub gender: CharacterGender,
    /// Avatar image URL.
    pub image_url: String,
    /// Place of origin.
    pub origin: Location,
    /// Last known location.
    pub location: Location,
    /// IDs of the episodes the character appears in, in API order.
    pub episode_ids: Vec<u32>,
    /// Creation timestamp, when parseable.
    pub created: Option<DateTime<Utc>>,
}

/// An episode record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Episode ID.
    pub id: u32,
    /// Episode title.
    pub name: String,
    /// Air date as sent by the API.
    pub air_date: String,
    /// Season number parsed from the episode code.
    pub season_number: u32,
    /// Episode number within the season.
    pub episode_number: u32,
    /// IDs of the characters appearing in the episode.
    pub character_ids: Vec<u32>,
    /// Creation timestamp, when parseable.
    pub created: Option<DateTime<Utc>>,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Total number of records across all pages.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Next page number, `None` on the last page.
    pub next: Option<u32>,
    /// Previous page number, `None` on the first page.
    pub prev: Option<u32>,
}

/// One page of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPage {
    /// Pagination metadata.
    pub info: PageInfo,
    /// Characters on this page.
    pub characters: Vec<Character>,
}

/// One page of episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodePage {
    /// Pagination metadata.
    pub info: PageInfo,
    /// Episodes on this page.
    pub episodes: Vec<Episode>,
}

/// Groups episodes by season number, keeping input order within a season.
#[must_use]
pub fn group_by_season(episodes: &[Episode]) -> BTreeMap<u32, Vec<Episode>> {
    let mut seasons: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();
    for episode in episodes {
        seasons
            .entry(episode.season_number)
            .or_default()
            .push(episode.clone());
    }
    seasons
}
