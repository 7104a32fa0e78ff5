//! Wire-to-domain conversions.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

use super::domain::{
    Character, CharacterGender, CharacterPage, CharacterStatus, Episode, EpisodePage, Location,
    PageInfo,
};
use super::error::ApiError;
use super::wire::{
    RemoteCharacter, RemoteCharacterPage, RemoteEpisode, RemoteEpisodePage, RemoteLocationRef,
    RemotePageInfo,
};

/// Regex for episode codes such as `S01E07`.
#[allow(clippy::expect_used)]
static EPISODE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[Ss](\d+)[Ee](\d+)\s*$").expect("failed to compile episode code regex")
});

/// Parses an episode code into `(season, episode)`.
///
/// # Input format
///
/// ```text
/// S01E07
/// ```
///
/// # Errors
///
/// Returns `ApiError::Decode` if the code does not match `S<n>E<n>`.
pub fn parse_episode_code(code: &str) -> Result<(u32, u32), ApiError> {
    let invalid = || ApiError::decode(format!("invalid episode code: {code:?}"));
    let caps = EPISODE_CODE_RE.captures(code).ok_or_else(invalid)?;
    let season = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(invalid)?;
    let episode = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(invalid)?;
    Ok((season, episode))
}

/// Extracts the numeric ID from the final path segment of a resource URL.
///
/// `https://rickandmortyapi.com/api/episode/28` yields `28`.
///
/// # Errors
///
/// Returns `ApiError::Decode` if the URL is invalid or its last segment is
/// not an integer.
pub fn id_from_url(raw: &str) -> Result<u32, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::decode(format!("invalid URL {raw:?}: {e}")))?;
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(|| ApiError::decode(format!("no numeric ID in URL {raw:?}")))
}

/// Extracts the `page` query parameter from a page link.
fn page_from_url(raw: &str) -> Option<u32> {
    let url = Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Parses an RFC 3339 timestamp, ignoring values that do not parse.
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn ids_from_urls(urls: &[String]) -> Result<Vec<u32>, ApiError> {
    urls.iter().map(String::as_str).map(id_from_url).collect()
}

impl TryFrom<RemoteLocationRef> for Location {
    type Error = ApiError;

    fn try_from(remote: RemoteLocationRef) -> Result<Self, Self::Error> {
        let id = if remote.url.trim().is_empty() {
            None
        } else {
            Some(id_from_url(&remote.url)?)
        };
        Ok(Self {
            name: remote.name,
            id,
        })
    }
}

impl TryFrom<RemoteCharacter> for Character {
    type Error = ApiError;

    fn try_from(remote: RemoteCharacter) -> Result<Self, Self::Error> {
        Ok(Self {
            id: remote.id,
            status: CharacterStatus::from_api_str(&remote.status),
            gender: CharacterGender::from_api_str(&remote.gender),
            episode_ids: ids_from_urls(&remote.episode)?,
            origin: Location::try_from(remote.origin)?,
            location: Location::try_from(remote.location)?,
            created: parse_created(&remote.created),
            name: remote.name,
            species: remote.species,
            kind: remote.kind,
            image_url: remote.image,
        })
    }
}

impl TryFrom<RemoteEpisode> for Episode {
    type Error = ApiError;

    fn try_from(remote: RemoteEpisode) -> Result<Self, Self::Error> {
        let (season_number, episode_number) = parse_episode_code(&remote.episode)?;
        Ok(Self {
            id: remote.id,
            season_number,
            episode_number,
            character_ids: ids_from_urls(&remote.characters)?,
            created: parse_created(&remote.created),
            name: remote.name,
            air_date: remote.air_date,
        })
    }
}

impl From<RemotePageInfo> for PageInfo {
    fn from(remote: RemotePageInfo) -> Self {
        Self {
            count: remote.count,
            pages: remote.pages,
            next: remote.next.as_deref().and_then(page_from_url),
            prev: remote.prev.as_deref().and_then(page_from_url),
        }
    }
}

impl TryFrom<RemoteCharacterPage> for CharacterPage {
    type Error = ApiError;

    fn try_from(remote: RemoteCharacterPage) -> Result<Self, Self::Error> {
        let characters = remote
            .results
            .into_iter()
            .map(Character::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            info: PageInfo::from(remote.info),
            characters,
        })
    }
}

impl TryFrom<RemoteEpisodePage> for EpisodePage {
    type Error = ApiError;

    fn try_from(remote: RemoteEpisodePage) -> Result<Self, Self::Error> {
        let episodes = remote
            .results
            .into_iter()
            .map(Episode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            info: PageInfo::from(remote.info),
            episodes,
        })
    }
}
