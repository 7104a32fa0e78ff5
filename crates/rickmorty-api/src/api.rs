//! `RickMortyApi` trait definition.
#![allow(clippy::future_not_send)]

use super::domain::{Character, CharacterPage, Episode, EpisodePage};
use super::operation::ApiOperation;
use super::params::CharacterFilter;

/// Rick and Morty API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
/// No method returns an error directly: every outcome is an `ApiOperation`.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(RickMortyApi: Send)]
pub trait LocalRickMortyApi {
    /// Fetches a character, serving repeated IDs from the cache.
    async fn fetch_character(&self, id: u32) -> ApiOperation<Character>;

    /// Fetches a single episode.
    async fn fetch_episode(&self, id: u32) -> ApiOperation<Episode>;

    /// Fetches several episodes in one request, in the order of `ids`.
    async fn fetch_episodes(&self, ids: &[u32]) -> ApiOperation<Vec<Episode>>;

    /// Fetches one page of the character listing.
    async fn fetch_character_page(&self, page: u32) -> ApiOperation<CharacterPage>;

    /// Fetches one page of the character listing restricted by `filter`.
    async fn fetch_character_page_filtered(
        &self,
        page: u32,
        filter: &CharacterFilter,
    ) -> ApiOperation<CharacterPage>;

    /// Fetches one page of the episode listing.
    async fn fetch_episode_page(&self, page: u32) -> ApiOperation<EpisodePage>;

    /// Fetches every episode across all pages, stopping at the first failed page.
    async fn fetch_all_episodes(&self) -> ApiOperation<Vec<Episode>>;

    /// Fetches every character whose name matches `name` across all pages.
    async fn search_all_characters_by_name(&self, name: &str) -> ApiOperation<Vec<Character>>;
}
