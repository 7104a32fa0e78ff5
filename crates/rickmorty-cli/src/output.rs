//! Log-line rendering of fetched characters and episodes.

use std::collections::BTreeMap;

use rickmorty_api::{Character, Episode, PageInfo};

/// Logs one character in detail.
pub fn log_character(character: &Character) {
    tracing::info!("ID: {}", character.id);
    tracing::info!("Name: {}", character.name);
    tracing::info!(
        "Status: {} / {} / {}",
        character.status,
        character.species,
        character.gender
    );
    if !character.kind.is_empty() {
        tracing::info!("Type: {}", character.kind);
    }
    tracing::info!("Origin: {}", character.origin.name);
    tracing::info!("Last known location: {}", character.location.name);
    tracing::info!("Episodes: {}", character.episode_ids.len());
    tracing::info!("Image: {}", character.image_url);
}

/// Logs characters as a tab-separated table.
pub fn log_character_table(characters: &[Character]) {
    tracing::info!("ID\tName\t\t\tStatus\tSpecies");
    for character in characters {
        tracing::info!(
            "{}\t{}\t\t{}\t{}",
            character.id,
            character.name,
            character.status,
            character.species,
        );
    }
}

/// Logs one episode as a single line.
pub fn log_episode(episode: &Episode) {
    tracing::info!(
        "S{:02}E{:02}\t{}\t{} (air_date: {}, characters: {})",
        episode.season_number,
        episode.episode_number,
        episode.id,
        episode.name,
        episode.air_date,
        episode.character_ids.len(),
    );
}

/// Logs episodes in the given order.
pub fn log_episodes(episodes: &[Episode]) {
    for episode in episodes {
        log_episode(episode);
    }
}

/// Logs episodes under a header per season, seasons ascending.
pub fn log_seasons(seasons: &BTreeMap<u32, Vec<Episode>>) {
    for (season, episodes) in seasons {
        tracing::info!("Season {season}: {} episodes", episodes.len());
        log_episodes(episodes);
    }
}

/// Logs the page envelope summary.
pub fn log_page_info(page: u32, info: &PageInfo) {
    tracing::info!(
        "Page {page}/{} (total: {}, next: {}, prev: {})",
        info.pages,
        info.count,
        info.next
            .map_or_else(|| String::from("-"), |n| n.to_string()),
        info.prev
            .map_or_else(|| String::from("-"), |p| p.to_string()),
    );
}
