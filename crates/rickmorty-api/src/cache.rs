//! In-memory character cache shared by concurrent client calls.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::domain::Character;

/// ID-keyed store of characters fetched by a client.
///
/// Entries are only inserted or overwritten, never evicted, and live as
/// long as the owning client. Writers are serialized by the lock, so a
/// reader never observes a partially written entry.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct CharacterCache {
    entries: RwLock<HashMap<u32, Character>>,
}

impl CharacterCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the character stored under `id`.
    pub async fn get(&self, id: u32) -> Option<Character> {
        self.entries.read().await.get(&id).cloned()
    }

    /// Stores `character` under `id`, replacing any previous entry.
    pub async fn insert(&self, id: u32, character: Character) {
        self.entries.write().await.insert(id, character);
    }

    /// Number of cached characters.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
