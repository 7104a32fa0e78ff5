//! Request parameter types.

/// Filters for the `character/` listing endpoint.
///
/// Empty filters request the unfiltered listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilter {
    /// Name substring (case-insensitive on the server).
    pub name: Option<String>,
    /// Status: `alive`, `dead` or `unknown`.
    pub status: Option<String>,
    /// Species.
    pub species: Option<String>,
    /// Subspecies / variant (`type` parameter).
    pub kind: Option<String>,
    /// Gender: `female`, `male`, `genderless` or `unknown`.
    pub gender: Option<String>,
}

impl CharacterFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by species.
    #[must_use]
    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Filters by type.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Filters by gender.
    #[must_use]
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Builds the query pairs for the set filters, in a fixed order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("status", &self.status),
            ("species", &self.species),
            ("type", &self.kind),
            ("gender", &self.gender),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}
