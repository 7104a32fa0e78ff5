//! API client library for the Rick and Morty catalog API.
//!
//! Fetches characters and episodes over HTTP, maps the wire format into
//! domain types and reports every outcome as an [`ApiOperation`].

/// `RickMortyApi` trait definition.
pub mod api;

/// Character cache.
pub mod cache;

/// HTTP client.
pub mod client;

/// Domain types.
pub mod domain;

/// Failure kinds.
pub mod error;

/// Wire to domain conversion.
pub mod mapping;

/// Two-state operation result.
pub mod operation;

/// Multi-page aggregation.
pub mod pagination;

/// Request parameters.
pub mod params;

/// JSON wire types.
pub mod wire;

pub use api::{LocalRickMortyApi, RickMortyApi};
pub use client::{DEFAULT_BASE_URL, RickMortyClient, RickMortyClientBuilder};
pub use domain::{
    Character, CharacterGender, CharacterPage, CharacterStatus, Episode, EpisodePage, Location,
    PageInfo, group_by_season,
};
pub use error::ApiError;
pub use operation::ApiOperation;
pub use params::CharacterFilter;
