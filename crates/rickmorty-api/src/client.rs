//! `RickMortyClient` - Rick and Morty API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalRickMortyApi;
use super::cache::CharacterCache;
use super::domain::{Character, CharacterPage, Episode, EpisodePage};
use super::error::ApiError;
use super::operation::ApiOperation;
use super::pagination::{collect_all_episodes, collect_characters_by_name};
use super::params::CharacterFilter;
use super::wire::{
    RemoteCharacter, RemoteCharacterPage, RemoteEpisode, RemoteEpisodePage, RemoteErrorResponse,
};

/// Default base URL for the Rick and Morty API.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Rick and Morty API client.
///
/// Every successfully fetched character is kept in an in-memory cache for
/// the lifetime of the client; later fetches of the same ID never hit the
/// network.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RickMortyClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
    /// Characters fetched so far.
    cache: CharacterCache,
}

/// Builder for `RickMortyClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RickMortyClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl RickMortyClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `rickmorty-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The base URL cannot carry a path (e.g. `mailto:`).
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<RickMortyClient> {
        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?,
        };

        if base_url.cannot_be_a_base() {
            anyhow::bail!("base URL cannot be a base: {base_url}");
        }
        // `Url::join` drops the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(RickMortyClient {
            http_client,
            base_url,
            cache: CharacterCache::new(),
        })
    }
}

impl RickMortyClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> RickMortyClientBuilder {
        RickMortyClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Number of characters currently cached.
    pub async fn cached_characters(&self) -> usize {
        self.cache.len().await
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// Non-2xx answers become `ApiError::Status` carrying the API's
    /// `{"error": ...}` text when present.
    #[instrument(skip(self, query))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::transport(format!("failed to join URL path {path}: {e}")))?;

        let mut builder = self.http_client.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build request {path}: {e}")))?;

        tracing::debug!(url = %request.url(), "Rick and Morty API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(format!("{path}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read response body {path}: {e}")))?;

        tracing::debug!(%status, body_len = body.len(), "Response body received");

        if !status.is_success() {
            let message = serde_json::from_str::<RemoteErrorResponse>(&body)
                .map_or(body, |error_response| error_response.error);
            let message = if message.trim().is_empty() {
                String::from(status.canonical_reason().unwrap_or("no response body"))
            } else {
                message
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::decode(format!("{path}: {e}")))
    }

    /// Converts a call result into an `ApiOperation`, logging failures.
    ///
    /// 404 is an expected answer (unknown ID, filter without matches) and is
    /// logged at debug level only.
    fn finish<T>(operation: &str, result: Result<T, ApiError>) -> ApiOperation<T> {
        match result {
            Err(ref error) if error.is_not_found() => {
                tracing::debug!(
                    %operation,
                    error = %error,
                    "Rick and Morty API answered not found"
                );
            }
            Err(ref error) => {
                tracing::warn!(%operation, error = %error, "Rick and Morty API call failed");
            }
            Ok(_) => {}
        }
        ApiOperation::from(result)
    }

    /// Fetches a listing page with the given query.
    async fn get_character_page(
        &self,
        query: &[(&str, String)],
    ) -> Result<CharacterPage, ApiError> {
        // The character listing is addressed with a trailing slash.
        self.get_json::<RemoteCharacterPage>("character/", query)
            .await
            .and_then(CharacterPage::try_from)
    }
}

/// Reorders `episodes` to follow the order of `ids`.
///
/// Episodes whose ID is not in `ids` keep their relative order at the end.
fn order_by_ids(mut episodes: Vec<Episode>, ids: &[u32]) -> Vec<Episode> {
    episodes.sort_by_key(|episode| {
        ids.iter()
            .position(|&id| id == episode.id)
            .unwrap_or(usize::MAX)
    });
    episodes
}

impl LocalRickMortyApi for RickMortyClient {
    // Concurrent misses for the same ID are not coalesced: each one requests
    // the character and the later insert overwrites the earlier, equal entry.
    #[instrument(skip(self))]
    async fn fetch_character(&self, id: u32) -> ApiOperation<Character> {
        if let Some(character) = self.cache.get(id).await {
            tracing::debug!(id, "character served from cache");
            return ApiOperation::Success(character);
        }

        let path = format!("character/{id}");
        let result = self
            .get_json::<RemoteCharacter>(&path, &[])
            .await
            .and_then(Character::try_from);

        if let Ok(ref character) = result {
            self.cache.insert(id, character.clone()).await;
        }

        Self::finish("fetch_character", result)
    }

    #[instrument(skip(self))]
    async fn fetch_episode(&self, id: u32) -> ApiOperation<Episode> {
        let path = format!("episode/{id}");
        let result = self
            .get_json::<RemoteEpisode>(&path, &[])
            .await
            .and_then(Episode::try_from);
        Self::finish("fetch_episode", result)
    }

    #[instrument(skip(self))]
    async fn fetch_episodes(&self, ids: &[u32]) -> ApiOperation<Vec<Episode>> {
        match ids {
            [] => ApiOperation::Success(Vec::new()),
            // A single ID answers with a bare object, not an array.
            [id] => self
                .fetch_episode(*id)
                .await
                .map_success(|episode| vec![episode]),
            _ => {
                let joined = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let path = format!("episode/{joined}");
                let result = self
                    .get_json::<Vec<RemoteEpisode>>(&path, &[])
                    .await
                    .and_then(|remote| {
                        remote
                            .into_iter()
                            .map(Episode::try_from)
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .map(|episodes| order_by_ids(episodes, ids));
                Self::finish("fetch_episodes", result)
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_character_page(&self, page: u32) -> ApiOperation<CharacterPage> {
        let result = self.get_character_page(&[("page", page.to_string())]).await;
        Self::finish("fetch_character_page", result)
    }

    #[instrument(skip(self))]
    async fn fetch_character_page_filtered(
        &self,
        page: u32,
        filter: &CharacterFilter,
    ) -> ApiOperation<CharacterPage> {
        let mut query: Vec<(&str, String)> = vec![("page", page.to_string())];
        query.extend(filter.to_query());
        let result = self.get_character_page(&query).await;
        Self::finish("fetch_character_page_filtered", result)
    }

    #[instrument(skip(self))]
    async fn fetch_episode_page(&self, page: u32) -> ApiOperation<EpisodePage> {
        // Unlike the character listing, the episode listing has no trailing slash.
        let query = [("page", page.to_string())];
        let result = self
            .get_json::<RemoteEpisodePage>("episode", &query)
            .await
            .and_then(EpisodePage::try_from);
        Self::finish("fetch_episode_page", result)
    }

    #[instrument(skip_all)]
    async fn fetch_all_episodes(&self) -> ApiOperation<Vec<Episode>> {
        collect_all_episodes(self).await
    }

    #[instrument(skip(self))]
    async fn search_all_characters_by_name(&self, name: &str) -> ApiOperation<Vec<Character>> {
        collect_characters_by_name(self, name).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use serde_json::{Value, json};
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(mock_server: &MockServer) -> RickMortyClient {
        let base_url = format!("{}/api/", mock_server.uri());
        RickMortyClient::builder()
            .base_url(base_url.parse().unwrap())
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    fn episode_json(id: u32, code: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Episode {id}"),
            "air_date": "December 2, 2013",
            "episode": code,
            "characters": ["https://rickandmortyapi.com/api/character/1"],
            "url": format!("https://rickandmortyapi.com/api/episode/{id}"),
            "created": "2017-11-10T12:56:33.798Z"
        })
    }

    fn episode_page_json(pages: u32, episodes: &[Value]) -> Value {
        json!({
            "info": {"count": 5, "pages": pages, "next": null, "prev": null},
            "results": episodes
        })
    }

    async fn mount_episode_page(mock_server: &MockServer, page: u32, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/episode"))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .expect(1)
            .mount(mock_server)
            .await;
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = RickMortyClient::builder().build().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_appends_trailing_slash() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/api").unwrap();

        // Act
        let client = RickMortyClient::builder()
            .base_url(custom_url)
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_builder_rejects_non_base_url() {
        // Arrange
        let custom_url = Url::parse("mailto:rick@citadel.example").unwrap();

        // Act
        let result = RickMortyClient::builder().base_url(custom_url).build();

        // Assert
        assert!(result.unwrap_err().to_string().contains("cannot be a base"));
    }

    #[test]
    fn test_order_by_ids() {
        // Arrange
        let json = include_str!("../../../fixtures/rickmorty/episodes_1_2.json");
        let remote: Vec<RemoteEpisode> = serde_json::from_str(json).unwrap();
        let episodes: Vec<Episode> = remote
            .into_iter()
            .map(|r| Episode::try_from(r).unwrap())
            .collect();

        // Act
        let ordered = order_by_ids(episodes, &[2, 1]);

        // Assert
        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].id, 1);
    }

    #[test]
    fn test_finish_logs_not_found_at_debug() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::DEBUG))
            .only()
            .run_with_handle();

        // Act
        let operation = with_default(subscriber, || {
            RickMortyClient::finish::<()>(
                "fetch_character_page_filtered",
                Err(ApiError::Status {
                    status: 404,
                    message: String::from("There is nothing here"),
                }),
            )
        });

        // Assert
        assert!(operation.failure().unwrap().is_not_found());
        handle.assert_finished();
    }

    #[test]
    fn test_finish_logs_server_error_as_warning() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        let operation = with_default(subscriber, || {
            RickMortyClient::finish::<()>(
                "fetch_episode",
                Err(ApiError::Status {
                    status: 500,
                    message: String::from("Internal Server Error"),
                }),
            )
        });

        // Assert
        assert!(operation.is_failure());
        handle.assert_finished();
    }

    #[tokio::test]
    async fn test_fetch_character_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_character(1).await;

        // Assert
        let character = result.into_result().unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.episode_ids, vec![1, 2, 3, 28]);
    }

    #[tokio::test]
    async fn test_fetch_character_twice_hits_network_once() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let first = client.fetch_character(1).await;
        let second = client.fetch_character(1).await;

        // Assert (mock expect(1) verifies a single request)
        assert!(first.is_success());
        assert_eq!(first, second);
        assert_eq!(client.cached_characters().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_for_same_id_leave_one_entry() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1..=2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let (first, second) = tokio::join!(client.fetch_character(1), client.fetch_character(1));
        let third = client.fetch_character(1).await;

        // Assert
        assert!(first.is_success());
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(client.cached_characters().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_character_not_found() {
        // Arrange
        let mock_server = MockServer::start().await;
        let error_body = include_str!("../../../fixtures/rickmorty/error_not_found.json");

        Mock::given(method("GET"))
            .and(path("/api/character/9999"))
            .respond_with(ResponseTemplate::new(404).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_character(9999).await;

        // Assert
        let err = result.failure().unwrap();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Character not found"));
        assert_eq!(client.cached_characters().await, 0);
    }

    #[tokio::test]
    async fn test_failed_character_fetch_is_not_cached() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let first = client.fetch_character(1).await;
        let second = client.fetch_character(1).await;

        // Assert
        let err = first.failure().unwrap();
        assert!(err.to_string().contains("HTTP 500"));
        assert!(second.is_success());
    }

    #[tokio::test]
    async fn test_fetch_character_malformed_json_is_decode_failure() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": "one"}"#))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_character(1).await;

        // Assert
        assert!(matches!(
            result,
            ApiOperation::Failure(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // Arrange: nothing listens on port 1
        let client = RickMortyClient::builder()
            .base_url(Url::parse("http://127.0.0.1:1/api/").unwrap())
            .build()
            .unwrap();

        // Act
        let result = client.fetch_episode(1).await;

        // Assert
        let err = result.failure().unwrap();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_episode_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/episode_28.json");

        Mock::given(method("GET"))
            .and(path("/api/episode/28"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let episode = client.fetch_episode(28).await.into_result().unwrap();

        // Assert
        assert_eq!(episode.name, "The Ricklantis Mixup");
        assert_eq!(episode.season_number, 3);
    }

    #[tokio::test]
    async fn test_fetch_episodes_single_id_uses_single_endpoint() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/episode/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(episode_json(7, "S01E07")))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let batch = client.fetch_episodes(&[7]).await;
        let single = client.fetch_episode(7).await;

        // Assert
        let episodes = batch.into_result().unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id, 7);
        assert_eq!(single.map_success(|e| vec![e]).into_result().unwrap(), episodes);
    }

    #[tokio::test]
    async fn test_fetch_episodes_preserves_input_order() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/episodes_1_2.json");

        Mock::given(method("GET"))
            .and(path("/api/episode/2,1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let episodes = client.fetch_episodes(&[2, 1]).await.into_result().unwrap();

        // Assert
        let ids: Vec<u32> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(episodes[1].name, "Pilot");
    }

    #[tokio::test]
    async fn test_fetch_episodes_batch_failure_fails_whole_call() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/episode/1,2,3"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_episodes(&[1, 2, 3]).await;

        // Assert
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_fetch_episodes_empty_sends_no_request() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_episodes(&[]).await;

        // Assert
        assert_eq!(result, ApiOperation::Success(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_character_page_uses_trailing_slash() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_page_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let page = client.fetch_character_page(1).await.into_result().unwrap();

        // Assert
        assert_eq!(page.info.pages, 42);
        assert_eq!(page.characters.len(), 2);
        // Listing pages do not populate the cache.
        assert_eq!(client.cached_characters().await, 0);
    }

    #[tokio::test]
    async fn test_fetch_character_page_filtered_sends_filters() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/character_page_1.json");

        Mock::given(method("GET"))
            .and(path("/api/character/"))
            .and(query_param("page", "2"))
            .and(query_param("name", "rick"))
            .and(query_param("status", "alive"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let filter = CharacterFilter::new().name("rick").status("alive");

        // Act
        let result = client.fetch_character_page_filtered(2, &filter).await;

        // Assert
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_fetch_episode_page_uses_query_parameter() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/rickmorty/episode_page_2.json");

        Mock::given(method("GET"))
            .and(path("/api/episode"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let page = client.fetch_episode_page(2).await.into_result().unwrap();

        // Assert
        assert_eq!(page.info.prev, Some(1));
        assert_eq!(page.episodes[0].id, 21);
    }

    #[tokio::test]
    async fn test_fetch_all_episodes_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let pages = [
            episode_page_json(3, &[episode_json(1, "S01E01"), episode_json(2, "S01E02")]),
            episode_page_json(3, &[episode_json(3, "S01E03"), episode_json(4, "S01E04")]),
            episode_page_json(3, &[episode_json(5, "S01E05")]),
        ];
        for (page, body) in (1_u32..).zip(pages) {
            mount_episode_page(
                &mock_server,
                page,
                ResponseTemplate::new(200).set_body_json(body),
            )
            .await;
        }

        let client = client_for(&mock_server).await;

        // Act
        let episodes = client.fetch_all_episodes().await.into_result().unwrap();

        // Assert
        let ids: Vec<u32> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_fetch_all_episodes_fails_on_last_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        mount_episode_page(
            &mock_server,
            1,
            ResponseTemplate::new(200).set_body_json(episode_page_json(
                3,
                &[episode_json(1, "S01E01"), episode_json(2, "S01E02")],
            )),
        )
        .await;
        mount_episode_page(
            &mock_server,
            2,
            ResponseTemplate::new(200).set_body_json(episode_page_json(
                3,
                &[episode_json(3, "S01E03"), episode_json(4, "S01E04")],
            )),
        )
        .await;
        mount_episode_page(&mock_server, 3, ResponseTemplate::new(503)).await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.fetch_all_episodes().await;

        // Assert
        let err = result.failure().unwrap();
        assert!(matches!(err, ApiError::Aggregation { page: 3, .. }));
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_search_all_characters_no_match() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/character/"))
            .and(query_param("name", "zzz"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "There is nothing here"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        // Act
        let result = client.search_all_characters_by_name("zzz").await;

        // Assert
        assert_eq!(result, ApiOperation::Success(vec![]));
    }
}
