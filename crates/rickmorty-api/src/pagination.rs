//! Multi-page aggregation over the listing endpoints.

use std::future::Future;

use tracing::instrument;

use super::api::LocalRickMortyApi;
use super::domain::{Character, CharacterPage, Episode, EpisodePage, PageInfo};
use super::error::ApiError;
use super::operation::ApiOperation;
use super::params::CharacterFilter;

/// Fetches page 1, then pages `2..=info.pages` in order, concatenating results.
///
/// Stops at the first failing page: later pages are not requested and the
/// whole call fails with an aggregation error naming that page. Failures are
/// only logged at debug level; callers decide whether they warrant a warning.
async fn collect_pages<P, T, F, Fut>(
    resource: &str,
    fetch_page: F,
    into_parts: fn(P) -> (PageInfo, Vec<T>),
) -> ApiOperation<Vec<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = ApiOperation<P>>,
{
    let (info, mut items) = match fetch_page(1).await {
        ApiOperation::Success(first) => into_parts(first),
        ApiOperation::Failure(error) => {
            tracing::debug!(%resource, page = 1, error = %error, "first page failed");
            return ApiOperation::Failure(ApiError::aggregation(1, error));
        }
    };

    let total_pages = info.pages;
    tracing::debug!(
        %resource,
        page = 1,
        total_pages,
        fetched = items.len(),
        "page completed"
    );

    for page in 2..=total_pages {
        match fetch_page(page).await {
            ApiOperation::Success(next) => {
                let (_, next_items) = into_parts(next);
                tracing::debug!(
                    %resource,
                    page,
                    total_pages,
                    fetched = next_items.len(),
                    "page completed"
                );
                items.extend(next_items);
            }
            ApiOperation::Failure(error) => {
                tracing::debug!(
                    %resource,
                    page,
                    total_pages,
                    error = %error,
                    "page failed, stopping pagination"
                );
                return ApiOperation::Failure(ApiError::aggregation(page, error));
            }
        }
    }

    tracing::info!(
        %resource,
        total = items.len(),
        pages = total_pages,
        "pagination completed"
    );
    ApiOperation::Success(items)
}

fn episode_parts(page: EpisodePage) -> (PageInfo, Vec<Episode>) {
    (page.info, page.episodes)
}

fn character_parts(page: CharacterPage) -> (PageInfo, Vec<Character>) {
    (page.info, page.characters)
}

/// Fetches every episode, page by page.
///
/// Fails fast: if any page fails, no further pages are requested and the
/// episodes gathered so far are discarded.
#[instrument(skip_all)]
pub async fn collect_all_episodes(
    api: &(impl LocalRickMortyApi + Sync),
) -> ApiOperation<Vec<Episode>> {
    collect_pages("episode", |page| api.fetch_episode_page(page), episode_parts)
        .await
        .on_failure(|error| tracing::warn!(error = %error, "episode listing failed"))
}

/// Fetches every character whose name matches `name`, page by page.
///
/// The API answers 404 when nothing matches; that yields an empty list.
/// Any other failure fails the whole search, as in `collect_all_episodes`.
#[instrument(skip(api))]
pub async fn collect_characters_by_name(
    api: &(impl LocalRickMortyApi + Sync),
    name: &str,
) -> ApiOperation<Vec<Character>> {
    let filter = CharacterFilter::new().name(name);
    let result = collect_pages(
        "character",
        |page| api.fetch_character_page_filtered(page, &filter),
        character_parts,
    )
    .await;

    match result {
        ApiOperation::Failure(ApiError::Aggregation { page: 1, cause })
            if cause.is_not_found() =>
        {
            tracing::info!(%name, "no characters matched");
            ApiOperation::Success(Vec::new())
        }
        other => other.on_failure(|error| {
            tracing::warn!(%name, error = %error, "character search failed");
        }),
    }
}
