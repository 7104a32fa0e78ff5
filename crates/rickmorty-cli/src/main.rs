//! rickmorty - Rick and Morty catalog CLI.

/// Application configuration (TOML).
mod config;
/// Log-line rendering of API results.
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use rickmorty_api::{CharacterFilter, LocalRickMortyApi, RickMortyClient, group_by_season};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the API base URL (e.g. "http://localhost:8080/api/").
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show one character.
    Character(CharacterArgs),
    /// Show the episodes a character appears in, grouped by season.
    CharacterEpisodes(CharacterArgs),
    /// List one page of characters.
    Characters(CharactersArgs),
    /// Find every character whose name matches.
    Search(SearchArgs),
    /// Show one episode.
    Episode(EpisodeArgs),
    /// Show several episodes in one request.
    Episodes(EpisodesArgs),
    /// List one page of episodes.
    EpisodePage(EpisodePageArgs),
    /// List every episode.
    AllEpisodes(AllEpisodesArgs),
}

/// Arguments for the `character` and `character-episodes` subcommands.
#[derive(clap::Args)]
struct CharacterArgs {
    /// Character ID.
    #[arg(long, required = true)]
    id: u32,
}

/// Arguments for the `characters` subcommand.
#[derive(clap::Args)]
struct CharactersArgs {
    /// Page number (default: 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Filter by name.
    #[arg(long)]
    name: Option<String>,
    /// Filter by status ("alive", "dead" or "unknown").
    #[arg(long)]
    status: Option<String>,
    /// Filter by species.
    #[arg(long)]
    species: Option<String>,
    /// Filter by type.
    #[arg(long = "type")]
    kind: Option<String>,
    /// Filter by gender ("female", "male", "genderless" or "unknown").
    #[arg(long)]
    gender: Option<String>,
}

impl CharactersArgs {
    /// Builds the listing filter from the set flags.
    fn filter(&self) -> CharacterFilter {
        CharacterFilter {
            name: self.name.clone(),
            status: self.status.clone(),
            species: self.species.clone(),
            kind: self.kind.clone(),
            gender: self.gender.clone(),
        }
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Name to search for (e.g. "rick").
    #[arg(long, required = true)]
    name: String,
}

/// Arguments for the `episode` subcommand.
#[derive(clap::Args)]
struct EpisodeArgs {
    /// Episode ID.
    #[arg(long, required = true)]
    id: u32,
}

/// Arguments for the `episodes` subcommand.
#[derive(clap::Args)]
struct EpisodesArgs {
    /// Comma-separated episode IDs (e.g. "1,2,28").
    #[arg(long, required = true, value_delimiter = ',')]
    ids: Vec<u32>,
    /// Group the output by season.
    #[arg(long)]
    by_season: bool,
}

/// Arguments for the `episode-page` subcommand.
#[derive(clap::Args)]
struct EpisodePageArgs {
    /// Page number (default: 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `all-episodes` subcommand.
#[derive(clap::Args)]
struct AllEpisodesArgs {
    /// Group the output by season.
    #[arg(long)]
    by_season: bool,
}

/// User-Agent sent when the config does not override it.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a `RickMortyClient` from config and command-line overrides.
///
/// `--base-url` wins over `[api].base_url` in the config file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a configured URL is
/// invalid or the client fails to build.
#[instrument(skip_all)]
fn build_client(dir: Option<&PathBuf>, base_url: Option<&Url>) -> Result<RickMortyClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;

    let user_agent = config
        .api
        .user_agent
        .unwrap_or_else(|| String::from(USER_AGENT));
    let mut builder = RickMortyClient::builder().user_agent(user_agent);

    if let Some(url) = base_url {
        builder = builder.base_url(url.clone());
    } else if let Some(raw) = config.api.base_url.as_deref() {
        let url = Url::parse(raw).with_context(|| {
            format!("invalid api.base_url in {}: {raw}", config_path.display())
        })?;
        builder = builder.base_url(url);
    }

    let client = builder.build().context("failed to build Rick and Morty API client")?;
    tracing::debug!(base_url = %client.base_url(), "client ready");
    Ok(client)
}

/// Runs the `character` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_character(client: &RickMortyClient, args: &CharacterArgs) -> Result<()> {
    let character = client
        .fetch_character(args.id)
        .await
        .into_result()
        .context("character request failed")?;

    output::log_character(&character);
    Ok(())
}

/// Runs the `character-episodes` subcommand.
///
/// The character's episode list feeds one batch episode request.
///
/// # Errors
///
/// Returns an error if either request fails.
#[instrument(skip_all)]
async fn run_character_episodes(client: &RickMortyClient, args: &CharacterArgs) -> Result<()> {
    let character = client
        .fetch_character(args.id)
        .await
        .into_result()
        .context("character request failed")?;

    let episodes = client
        .fetch_episodes(&character.episode_ids)
        .await
        .into_result()
        .with_context(|| format!("episodes request for character {} failed", character.id))?;

    tracing::info!("{} appears in {} episodes", character.name, episodes.len());
    output::log_seasons(&group_by_season(&episodes));
    Ok(())
}

/// Runs the `characters` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_characters(client: &RickMortyClient, args: &CharactersArgs) -> Result<()> {
    let filter = args.filter();
    let operation = if filter.to_query().is_empty() {
        client.fetch_character_page(args.page).await
    } else {
        client.fetch_character_page_filtered(args.page, &filter).await
    };
    let page = operation
        .into_result()
        .context("character page request failed")?;

    output::log_page_info(args.page, &page.info);
    output::log_character_table(&page.characters);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if any page of the search fails.
#[instrument(skip_all)]
async fn run_search(client: &RickMortyClient, args: &SearchArgs) -> Result<()> {
    let characters = client
        .search_all_characters_by_name(&args.name)
        .await
        .into_result()
        .context("character search failed")?;

    tracing::info!("Total results: {}", characters.len());
    output::log_character_table(&characters);
    Ok(())
}

/// Runs the `episode` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_episode(client: &RickMortyClient, args: &EpisodeArgs) -> Result<()> {
    let episode = client
        .fetch_episode(args.id)
        .await
        .into_result()
        .context("episode request failed")?;

    output::log_episode(&episode);
    Ok(())
}

/// Runs the `episodes` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_episodes(client: &RickMortyClient, args: &EpisodesArgs) -> Result<()> {
    let episodes = client
        .fetch_episodes(&args.ids)
        .await
        .on_success(|episodes| tracing::debug!(count = episodes.len(), "episodes fetched"))
        .into_result()
        .context("episodes request failed")?;

    if args.by_season {
        output::log_seasons(&group_by_season(&episodes));
    } else {
        output::log_episodes(&episodes);
    }
    Ok(())
}

/// Runs the `episode-page` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_episode_page(client: &RickMortyClient, args: &EpisodePageArgs) -> Result<()> {
    let page = client
        .fetch_episode_page(args.page)
        .await
        .into_result()
        .context("episode page request failed")?;

    output::log_page_info(args.page, &page.info);
    output::log_episodes(&page.episodes);
    Ok(())
}

/// Runs the `all-episodes` subcommand.
///
/// # Errors
///
/// Returns an error if any page fails.
#[instrument(skip_all)]
async fn run_all_episodes(client: &RickMortyClient, args: &AllEpisodesArgs) -> Result<()> {
    let episodes = client
        .fetch_all_episodes()
        .await
        .into_result()
        .context("episode listing failed")?;

    tracing::info!("Total episodes: {}", episodes.len());
    if args.by_season {
        output::log_seasons(&group_by_season(&episodes));
    } else {
        output::log_episodes(&episodes);
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let client = build_client(cli.dir.as_ref(), cli.base_url.as_ref())?;
    match cli.command {
        Commands::Character(args) => run_character(&client, &args).await,
        Commands::CharacterEpisodes(args) => run_character_episodes(&client, &args).await,
        Commands::Characters(args) => run_characters(&client, &args).await,
        Commands::Search(args) => run_search(&client, &args).await,
        Commands::Episode(args) => run_episode(&client, &args).await,
        Commands::Episodes(args) => run_episodes(&client, &args).await,
        Commands::EpisodePage(args) => run_episode_page(&client, &args).await,
        Commands::AllEpisodes(args) => run_all_episodes(&client, &args).await,
    }
}
