//! imdbq - IMDb title lookup and search CLI.

/// Application configuration (TOML).
mod config;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use imdbq_api::imdb::{
    DEFAULT_LOCALE, ImdbClient, LocalImdbApi, SearchResult, SearchTitleParams, Title,
    TitleCategory,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response locale (overrides config, default: "en_US").
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Use plain HTTP for title lookups.
    #[arg(long, global = true)]
    insecure: bool,

    /// Print results as JSON on stdout, without log formatting.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Look up a title by IMDb ID.
    Lookup(LookupArgs),
    /// Search titles by name.
    Search(SearchArgs),
    /// Show or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `lookup` subcommand.
#[derive(clap::Args)]
struct LookupArgs {
    /// IMDb ID (e.g. "tt0032138").
    imdb_id: String,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title text (e.g. "The Wizard of Oz").
    title: String,

    /// Maximum number of results.
    #[arg(long)]
    limit: Option<usize>,

    /// Comma-separated categories, in output order
    /// (default: "title_popular,title_exact,title_approx,title_substring").
    #[arg(long, value_delimiter = ',')]
    types: Option<Vec<TitleCategory>>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective client settings.
    Show,
    /// Store client defaults in the config file.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// Default response locale.
    #[arg(long = "default-locale")]
    default_locale: Option<String>,

    /// Default transport for lookups.
    #[arg(long)]
    secure: Option<bool>,
}

/// Client settings after merging config file and flags.
#[derive(Debug, PartialEq, Eq)]
struct ClientSettings {
    locale: String,
    secure: bool,
}

impl ClientSettings {
    /// Flags take precedence over the config file.
    fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        let locale = cli
            .locale
            .clone()
            .or_else(|| config.client.locale.clone())
            .unwrap_or_else(|| String::from(DEFAULT_LOCALE));
        let secure = !cli.insecure && config.client.secure.unwrap_or(true);
        Self { locale, secure }
    }
}

/// Loads the config file at `config_path` and merges it with command-line flags.
///
/// # Errors
///
/// Returns an error if the config file is invalid.
fn load_settings(cli: &Cli, config_path: &Path) -> Result<ClientSettings> {
    let config = AppConfig::load(config_path).context("failed to load config")?;
    Ok(ClientSettings::resolve(cli, &config))
}

/// Builds an `ImdbClient` from the merged settings.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
fn build_imdb_client(cli: &Cli) -> Result<ImdbClient> {
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let settings = load_settings(cli, &config_path)?;
    tracing::debug!(locale = %settings.locale, secure = settings.secure, "building IMDb client");

    ImdbClient::builder()
        .locale(settings.locale)
        .secure(settings.secure)
        .build()
        .context("failed to build IMDb client")
}

/// Writes `value` to `out` as pretty-printed JSON plus a trailing newline.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).context("failed to encode JSON output")?;
    writeln!(out).context("failed to write JSON output")?;
    out.flush().context("failed to write JSON output")
}

/// Logs a title, or writes it to stdout as JSON.
fn print_title(title: &Title, json: bool) -> Result<()> {
    if json {
        return write_json(std::io::stdout().lock(), title);
    }
    tracing::info!("ID: {}", title.imdb_id());
    tracing::info!("Title: {}", title.title());
    tracing::info!("Year: {}", title.release_year().unwrap_or("-"));
    Ok(())
}

/// Logs search results, or writes them to stdout as JSON.
fn print_results(results: &[SearchResult], json: bool) -> Result<()> {
    if json {
        return write_json(std::io::stdout().lock(), results);
    }
    tracing::info!("Total results: {}", results.len());
    tracing::info!("Type\t\t\tID\t\tYear\tTitle");
    for result in results {
        tracing::info!(
            "{:<16}\t{}\t{}\t{}",
            result.kind,
            result.imdb_id,
            result.release_year.as_deref().unwrap_or("-"),
            result.title,
        );
    }
    Ok(())
}

/// Runs the `lookup` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the title is not found.
#[instrument(skip_all)]
async fn run_lookup(cli: &Cli, args: &LookupArgs) -> Result<()> {
    let client = build_imdb_client(cli)?;

    let title = client
        .look_up_id(&args.imdb_id)
        .await
        .with_context(|| format!("IMDb lookup failed for {}", args.imdb_id))?;

    print_title(&title, cli.json)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the search request fails.
#[instrument(skip_all)]
async fn run_search(cli: &Cli, args: &SearchArgs) -> Result<()> {
    let client = build_imdb_client(cli)?;

    let mut params = SearchTitleParams::new(&args.title);
    if let Some(limit) = args.limit {
        params = params.limit(limit);
    }
    if let Some(types) = &args.types {
        params = params.types(types.iter().copied());
    }

    let results = client
        .search_for_title(&params)
        .await
        .context("IMDb search request failed")?;

    print_results(&results, cli.json)
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
fn run_config_show(cli: &Cli) -> Result<()> {
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let settings = load_settings(cli, &config_path)?;

    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Locale: {}", settings.locale);
    tracing::info!("Secure: {}", settings.secure);
    Ok(())
}

/// Runs the `config set` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or written.
fn run_config_set(cli: &Cli, args: &ConfigSetArgs) -> Result<()> {
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    if let Some(locale) = &args.default_locale {
        config.client.locale = Some(locale.clone());
    }
    if let Some(secure) = args.secure {
        config.client.secure = Some(secure);
    }

    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Saved {}", config_path.display());
    Ok(())
}

/// Installs the global tracing subscriber (`RUST_LOG`, default `info`).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        fmt().with_env_filter(env_filter).with_target(false).init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        // Spans are only exported when an OTLP endpoint is configured.
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
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Lookup(args) => run_lookup(&cli, args).await,
        Commands::Search(args) => run_search(&cli, args).await,
        Commands::Config(cmd) => match &cmd.command {
            ConfigSubcommands::Show => run_config_show(&cli),
            ConfigSubcommands::Set(args) => run_config_set(&cli, args),
        },
    }
}
