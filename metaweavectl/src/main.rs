//! `metaweavectl`: search, look up and migrate catalog records from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use metaweave_config::ConfigLoader;
use metaweave_core::{Catalog, MediaType, SearchQuery, decode_canonical_id};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "metaweavectl", about = "Query the metaweave catalog layer")]
struct Cli {
    /// Path to metaweave.toml (defaults to METAWEAVE_CONFIG or ./metaweave.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// .env file to seed the environment from
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the primary catalog
    Search {
        query: String,
        #[arg(long = "type", value_enum, default_value = "movie")]
        media_type: MediaArg,
    },
    /// Fetch a title by canonical id (tmdb-movie-603)
    Get {
        id: String,
        #[arg(long)]
        season: Option<String>,
    },
    /// Fetch a title from the legacy catalog
    Legacy {
        #[arg(value_enum)]
        media_type: MediaArg,
        id: String,
        #[arg(long)]
        season: Option<String>,
    },
    /// Rewrite a legacy /media/JW... route to its canonical form
    Migrate { url: String },
    /// Decode a canonical id without any network access
    Decode { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum MediaArg {
    Movie,
    #[value(alias = "show", alias = "tv")]
    Series,
}

impl From<MediaArg> for MediaType {
    fn from(val: MediaArg) -> Self {
        match val {
            MediaArg::Movie => MediaType::Movie,
            MediaArg::Series => MediaType::Series,
        }
    }
}

#[derive(Serialize)]
struct Migration<'a> {
    from: &'a str,
    to: Option<String>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }

    let load = loader.load().context("failed to load configuration")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!("{} ({})", warning.message, hint),
            None => warn!("{}", warning.message),
        }
    }

    Catalog::from_config(&load.config).context("failed to build HTTP client")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metaweave=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Search { query, media_type } => {
            let catalog = load_catalog(&cli)?;
            let results = catalog
                .search(&SearchQuery::new(query.as_str(), (*media_type).into()))
                .await?;
            print_json(&results)
        }
        Command::Get { id, season } => {
            let catalog = load_catalog(&cli)?;
            match catalog.get_by_canonical_id(id, season.as_deref()).await? {
                Some(detail) => print_json(&detail),
                None => bail!("no title found for {id}"),
            }
        }
        Command::Legacy {
            media_type,
            id,
            season,
        } => {
            let catalog = load_catalog(&cli)?;
            let media_type = MediaType::from(*media_type);
            match catalog
                .get_legacy_by_id(media_type, id, season.as_deref())
                .await?
            {
                Some(detail) => print_json(&detail),
                None => bail!("no legacy {} found for {id}", media_type.tag()),
            }
        }
        Command::Migrate { url } => {
            let catalog = load_catalog(&cli)?;
            let to = catalog.migrate_legacy_route(url).await?;
            print_json(&Migration { from: url, to })
        }
        Command::Decode { id } => print_json(&decode_canonical_id(id)?),
    }
}
