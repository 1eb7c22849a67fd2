use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, MediaType, Record, persist};
use pipeline::{RecommendationEngine, RecommendationQuery, Recommendations, sample};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sources::{
    CascadeOutcome, Endpoint, GoogleBooksSource, RemoteConfig, RemoteQuery,
    RemoteRecord, SkipReason, SourceCascade, StaticCatalogSource, TmdbSource,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Recommender - movie and book suggestions by genre, year and month
#[derive(Parser)]
#[command(name = "recommender")]
#[command(about = "Random movie and book picks from synthetic or live catalogs", long_about = None)]
struct Cli {
    /// Directory holding synthetic_movies.json and synthetic_books.json
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both synthetic stores
    Generate {
        /// Where to write the store files (defaults to --data-dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Seed for ratings and lengths
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the genres of a store
    Genres {
        /// movies or books
        #[arg(long)]
        media: MediaType,
    },

    /// Pick random records from a synthetic store
    Recommend {
        /// movies or books
        #[arg(long)]
        media: MediaType,

        #[arg(long)]
        genre: String,

        /// First year, inclusive
        #[arg(long, default_value_t = data_loader::START_YEAR)]
        from: u16,

        /// Last year, inclusive
        #[arg(long, default_value_t = data_loader::END_YEAR)]
        to: u16,

        /// Release month 1-12; any month when omitted
        #[arg(long)]
        month: Option<u8>,

        /// Number of picks
        #[arg(long, default_value_t = pipeline::DEFAULT_COUNT)]
        count: usize,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Ask TMDB / Google Books, falling back to the built-in titles
    Live {
        /// movies or books
        #[arg(long)]
        media: MediaType,

        /// Genre (movies) or subject (books)
        #[arg(long)]
        genre: String,

        #[arg(long)]
        year: u16,

        /// Number of picks
        #[arg(long, default_value_t = pipeline::DEFAULT_COUNT)]
        count: usize,

        /// Result pages per source (default: 3 for movies, 1 for books)
        #[arg(long)]
        pages: Option<u32>,

        /// Proxy that holds the API keys
        #[arg(long)]
        proxy_url: Option<String>,

        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        tmdb_api_key: Option<String>,

        #[arg(long, env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
        google_books_api_key: Option<String>,

        /// Skip the network and use the built-in titles only
        #[arg(long)]
        offline: bool,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // API keys may come from a .env file
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { out_dir, seed } => {
            handle_generate(out_dir.unwrap_or(cli.data_dir), seed)?
        }
        Commands::Genres { media } => handle_genres(&cli.data_dir, media)?,
        Commands::Recommend {
            media,
            genre,
            from,
            to,
            month,
            count,
            seed,
        } => {
            let query = RecommendationQuery::new(media, genre)
                .years(from, to)
                .month(month)
                .count(count);
            handle_recommend(&cli.data_dir, &query, seed)?
        }
        Commands::Live {
            media,
            genre,
            year,
            count,
            pages,
            proxy_url,
            tmdb_api_key,
            google_books_api_key,
            offline,
            seed,
        } => {
            let cascade = if offline {
                SourceCascade::new().add_source(StaticCatalogSource::new())
            } else {
                let api_key = match media {
                    MediaType::Movie => tmdb_api_key,
                    MediaType::Book => google_books_api_key,
                };
                build_cascade(media, api_key, proxy_url)?
            };
            let query = RemoteQuery::new(media, genre, year);
            let pages = pages.unwrap_or(match media {
                MediaType::Movie => 3,
                MediaType::Book => 1,
            });
            handle_live(&cascade, &query, pages, count, seed).await?
        }
    }

    Ok(())
}

/// Handle the 'generate' command
fn handle_generate(out_dir: PathBuf, seed: Option<u64>) -> Result<()> {
    println!("Generating synthetic stores into {}...", out_dir.display());
    let start = Instant::now();
    let paths = persist::write_dataset(&out_dir, seed)
        .with_context(|| format!("Failed to write dataset to {}", out_dir.display()))?;

    for path in &paths {
        println!("{} {}", "✓".green(), path.display());
    }
    println!("Done in {:?}", start.elapsed());
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(data_dir: &Path, media: MediaType) -> Result<()> {
    let engine = open_engine(data_dir);
    let genres = engine
        .genres(media)
        .with_context(|| {
            format!(
                "Failed to load the {media} store from {}",
                engine.catalog().data_dir().display()
            )
        })?;

    println!("{}", format!("Genres in {media}:").bold().blue());
    for genre in genres {
        println!("  - {genre}");
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    data_dir: &Path,
    query: &RecommendationQuery,
    seed: Option<u64>,
) -> Result<()> {
    let engine = open_engine(data_dir);
    let recs = match seed {
        Some(seed) => engine.recommend_with_rng(query, &mut StdRng::seed_from_u64(seed)),
        None => engine.recommend(query),
    }
    .with_context(|| format!("No recommendations for {} / {}", query.media, query.genre))?;

    print_recommendations(query, &recs);
    Ok(())
}

/// Handle the 'live' command
async fn handle_live(
    cascade: &SourceCascade,
    query: &RemoteQuery,
    pages: u32,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let outcome = cascade
        .fetch(query, pages)
        .await
        .with_context(|| format!("Every source failed for {} / {}", query.media, query.subject))?;

    print_skipped(&outcome);

    let Some(served_by) = outcome.served_by.as_deref() else {
        println!(
            "{}",
            format!("No {} found for {} in {}.", query.media, query.subject, query.year).yellow()
        );
        return Ok(());
    };

    let picks = match query.media {
        // movie results are shuffled, book results keep relevance order
        MediaType::Movie => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            sample(&outcome.records, count, &mut rng)
        }
        MediaType::Book => outcome.records.iter().take(count).cloned().collect(),
    };

    println!(
        "{}",
        format!(
            "{} {} for {} (around {}) via {}:",
            picks.len(),
            query.media,
            query.subject,
            query.year,
            served_by
        )
        .bold()
        .blue()
    );
    for (rank, record) in picks.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), format_remote(record));
    }
    Ok(())
}

/// Strategies in order: direct API, proxy, built-in titles.
///
/// TMDB needs a key for direct access; Google Books answers without one.
fn build_cascade(
    media: MediaType,
    api_key: Option<String>,
    proxy_url: Option<String>,
) -> Result<SourceCascade> {
    let config = RemoteConfig::default();
    let mut cascade = SourceCascade::new();

    let direct_url = match media {
        MediaType::Movie if api_key.is_none() => None,
        MediaType::Movie => Some(config.tmdb_url.clone()),
        MediaType::Book => Some(config.google_books_url.clone()),
    };
    let endpoints = direct_url
        .map(|base_url| Endpoint::Direct { base_url, api_key })
        .into_iter()
        .chain(proxy_url.map(|base_url| Endpoint::Proxy { base_url }));

    for endpoint in endpoints {
        cascade = match media {
            MediaType::Movie => cascade.add_source(
                TmdbSource::from_config(&config, endpoint)
                    .context("Failed to build the TMDB client")?,
            ),
            MediaType::Book => cascade.add_source(
                GoogleBooksSource::from_config(&config, endpoint)
                    .context("Failed to build the Google Books client")?,
            ),
        };
    }

    if cascade.is_empty() {
        tracing::info!("No remote source configured; using built-in titles");
    }
    Ok(cascade.add_source(StaticCatalogSource::new()))
}

fn open_engine(data_dir: &Path) -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(Catalog::new(data_dir)))
}

fn print_recommendations(query: &RecommendationQuery, recs: &Recommendations) {
    if recs.is_relaxed() {
        println!(
            "{}",
            format!(
                "⚠ No {} in {} match {}-{}{}; showing picks from the whole genre.",
                query.media,
                query.genre,
                query.year_from,
                query.year_to,
                query
                    .month
                    .map(|m| format!(" month {m}"))
                    .unwrap_or_default()
            )
            .yellow()
        );
    }

    println!(
        "{}",
        format!(
            "{} {} picks for {} ({} candidates):",
            recs.records.len(),
            query.media,
            query.genre,
            recs.pool_size
        )
        .bold()
        .blue()
    );
    for (rank, record) in recs.records.iter().enumerate() {
        println!(
            "{}. {}",
            (rank + 1).to_string().green(),
            format_record(record, query.media)
        );
    }
}

fn print_skipped(outcome: &CascadeOutcome) {
    for skipped in &outcome.skipped {
        match &skipped.reason {
            SkipReason::Empty => println!("{} {} had no results", "•".cyan(), skipped.source),
            SkipReason::Failed(reason) => println!(
                "{} {} unavailable: {}",
                "⚠".yellow(),
                skipped.source,
                reason
            ),
        }
    }
}

/// `title (YYYY/MM) • ⭐ rating • length unit`
fn format_record(record: &Record, media: MediaType) -> String {
    format!(
        "{} ({}/{:02}) • ⭐ {:.1} • {} {}",
        record.title.bold(),
        record.year,
        record.month,
        record.rating,
        record.meta.length,
        media.length_unit()
    )
}

fn format_remote(record: &RemoteRecord) -> String {
    let year = record
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    match record.rating {
        Some(rating) => format!("{} ({}) • ⭐ {:.1}", record.title.bold(), year, rating),
        None => format!("{} ({})", record.title.bold(), year),
    }
}
