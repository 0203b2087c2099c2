use anyhow::{anyhow, Context, Result};
use catalog::{Anime, AnimeId, CatalogIndex, CatalogStore};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::filters::is_quality_candidate;
use pipeline::{Component, WEIGHTS};
use recommender::{RecommendError, RecommendationRanker, Recommendations};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Maximum rows printed by `search`
const SEARCH_RESULTS: usize = 20;

/// AnimeRecs - Content-based anime recommendation engine
#[derive(Parser)]
#[command(name = "anime-recs")]
#[command(about = "Anime recommendations by content similarity", long_about = None)]
struct Cli {
    /// Path to the catalog snapshot (JSON)
    #[arg(short, long, env = "ANIME_CATALOG", default_value = "data/anime.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend anime similar to a given one
    Recommend {
        /// Catalog id of the anime to start from
        #[arg(long)]
        anime_id: AnimeId,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: NonZeroUsize,

        /// Show the per-component similarity breakdown
        #[arg(long)]
        explain: bool,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one catalog entry
    Show {
        /// Catalog id of the anime to display
        #[arg(long)]
        anime_id: AnimeId,
    },

    /// Search for anime by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test ranking latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Recommendations per request
        #[arg(long, default_value = "10")]
        limit: NonZeroUsize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let catalog = Arc::new(
        CatalogIndex::load_from_file(&cli.catalog)
            .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?,
    );
    debug!("Catalog ready in {:?}", start.elapsed());

    match cli.command {
        Commands::Recommend {
            anime_id,
            limit,
            explain,
            json,
        } => handle_recommend(catalog, anime_id, limit, explain, json)?,
        Commands::Show { anime_id } => handle_show(&catalog, anime_id)?,
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Benchmark {
            requests,
            concurrent,
            limit,
        } => handle_benchmark(catalog, requests, concurrent, limit).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<CatalogIndex>,
    anime_id: AnimeId,
    limit: NonZeroUsize,
    explain: bool,
    json: bool,
) -> Result<()> {
    let ranker = RecommendationRanker::new(catalog);

    let recommendations = match ranker.get_recommendations(anime_id, limit) {
        Ok(recommendations) => recommendations,
        Err(RecommendError::NotFound(id)) => {
            return Err(anyhow!(
                "Anime {} is not in the catalog (try `search --title ...` to find an id)",
                id
            ))
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&recommendations)
            .context("Failed to serialize recommendations")?;
        println!("{}", out);
    } else {
        print_recommendations(&recommendations, explain);
    }
    Ok(())
}

/// Handle the 'show' command
fn handle_show(catalog: &CatalogIndex, anime_id: AnimeId) -> Result<()> {
    let anime = catalog
        .get_by_id(anime_id)
        .ok_or_else(|| anyhow!("Anime {} not found", anime_id))?;

    println!("{}", format!("{} (id {})", anime.display_title(), anime.id).bold().blue());
    if anime.title_english.is_some() {
        println!("{}Title: {}", "• ".green(), anime.title);
    }
    println!("{}MAL id: {}", "• ".green(), anime.mal_id);
    println!(
        "{}Type: {}",
        "• ".green(),
        anime.kind.map(|k| k.as_str()).unwrap_or("-")
    );
    println!("{}Episodes: {}", "• ".green(), or_dash(anime.episodes));
    println!("{}Year: {}", "• ".green(), or_dash(anime.year));
    println!(
        "{}Demographic: {}",
        "• ".green(),
        anime.demographic.as_deref().unwrap_or("-")
    );
    println!("{}Genres: {}", "• ".green(), join_genres(anime));
    println!(
        "{}Studios: {}",
        "• ".green(),
        anime
            .studios
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("{}Score: {}", "• ".cyan(), or_dash(anime.score));
    println!("{}Rank: {}", "• ".cyan(), or_dash(anime.rank));
    println!("{}Popularity: {}", "• ".cyan(), or_dash(anime.popularity));
    println!("{}Members: {}", "• ".cyan(), or_dash(anime.members));
    println!("{}Favorites: {}", "• ".cyan(), or_dash(anime.favorites));

    let eligible = if is_quality_candidate(anime) {
        "yes".green()
    } else {
        "no".red()
    };
    println!("{}Recommendable: {}", "• ".cyan(), eligible);

    if let Some(synopsis) = &anime.synopsis {
        println!();
        println!("{}", synopsis);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &CatalogIndex, title: &str) {
    let matches = catalog.search_by_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("No anime found");
        return;
    }

    for anime in matches.iter().take(SEARCH_RESULTS) {
        println!(
            "{}: {} ({}) [{}] score {}",
            anime.id.to_string().green(),
            anime.display_title(),
            or_dash(anime.year),
            join_genres(anime),
            or_dash(anime.score)
        );
    }
    if matches.len() > SEARCH_RESULTS {
        println!("... and {} more", matches.len() - SEARCH_RESULTS);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog: Arc<CatalogIndex>,
    requests: usize,
    concurrent: usize,
    limit: NonZeroUsize,
) -> Result<()> {
    let ids = catalog.get_all_anime_ids();
    if ids.is_empty() {
        return Err(anyhow!("Catalog is empty, nothing to benchmark"));
    }
    if requests == 0 {
        warn!("No requests to make");
        return Ok(());
    }

    let ranker = RecommendationRanker::new(catalog);
    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));

    let targets: Vec<AnimeId> = (0..requests)
        .map(|_| ids[rand::random_range(0..ids.len())])
        .collect();

    let wall = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for target in targets {
        let ranker = ranker.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            // Ranking is CPU-bound; keep it off the async workers
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                ranker.get_recommendations(target, limit)?;
                Ok::<_, RecommendError>(start.elapsed())
            })
            .await??;
            Ok::<_, anyhow::Error>(elapsed)
        }));
    }

    let mut timings = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall.elapsed();

    timings.sort();
    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Nearest-rank percentile over sorted, non-empty timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let rank = (sorted.len() as f64 * p).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &Recommendations, explain: bool) {
    let target = &recommendations.target;
    println!(
        "{}",
        format!(
            "Because you watched {} ({}):",
            target.title_english.as_deref().unwrap_or(&target.title),
            or_dash(target.year)
        )
        .bold()
        .blue()
    );

    if recommendations.items.is_empty() {
        println!("No recommendations found");
        return;
    }

    for (i, item) in recommendations.items.iter().enumerate() {
        let anime = &item.anime;
        println!(
            "{}. {} ({}) [{}] - Similarity: {:.4}",
            (i + 1).to_string().green(),
            anime.title_english.as_deref().unwrap_or(&anime.title),
            or_dash(anime.year),
            anime.genres.join(", "),
            item.similarity.total_similarity
        );

        if explain {
            let breakdown = &item.similarity.breakdown;
            for component in Component::ALL {
                let value = breakdown.get(component);
                println!(
                    "     {:<12} {:.4} x {:.2} = {:.4}",
                    component.name(),
                    value,
                    WEIGHTS.get(component),
                    value * WEIGHTS.get(component)
                );
            }
        }
    }
}

fn join_genres(anime: &Anime) -> String {
    anime
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
