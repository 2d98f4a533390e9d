use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, Movie};
use engine::{
    DEFAULT_MIN_ITEM_RATINGS, DEFAULT_MIN_USER_RATINGS, DEFAULT_TOP_N, EngineConfig, EngineError,
    Recommendation, RecommendationEngine,
};
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::info;

/// CineMatch - find movies similar to one you like
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Item-based collaborative filtering over MovieLens ratings", long_about = None)]
struct Cli {
    /// Path to a MovieLens dataset directory (movies.csv + ratings.csv, or movies.dat + ratings.dat)
    #[arg(short, long, env = "CINEMATCH_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Movies need more than this many ratings to be kept
    #[arg(long, env = "MIN_ITEM_RATINGS", default_value_t = DEFAULT_MIN_ITEM_RATINGS)]
    min_item_ratings: usize,

    /// Users need more than this many ratings (after the movie filter) to be kept
    #[arg(long, env = "MIN_USER_RATINGS", default_value_t = DEFAULT_MIN_USER_RATINGS)]
    min_user_ratings: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List titles, optionally narrowed by a search string
    Titles {
        /// Case-insensitive substring to look for
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of titles to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Recommend movies similar to a title
    Recommend {
        /// Exact title, including the year: "Toy Story (1995)"
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dataset and matrix statistics
    Stats,

    /// Run concurrent recommend queries against one engine
    Benchmark {
        /// Number of queries to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Recommendations per query
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

#[derive(Serialize)]
struct RecommendResponse<'a> {
    query: &'a str,
    recommendations: Vec<Recommendation>,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::default()
        .with_min_item_ratings(cli.min_item_ratings)
        .with_min_user_ratings(cli.min_user_ratings);

    // Load data and build the engine once, before any query
    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let Dataset { movies, ratings } =
        Dataset::load_from_dir(&cli.data_dir).context("Failed to load MovieLens dataset")?;
    let raw_counts = (movies.len(), ratings.len());
    let engine = RecommendationEngine::build(config, ratings, &movies)
        .context("Failed to build recommendation engine")?;
    println!(
        "{} Indexed {} films in {:?}",
        "✓".green(),
        engine.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Titles { search, limit } => handle_titles(&engine, search.as_deref(), limit),
        Commands::Recommend { title, top_n, json } => {
            handle_recommend(&engine, &movies, &title, top_n, json)
        }
        Commands::Stats => handle_stats(&engine, raw_counts),
        Commands::Benchmark { requests, top_n } => handle_benchmark(&engine, requests, top_n),
    }
}

/// Handle the 'titles' command
fn handle_titles(engine: &RecommendationEngine, search: Option<&str>, limit: usize) -> Result<ExitCode> {
    let titles = engine.list_titles();
    let matches = match search {
        Some(query) => search_titles(&titles, query),
        None => titles.iter().map(String::as_str).collect(),
    };

    if let Some(query) = search {
        if matches.is_empty() {
            println!(
                "{} No films matching \"{}\" were found. Try a shorter keyword or check the spelling.",
                "•".red(),
                query
            );
            return Ok(ExitCode::SUCCESS);
        }
        let plural = if matches.len() == 1 { "" } else { "es" };
        println!("{} {} match{} found", "•".green(), matches.len(), plural);
    }

    for title in matches.iter().take(limit) {
        println!("  {}", title);
    }
    if matches.len() > limit {
        println!("  ... and {} more", matches.len() - limit);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    movies: &[Movie],
    title: &str,
    top_n: usize,
    json: bool,
) -> Result<ExitCode> {
    let recommendations = match engine.recommend_scored(title, top_n) {
        Ok(recommendations) => recommendations,
        Err(EngineError::NotFound { title }) => {
            println!(
                "{} '{}' was not found in the database.",
                "✗".red(),
                title
            );
            println!(
                "  Tip: make sure the title matches exactly, including the year, e.g. 'Toy Story (1995)'."
            );
            println!("  Use `cinematch titles --search <text>` to look it up.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let response = RecommendResponse {
            query: title,
            recommendations,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(ExitCode::SUCCESS);
    }

    let by_title: HashMap<&str, &Movie> = movies
        .iter()
        .map(|movie| (movie.title.as_str(), movie))
        .collect();
    print_recommendations(title, &recommendations, &by_title);
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'stats' command
fn handle_stats(engine: &RecommendationEngine, raw_counts: (usize, usize)) -> Result<ExitCode> {
    let config = engine.config();
    let stats = engine.stats();

    println!("{}", "Dataset".bold().blue());
    println!("{}Movies: {}", "• ".green(), raw_counts.0);
    println!("{}Ratings: {}", "• ".green(), raw_counts.1);
    println!("{}", "Filtering".bold().blue());
    println!("{}Movies need > {} ratings", "• ".cyan(), config.min_item_ratings);
    println!("{}Users need > {} ratings", "• ".cyan(), config.min_user_ratings);
    println!("{}", "Rating matrix".bold().blue());
    println!("{}Shape: {} titles x {} users", "• ".green(), stats.rows, stats.cols);
    println!("{}Stored ratings: {}", "• ".green(), stats.stored);
    println!("{}Sparsity: {:.2}%", "• ".green(), stats.sparsity * 100.0);
    if stats.orphans > 0 {
        println!("{}Ratings without a catalog entry: {}", "• ".yellow(), stats.orphans);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &RecommendationEngine, requests: usize, top_n: usize) -> Result<ExitCode> {
    ensure!(requests > 0, "benchmark needs at least one request");

    // Random titles, drawn up front so the timed section only queries
    let titles = engine.list_titles();
    let mut rng = rand::rng();
    let queries: Vec<&String> = (0..requests)
        .filter_map(|_| titles.choose(&mut rng))
        .collect();
    info!("Running {} queries across {} threads", queries.len(), rayon::current_num_threads());

    // All queries share one engine; nothing is locked
    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = queries
        .par_iter()
        .map(|title| {
            let start = Instant::now();
            let _ = engine.recommend(title, top_n);
            start.elapsed()
        })
        .collect();
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    Ok(ExitCode::SUCCESS)
}

/// Case-insensitive substring search over titles, keeping their order
fn search_titles<'a>(titles: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return titles.iter().map(String::as_str).collect();
    }
    titles
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Value at fraction `p` of a sorted, non-empty slice
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// "Name (year)", or just the name when the title carries no year
fn display_title(title: &str) -> String {
    match data_loader::split_title_year(title) {
        (name, Some(year)) => format!("{} ({})", name, year),
        (name, None) => name.to_string(),
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(
    query: &str,
    recommendations: &[Recommendation],
    movies: &HashMap<&str, &Movie>,
) {
    println!("{}", format!("Because you liked {}:", display_title(query)).bold().blue());

    if recommendations.is_empty() {
        println!("  No other titles to compare against.");
        return;
    }

    for (idx, rec) in recommendations.iter().enumerate() {
        let rank = format!("{:02}", idx + 1);
        let genres = movies
            .get(rec.title.as_str())
            .map(|movie| {
                movie
                    .genres
                    .iter()
                    .map(|g| format!("{:?}", g))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!(
            "{}. {} [{}] - similarity {:.3}",
            rank.green(),
            display_title(&rec.title),
            genres,
            rec.score
        );
    }
    println!("{}", "Ranked by cosine similarity score".dimmed());
}
