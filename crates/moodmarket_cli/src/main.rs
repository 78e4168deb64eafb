//! Command-line entry point for `moodmarket_core`.
//!
//! # Responsibility
//! - Rank a JSON catalog export against a mood query from the terminal.
//! - Run geofence checks with explicit coordinates.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use moodmarket_core::{
    default_log_level, init_logging, score_items, sort_by_recency, CatalogSource, CheckInError,
    CheckInService, FeedService, FixedLocation, GeoPoint, GhostDrop, JsonCatalog, MoodQuery,
    ScoredItem,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Mood matching and ghost drop checks for MoodMarket catalogs.
#[derive(Parser, Debug)]
#[command(name = "moodmarket")]
#[command(version, long_about = None)]
struct Cli {
    /// Absolute directory for rolling log files. Logging stays off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank catalog items against a comma-separated mood query
    Rank {
        /// JSON array of catalog rows
        #[arg(long)]
        catalog: PathBuf,
        /// Mood tokens, e.g. "serene,hopeful"
        #[arg(long, default_value = "")]
        q: String,
        /// Maximum items to print (all matches when unset)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the vibed, following and trending feed sections
    Feed {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long, default_value = "")]
        q: String,
        /// Followed creator id; repeat for several
        #[arg(long = "follow")]
        follow: Vec<Uuid>,
    },

    /// Check whether a position is close enough to unlock a ghost drop
    CheckIn {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        target_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        target_lon: f64,
        /// Unlock radius in meters (default 50)
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Print core crate version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(default_log_level(), log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Rank { catalog, q, limit } => rank(&catalog, &q, limit),
        Commands::Feed {
            catalog,
            q,
            follow,
        } => feed(&catalog, &q, follow),
        Commands::CheckIn {
            lat,
            lon,
            target_lat,
            target_lon,
            radius,
        } => check_in(lat, lon, target_lat, target_lon, radius),
        Commands::Version => {
            println!("moodmarket_core {}", moodmarket_core::core_version());
            Ok(())
        }
    }
}

fn load_catalog(path: &Path) -> Result<JsonCatalog> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog `{}`", path.display()))?;
    Ok(JsonCatalog::new(payload))
}

fn rank(path: &Path, raw_query: &str, limit: Option<usize>) -> Result<()> {
    let catalog = load_catalog(path)?;
    let query = MoodQuery::parse(raw_query);
    if query.is_empty() {
        let mut items = catalog.fetch_catalog().context("failed to load catalog")?;
        sort_by_recency(&mut items);
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        println!("no mood tokens given; newest first");
        score_items(&query, items).iter().for_each(print_scored);
        return Ok(());
    }

    let mut hits = FeedService::new(catalog)
        .search(&query)
        .context("failed to rank catalog")?;
    if let Some(limit) = limit {
        hits.truncate(limit);
    }

    println!("query: {}", query.label());
    if hits.is_empty() {
        println!("no matches");
    }
    for hit in &hits {
        print_scored(hit);
    }
    Ok(())
}

fn feed(path: &Path, raw_query: &str, follow: Vec<Uuid>) -> Result<()> {
    let service = FeedService::new(load_catalog(path)?);
    let followed = follow.into_iter().collect::<BTreeSet<_>>();
    let feed = service.load_feed(&MoodQuery::parse(raw_query), &followed);

    if let Some(error) = feed.fetch_error {
        bail!(error);
    }

    if let Some(heading) = feed.vibed_heading() {
        println!("== {heading}");
        feed.vibed.iter().for_each(print_scored);
    }
    if !feed.following.is_empty() {
        println!("== From creators you follow");
        for item in &feed.following {
            println!("{}  {}", item.id, item.title);
        }
    }
    println!("== Trending");
    feed.trending.iter().for_each(print_scored);
    Ok(())
}

fn check_in(
    lat: f64,
    lon: f64,
    target_lat: f64,
    target_lon: f64,
    radius: Option<f64>,
) -> Result<()> {
    let position = GeoPoint::new(lat, lon).context("invalid position")?;
    let target = GeoPoint::new(target_lat, target_lon).context("invalid target")?;
    let mut ghost_drop = GhostDrop::new(Uuid::nil(), "cli target", target);
    ghost_drop.radius_m = radius;

    let service = CheckInService::new(FixedLocation::at(position));
    match service.check_in(&ghost_drop) {
        Ok(check) => {
            println!(
                "unlocked: {}m from target (radius {}m)",
                check.rounded_distance_m(),
                check.radius_m
            );
            Ok(())
        }
        Err(err @ CheckInError::OutOfRange { .. }) => bail!("rejected: {err}"),
        Err(err) => Err(err).context("check-in failed"),
    }
}

fn print_scored(scored: &ScoredItem) {
    println!(
        "{:>3}%  {:<12} {}",
        scored.score, scored.primary_mood, scored.item.title
    );
}
