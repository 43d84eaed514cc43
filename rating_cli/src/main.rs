mod data_loader;
mod report;

use clap::{Parser, Subcommand};
use rating_core::common::time::years_before;
use rating_core::{
    ErrCode, MultiTeamAggregator, RatingError, RatingSeriesStore, SmoothingAlignment, SortKey,
    TrendConfig,
};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rating_cli", about = "Trend analysis over team rating histories")]
struct Cli {
    /// A CSV file or a directory of CSV files with team rating histories.
    #[arg(long, short)]
    data: PathBuf,
    /// JSON file with trend configuration overrides.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Smoothing window alignment: centered or trailing.
    #[arg(long)]
    alignment: Option<SmoothingAlignment>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank teams by their latest rating.
    Leaderboard(LeaderboardArgs),
    /// Current, peak and low rating of one team.
    Summary(SummaryArgs),
    /// Compare several teams side by side.
    Compare(CompareArgs),
    /// Rating change over a lookback period.
    Momentum(MomentumArgs),
    /// Change and smoothed rating over the last few years.
    Recent(RecentArgs),
    /// Write all teams' ratings on a shared date axis as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
struct LeaderboardArgs {
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Parser)]
struct SummaryArgs {
    #[arg(long)]
    team: String,
    #[arg(long)]
    window: Option<usize>,
}

#[derive(Parser)]
struct CompareArgs {
    /// Comma separated team names. Defaults to the current leaders.
    #[arg(long, value_delimiter = ',')]
    teams: Vec<String>,
    #[arg(long)]
    window: Option<usize>,
    /// current, peak or momentum.
    #[arg(long)]
    sort: Option<SortKey>,
}

#[derive(Parser)]
struct MomentumArgs {
    #[arg(long)]
    lookback_days: Option<i64>,
}

#[derive(Parser)]
struct RecentArgs {
    #[arg(long)]
    years: Option<u32>,
    #[arg(long)]
    window: Option<usize>,
}

#[derive(Parser)]
struct ExportArgs {
    #[arg(long, short)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(alignment) = cli.alignment {
        config.alignment = alignment;
    }
    apply_overrides(&mut config, &cli.command);
    config.validate()?;

    let stores = data_loader::load_stores(&cli.data)?;
    info!(teams = stores.len(), "loaded rating histories");

    let aggregator = MultiTeamAggregator::new(config);
    let config = aggregator.config();

    match cli.command {
        Commands::Leaderboard(_) => {
            report::print_leaderboard(&aggregator.leaderboard(&stores), config.top_n);
        }
        Commands::Summary(args) => handle_summary(&aggregator, &stores, &args.team)?,
        Commands::Compare(args) => handle_compare(&aggregator, &stores, &args.teams),
        Commands::Momentum(_) => {
            let batch = aggregator.rank_by_momentum(&stores, config.lookback()?);
            report::print_momentum(&batch.items, config.lookback_days);
            report::print_errors(&batch.errors);
        }
        Commands::Recent(_) => handle_recent(&aggregator, &stores)?,
        Commands::Export(args) => {
            let table = aggregator.align(&stores);
            report::write_aligned(&table, File::create(&args.output)?)?;
            info!(rows = table.len(), output = %args.output.display(), "exported aligned ratings");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<TrendConfig, Box<dyn Error>> {
    match path {
        Some(p) => Ok(TrendConfig::from_json_str(&std::fs::read_to_string(p)?)?),
        None => Ok(TrendConfig::default()),
    }
}

/// Command-line values take precedence over the config file
fn apply_overrides(config: &mut TrendConfig, command: &Commands) {
    match command {
        Commands::Leaderboard(args) => {
            if let Some(top) = args.top {
                config.top_n = top;
            }
        }
        Commands::Summary(args) => {
            if let Some(window) = args.window {
                config.smoothing_window = window;
            }
        }
        Commands::Compare(args) => {
            if let Some(window) = args.window {
                config.compare_window = window;
            }
            if let Some(sort) = args.sort {
                config.sort_key = sort;
            }
        }
        Commands::Momentum(args) => {
            if let Some(lookback_days) = args.lookback_days {
                config.lookback_days = lookback_days;
            }
        }
        Commands::Recent(args) => {
            if let Some(years) = args.years {
                config.recent_years = years;
            }
            if let Some(window) = args.window {
                config.recent_window = window;
            }
        }
        Commands::Export(_) => {}
    }
}

fn handle_summary(
    aggregator: &MultiTeamAggregator,
    stores: &[RatingSeriesStore],
    team: &str,
) -> Result<(), Box<dyn Error>> {
    let store = stores
        .iter()
        .find(|s| s.name().eq_ignore_ascii_case(team))
        .ok_or_else(|| RatingError::new(format!("team {} not found", team), ErrCode::InvalidInput))?;

    let summary = aggregator
        .computer()
        .summarize_with_window(store, aggregator.config().smoothing_window)?;
    report::print_summary(&summary);
    Ok(())
}

/// Stores named in `teams`, case-insensitively; unknown names are reported
fn select_teams(stores: &[RatingSeriesStore], teams: &[String]) -> Vec<RatingSeriesStore> {
    for team in teams {
        if !stores.iter().any(|s| s.name().eq_ignore_ascii_case(team)) {
            warn!(team = team.as_str(), "team not found in rating data");
        }
    }
    stores
        .iter()
        .filter(|s| teams.iter().any(|t| t.eq_ignore_ascii_case(s.name())))
        .cloned()
        .collect()
}

fn handle_compare(aggregator: &MultiTeamAggregator, stores: &[RatingSeriesStore], teams: &[String]) {
    let config = aggregator.config();
    let selected = if teams.is_empty() {
        let leaders: Vec<String> = aggregator
            .leaderboard(stores)
            .top(config.top_n)
            .iter()
            .map(|e| e.team.clone())
            .collect();
        select_teams(stores, &leaders)
    } else {
        select_teams(stores, teams)
    };

    let res = aggregator.compare(&selected);
    report::print_comparison(&res.table);
    report::print_errors(&res.errors);
}

fn handle_recent(
    aggregator: &MultiTeamAggregator,
    stores: &[RatingSeriesStore],
) -> Result<(), Box<dyn Error>> {
    let config = aggregator.config();
    let latest = stores
        .iter()
        .filter_map(|s| s.latest().map(|p| p.date))
        .max()
        .ok_or_else(|| RatingError::new("no rating data loaded", ErrCode::EmptyStore))?;

    let since = years_before(latest, config.recent_years)?;
    let batch = aggregator.recent_form(stores, since, config.recent_window);
    report::print_recent(&batch.items, since);
    report::print_errors(&batch.errors);
    Ok(())
}
