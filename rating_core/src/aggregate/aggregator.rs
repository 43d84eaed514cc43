use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    aligned_table::AlignedTable, comparison_table::ComparisonTable, leaderboard::Leaderboard,
};
use crate::common::{enums::SortKey, rating_exception::RatingError, utils::cmp_desc};
use crate::config::trend_config::TrendConfig;
use crate::series::rating_series::RatingSeriesStore;
use crate::trend::{momentum::Momentum, trend_computer::TrendComputer, trend_summary::SmoothedPoint};

/// A team left out of a batch result, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamError {
    pub team: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: RatingError,
}

/// Result of `aggregate`: the ranked table plus the teams that failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub table: ComparisonTable,
    pub errors: Vec<TeamError>,
}

/// Per-team results of a batch operation plus the teams that failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBatch<T> {
    pub items: Vec<T>,
    pub errors: Vec<TeamError>,
}

impl<T> Default for TeamBatch<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Recent-period view of one team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentForm {
    pub team: String,
    pub change: Momentum,
    pub smoothed: Vec<SmoothedPoint>,
}

/// Runs trend computations over many teams.
///
/// A failure for one team never aborts the batch. That team is excluded from
/// the result and reported in the error list.
#[derive(Debug, Clone, Default)]
pub struct MultiTeamAggregator {
    config: TrendConfig,
    computer: TrendComputer,
}

impl MultiTeamAggregator {
    pub fn new(config: TrendConfig) -> Self {
        let computer = TrendComputer::from_config(&config);
        Self { config, computer }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub fn computer(&self) -> &TrendComputer {
        &self.computer
    }

    /// Summarize every team and rank them, by current rating unless `sort_by` says otherwise.
    ///
    /// Momentum over the configured lookback is attached where the history
    /// allows it. When ranking by momentum, teams without it are excluded.
    pub fn aggregate(
        &self,
        stores: &[RatingSeriesStore],
        window: usize,
        sort_by: Option<SortKey>,
    ) -> Aggregation {
        let sort_key = sort_by.unwrap_or_default();
        let lookback = self.config.lookback();
        let mut rows = Vec::with_capacity(stores.len());
        let mut errors = Vec::new();

        for store in stores {
            let summary = match self.computer.summarize_with_window(store, window) {
                Ok(summary) => summary,
                Err(error) => {
                    errors.push(team_error(store, error));
                    continue;
                }
            };

            let momentum = match lookback
                .clone()
                .and_then(|lookback| self.computer.momentum(store, lookback))
            {
                Ok(m) => Some(m),
                Err(error) if sort_key == SortKey::Momentum => {
                    errors.push(team_error(store, error));
                    continue;
                }
                Err(error) => {
                    debug!(team = store.name(), %error, "no momentum for team");
                    None
                }
            };

            rows.push((summary, momentum));
        }

        Aggregation {
            table: ComparisonTable::new(rows, sort_key),
            errors,
        }
    }

    /// `aggregate` with the configured comparison window and sort key
    pub fn compare(&self, stores: &[RatingSeriesStore]) -> Aggregation {
        self.aggregate(stores, self.config.compare_window, Some(self.config.sort_key))
    }

    /// Momentum of every team over `lookback`, biggest gain first
    pub fn rank_by_momentum(
        &self,
        stores: &[RatingSeriesStore],
        lookback: Duration,
    ) -> TeamBatch<Momentum> {
        let mut batch = self.collect(stores, |store| self.computer.momentum(store, lookback));
        batch
            .items
            .sort_by(|a, b| cmp_desc(a.delta, b.delta, a.team.cmp(&b.team)));
        batch
    }

    /// Change since `since` and the smoothed series of that period for every team,
    /// biggest gain first
    pub fn recent_form(
        &self,
        stores: &[RatingSeriesStore],
        since: NaiveDate,
        window: usize,
    ) -> TeamBatch<RecentForm> {
        let mut batch = self.collect(stores, |store| {
            let recent = store.since(since)?;
            let change = self.computer.change_since(&recent, since)?;
            let smoothed = self.computer.smooth(&recent, window)?;
            Ok(RecentForm {
                team: store.name().to_string(),
                change,
                smoothed,
            })
        });
        batch
            .items
            .sort_by(|a, b| cmp_desc(a.change.delta, b.change.delta, a.team.cmp(&b.team)));
        batch
    }

    /// All teams' ratings on a shared date axis
    pub fn align(&self, stores: &[RatingSeriesStore]) -> AlignedTable {
        AlignedTable::new(stores)
    }

    /// Latest rating per team
    pub fn leaderboard(&self, stores: &[RatingSeriesStore]) -> Leaderboard {
        Leaderboard::from_stores(stores)
    }

    fn collect<T, F>(&self, stores: &[RatingSeriesStore], mut f: F) -> TeamBatch<T>
    where
        F: FnMut(&RatingSeriesStore) -> Result<T, RatingError>,
    {
        let mut batch = TeamBatch::default();
        for store in stores {
            match f(store) {
                Ok(item) => batch.items.push(item),
                Err(error) => batch.errors.push(team_error(store, error)),
            }
        }
        batch
    }
}

fn team_error(store: &RatingSeriesStore, error: RatingError) -> TeamError {
    warn!(team = store.name(), %error, "team excluded from result");
    TeamError {
        team: store.name().to_string(),
        error,
    }
}

fn serialize_error<S: serde::Serializer>(error: &RatingError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}
