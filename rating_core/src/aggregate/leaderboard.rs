use serde::Serialize;

use crate::common::utils::cmp_desc;
use crate::series::rating_series::RatingSeriesStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team: String,
    pub rating: f64,
}

/// Teams ordered by rating, highest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Build from (team, rating) pairs; non-finite ratings are dropped
    pub fn new<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut rows: Vec<(String, f64)> = pairs
            .into_iter()
            .map(|(team, rating)| (team.into(), rating))
            .filter(|(_, rating)| rating.is_finite())
            .collect();
        rows.sort_by(|a, b| cmp_desc(a.1, b.1, a.0.cmp(&b.0)));

        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(idx, (team, rating))| LeaderboardEntry {
                rank: idx + 1,
                team,
                rating,
            })
            .collect();
        Self { entries }
    }

    /// Latest rating of every non-empty store
    pub fn from_stores(stores: &[RatingSeriesStore]) -> Self {
        Self::new(
            stores
                .iter()
                .filter_map(|s| s.latest().map(|p| (s.name(), p.rating))),
        )
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.team.as_str())
    }
}
