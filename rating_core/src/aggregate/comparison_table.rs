use serde::Serialize;

use crate::common::{enums::SortKey, utils::cmp_desc};
use crate::trend::{momentum::Momentum, trend_summary::TrendSummary};

/// One ranked row of a comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    /// 1-based position in the table
    pub rank: usize,
    pub team: String,
    pub summary: TrendSummary,
    pub momentum: Option<Momentum>,
}

impl ComparisonEntry {
    fn sort_value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Current => self.summary.current,
            SortKey::Peak => self.summary.peak,
            SortKey::Momentum => self
                .momentum
                .as_ref()
                .map_or(f64::NEG_INFINITY, |m| m.delta),
        }
    }
}

/// Teams ranked by a `SortKey`, highest first. Rebuilt rather than edited
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    sort_key: SortKey,
    entries: Vec<ComparisonEntry>,
}

impl ComparisonTable {
    pub fn new(rows: Vec<(TrendSummary, Option<Momentum>)>, sort_key: SortKey) -> Self {
        let mut entries: Vec<ComparisonEntry> = rows
            .into_iter()
            .map(|(summary, momentum)| ComparisonEntry {
                rank: 0,
                team: summary.team.clone(),
                summary,
                momentum,
            })
            .collect();

        entries.sort_by(|a, b| {
            cmp_desc(
                a.sort_value(sort_key),
                b.sort_value(sort_key),
                a.team.cmp(&b.team),
            )
        });
        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.rank = idx + 1;
        }

        Self { sort_key, entries }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, team: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.team == team)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.team.as_str())
    }

    /// Same rows ranked by another key
    pub fn resorted(&self, sort_key: SortKey) -> Self {
        let rows = self
            .entries
            .iter()
            .map(|e| (e.summary.clone(), e.momentum.clone()))
            .collect();
        Self::new(rows, sort_key)
    }
}
