use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::{
    momentum::Momentum,
    trend_summary::{SmoothedPoint, TrendSummary},
};
use crate::common::{
    enums::SmoothingAlignment,
    rating_exception::{ErrCode, RatingError},
    time::to_date_str,
    utils::pct_change,
};
use crate::config::trend_config::TrendConfig;
use crate::math::{extremes::find_extremes, rolling::RollingMean};
use crate::series::{rating_point::RatingPoint, rating_series::RatingSeriesStore};

/// Stateless calculator for smoothed series, summaries and momentum.
///
/// Holds only the default smoothing window and the window alignment, every
/// operation is a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendComputer {
    window: usize,
    alignment: SmoothingAlignment,
}

impl Default for TrendComputer {
    fn default() -> Self {
        Self::from_config(&TrendConfig::default())
    }
}

impl TrendComputer {
    pub fn new(window: usize, alignment: SmoothingAlignment) -> Self {
        Self { window, alignment }
    }

    pub fn from_config(config: &TrendConfig) -> Self {
        Self::new(config.smoothing_window, config.alignment)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn alignment(&self) -> SmoothingAlignment {
        self.alignment
    }

    /// Moving average of `window` consecutive ratings.
    ///
    /// Fails with `INVALID_WINDOW` unless `1 <= window <= store.len()`.
    pub fn smooth(
        &self,
        store: &RatingSeriesStore,
        window: usize,
    ) -> Result<Vec<SmoothedPoint>, RatingError> {
        if window < 1 || window > store.len() {
            return Err(RatingError::new(
                format!(
                    "{}: window {} outside 1..={}",
                    store.name(),
                    window,
                    store.len()
                ),
                ErrCode::InvalidWindow,
            ));
        }

        let ratings: Vec<f64> = store.ratings().collect();
        let smoothed = RollingMean::new(window, self.alignment).apply(&ratings);

        Ok(store
            .points()
            .iter()
            .zip(smoothed)
            .map(|(p, value)| SmoothedPoint {
                date: p.date,
                value,
            })
            .collect())
    }

    pub fn summarize(&self, store: &RatingSeriesStore) -> Result<TrendSummary, RatingError> {
        self.summarize_with_window(store, self.window)
    }

    /// Current, peak and trough ratings plus the smoothed series.
    ///
    /// An empty store fails with `EMPTY_STORE` before the window is checked.
    pub fn summarize_with_window(
        &self,
        store: &RatingSeriesStore,
        window: usize,
    ) -> Result<TrendSummary, RatingError> {
        let current = *latest_or_err(store)?;
        let ratings: Vec<f64> = store.ratings().collect();
        let extremes = find_extremes(&ratings).ok_or_else(|| empty_store(store))?;
        let smoothed_series = self.smooth(store, window)?;

        let peak = store[extremes.max_idx];
        let trough = store[extremes.min_idx];

        debug!(
            team = store.name(),
            current = current.rating,
            peak = peak.rating,
            trough = trough.rating,
            points = store.len(),
            "summarized rating history"
        );

        Ok(TrendSummary {
            team: store.name().to_string(),
            current: current.rating,
            current_date: current.date,
            peak: peak.rating,
            peak_date: peak.date,
            trough: trough.rating,
            trough_date: trough.date,
            point_count: store.len(),
            window,
            smoothed_series,
        })
    }

    /// Change from the last point at least `lookback` before the latest point.
    pub fn momentum(
        &self,
        store: &RatingSeriesStore,
        lookback: Duration,
    ) -> Result<Momentum, RatingError> {
        let current = *latest_or_err(store)?;
        let reference = current
            .date
            .checked_sub_signed(lookback)
            .and_then(|cutoff| store.last_on_or_before(cutoff));
        let reference = reference.ok_or_else(|| {
            RatingError::new(
                format!(
                    "{}: no rating {} days before {}, history starts {}",
                    store.name(),
                    lookback.num_days(),
                    to_date_str(current.date),
                    store
                        .earliest()
                        .map(|p| to_date_str(p.date))
                        .unwrap_or_default()
                ),
                ErrCode::InsufficientHistory,
            )
        })?;

        Ok(build_momentum(store.name(), current, *reference))
    }

    /// Change from the first point on or after `from` to the latest point.
    pub fn change_since(
        &self,
        store: &RatingSeriesStore,
        from: NaiveDate,
    ) -> Result<Momentum, RatingError> {
        let current = *latest_or_err(store)?;
        let start = store.first_on_or_after(from).ok_or_else(|| {
            RatingError::new(
                format!("{}: no points since {}", store.name(), to_date_str(from)),
                ErrCode::EmptyRange,
            )
        })?;

        Ok(build_momentum(store.name(), current, *start))
    }
}

fn empty_store(store: &RatingSeriesStore) -> RatingError {
    RatingError::new(
        format!("{}: rating history is empty", store.name()),
        ErrCode::EmptyStore,
    )
}

fn latest_or_err(store: &RatingSeriesStore) -> Result<&RatingPoint, RatingError> {
    store.latest().ok_or_else(|| empty_store(store))
}

fn build_momentum(team: &str, current: RatingPoint, reference: RatingPoint) -> Momentum {
    let delta = current.rating - reference.rating;
    Momentum {
        team: team.to_string(),
        current: current.rating,
        current_date: current.date,
        reference: reference.rating,
        reference_date: reference.date,
        delta,
        pct_change: pct_change(delta, reference.rating),
    }
}
