use chrono::NaiveDate;
use serde::Serialize;

/// A smoothed value, None where the window did not fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Snapshot of one team's rating history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub team: String,
    pub current: f64,
    pub current_date: NaiveDate,
    pub peak: f64,
    pub peak_date: NaiveDate,
    pub trough: f64,
    pub trough_date: NaiveDate,
    pub point_count: usize,
    pub window: usize,
    pub smoothed_series: Vec<SmoothedPoint>,
}

impl TrendSummary {
    /// Latest smoothed value that is defined
    pub fn last_smoothed(&self) -> Option<&SmoothedPoint> {
        self.smoothed_series.iter().rev().find(|p| p.value.is_some())
    }

    /// Distance of the current rating below the peak
    pub fn off_peak(&self) -> f64 {
        self.peak - self.current
    }
}
