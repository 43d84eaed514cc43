use chrono::NaiveDate;
use serde::Serialize;

/// Rating change between a reference point and the latest point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Momentum {
    pub team: String,
    pub current: f64,
    pub current_date: NaiveDate,
    pub reference: f64,
    pub reference_date: NaiveDate,
    pub delta: f64,
    /// None when the reference rating is zero
    pub pct_change: Option<f64>,
}

impl Momentum {
    pub fn is_rising(&self) -> bool {
        self.delta > 0.0
    }
}
