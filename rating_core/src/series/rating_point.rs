use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::time::to_date_str;

/// One rating observation for a team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    pub date: NaiveDate,
    pub rating: f64,
}

impl RatingPoint {
    pub fn new(date: NaiveDate, rating: f64) -> Self {
        Self { date, rating }
    }
}

impl fmt::Display for RatingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.rating, to_date_str(self.date))
    }
}
