use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::common::rating_exception::{ErrCode, RatingError};

const DAYS_PER_YEAR: i64 = 365;

/// Parse a date string.
/// Supports "YYYY-MM-DD", "YYYY-MM-DD HH:MM:SS", "YYYY/MM/DD" and "YYYYMMDD"
pub fn parse_date(date_str: &str) -> Result<NaiveDate, RatingError> {
    let s = date_str.trim();
    let parsed = if s.contains(' ') {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
    } else if s.contains('-') {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
    } else if s.contains('/') {
        NaiveDate::parse_from_str(s, "%Y/%m/%d")
    } else {
        NaiveDate::parse_from_str(s, "%Y%m%d")
    };

    parsed.map_err(|e| {
        RatingError::new(
            format!("cannot parse date {:?}: {}", date_str, e),
            ErrCode::SrcDataFormatError,
        )
    })
}

pub fn to_date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Largest lookback, in days, that a `Duration` can hold
pub fn max_lookback_days() -> i64 {
    Duration::MAX.num_days()
}

/// Lookback of a whole number of days
pub fn days(n: i64) -> Result<Duration, RatingError> {
    Duration::try_days(n).ok_or_else(|| {
        RatingError::new(
            format!("lookback of {} days is out of range", n),
            ErrCode::InvalidInput,
        )
    })
}

/// Date `years` years before `date`, counting 365 days per year.
/// Fails when the result is outside the supported calendar
pub fn years_before(date: NaiveDate, years: u32) -> Result<NaiveDate, RatingError> {
    days(DAYS_PER_YEAR * i64::from(years))
        .ok()
        .and_then(|span| date.checked_sub_signed(span))
        .ok_or_else(|| {
            RatingError::new(
                format!("{} years before {} is out of range", years, to_date_str(date)),
                ErrCode::InvalidInput,
            )
        })
}
