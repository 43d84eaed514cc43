use chrono::Duration;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use super::config_with_check::ConfigWithCheck;
use crate::common::{
    enums::{SmoothingAlignment, SortKey},
    rating_exception::{ErrCode, RatingError},
    time::{days, max_lookback_days},
};

/// Trend analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    /// Window for single-team smoothed series
    pub smoothing_window: usize,
    /// Window for multi-team comparison series
    pub compare_window: usize,
    /// Window for recent-form series
    pub recent_window: usize,
    /// Momentum lookback in days
    pub lookback_days: i64,
    /// Length of the recent-form period in years
    pub recent_years: u32,
    /// Number of leaderboard entries shown
    pub top_n: usize,
    pub sort_key: SortKey,
    pub alignment: SmoothingAlignment,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 30,
            compare_window: 50,
            recent_window: 10,
            lookback_days: 365,
            recent_years: 5,
            top_n: 5,
            sort_key: SortKey::Current,
            alignment: SmoothingAlignment::Centered,
        }
    }
}

impl TrendConfig {
    pub fn new(conf: Option<HashMap<String, Value>>) -> Result<Self, RatingError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            smoothing_window: conf
                .take("smoothing_window")?
                .unwrap_or(default.smoothing_window),
            compare_window: conf.take("compare_window")?.unwrap_or(default.compare_window),
            recent_window: conf.take("recent_window")?.unwrap_or(default.recent_window),
            lookback_days: conf.take("lookback_days")?.unwrap_or(default.lookback_days),
            recent_years: conf.take("recent_years")?.unwrap_or(default.recent_years),
            top_n: conf.take("top_n")?.unwrap_or(default.top_n),
            sort_key: parse_enum(&mut conf, "sort_key")?.unwrap_or(default.sort_key),
            alignment: parse_enum(&mut conf, "alignment")?.unwrap_or(default.alignment),
        };

        conf.check()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RatingError> {
        let conf: HashMap<String, Value> = serde_json::from_str(json)
            .map_err(|e| RatingError::new(format!("bad config json: {}", e), ErrCode::ConfigError))?;
        Self::new(Some(conf))
    }

    pub fn lookback(&self) -> Result<Duration, RatingError> {
        days(self.lookback_days)
    }

    pub fn validate(&self) -> Result<(), RatingError> {
        let windows = [
            ("smoothing_window", self.smoothing_window),
            ("compare_window", self.compare_window),
            ("recent_window", self.recent_window),
        ];
        if let Some((key, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(RatingError::new(
                format!("{} must be at least 1", key),
                ErrCode::ConfigError,
            ));
        }
        if !(0..=max_lookback_days()).contains(&self.lookback_days) {
            return Err(RatingError::new(
                format!(
                    "lookback_days must be within 0..={}, got {}",
                    max_lookback_days(),
                    self.lookback_days
                ),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }
}

fn parse_enum<T: FromStr>(conf: &mut ConfigWithCheck, key: &str) -> Result<Option<T>, RatingError> {
    match conf.take::<String>(key)? {
        None => Ok(None),
        Some(s) => T::from_str(&s).map(Some).map_err(|_| {
            RatingError::new(format!("unknown {} = {}", key, s), ErrCode::ConfigError)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrendConfig::new(None).unwrap();
        assert_eq!(config, TrendConfig::default());
        assert_eq!(config.smoothing_window, 30);
        assert_eq!(config.lookback().unwrap(), Duration::days(365));
    }

    #[test]
    fn test_from_json() {
        let config = TrendConfig::from_json_str(
            r#"{"compare_window": 20, "sort_key": "momentum", "alignment": "trailing"}"#,
        )
        .unwrap();
        assert_eq!(config.compare_window, 20);
        assert_eq!(config.sort_key, SortKey::Momentum);
        assert_eq!(config.alignment, SmoothingAlignment::Trailing);
        assert_eq!(config.recent_window, 10);
    }

    #[test]
    fn test_largest_lookback_is_usable() {
        let config = TrendConfig {
            lookback_days: max_lookback_days(),
            ..TrendConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.lookback().is_ok());
    }

    #[test]
    fn test_unknown_key() {
        let err = TrendConfig::from_json_str(r#"{"smoothing": 20}"#).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
        assert!(err.msg.contains("smoothing"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(TrendConfig::from_json_str(r#"{"recent_window": 0}"#).is_err());
        assert!(TrendConfig::from_json_str(r#"{"lookback_days": -1}"#).is_err());
        let err = TrendConfig::from_json_str(r#"{"lookback_days": 9000000000000000}"#).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
        assert!(TrendConfig::from_json_str(r#"{"sort_key": "elo"}"#).is_err());
        assert!(TrendConfig::from_json_str(r#"{"top_n": "five"}"#).is_err());
        assert!(TrendConfig::from_json_str("[1, 2]").is_err());
    }
}
