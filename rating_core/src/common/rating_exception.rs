use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the rating analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Series errors (0-99)
    #[strum(serialize = "_SERIES_ERR_BEGIN")]
    SeriesErrBegin = 0,
    #[strum(serialize = "INVALID_INPUT")]
    InvalidInput = 1,
    #[strum(serialize = "EMPTY_RANGE")]
    EmptyRange = 2,
    #[strum(serialize = "EMPTY_STORE")]
    EmptyStore = 3,
    #[strum(serialize = "_SERIES_ERR_END")]
    SeriesErrEnd = 99,

    // Trend errors (100-199)
    #[strum(serialize = "_TREND_ERR_BEGIN")]
    TrendErrBegin = 100,
    #[strum(serialize = "INVALID_WINDOW")]
    InvalidWindow = 101,
    #[strum(serialize = "INSUFFICIENT_HISTORY")]
    InsufficientHistory = 102,
    #[strum(serialize = "_TREND_ERR_END")]
    TrendErrEnd = 199,

    // Setup errors (200-299)
    #[strum(serialize = "_SETUP_ERR_BEGIN")]
    SetupErrBegin = 200,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 201,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 202,
    #[strum(serialize = "_SETUP_ERR_END")]
    SetupErrEnd = 299,
}

impl ErrCode {
    pub fn is_series_err(&self) -> bool {
        let code = *self as i32;
        code > Self::SeriesErrBegin as i32 && code < Self::SeriesErrEnd as i32
    }

    pub fn is_trend_err(&self) -> bool {
        let code = *self as i32;
        code > Self::TrendErrBegin as i32 && code < Self::TrendErrEnd as i32
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{errcode}: {msg}")]
pub struct RatingError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl RatingError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_series_err(&self) -> bool {
        self.errcode.is_series_err()
    }

    pub fn is_trend_err(&self) -> bool {
        self.errcode.is_trend_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_uses_code_name() {
        let err = RatingError::new("no points", ErrCode::EmptyStore);
        assert_eq!(err.to_string(), "EMPTY_STORE: no points");
    }

    #[test]
    fn test_code_from_str() {
        assert_eq!(ErrCode::from_str("INVALID_WINDOW").unwrap(), ErrCode::InvalidWindow);
        assert!(ErrCode::from_str("NOT_A_CODE").is_err());
    }

    #[test]
    fn test_code_groups() {
        assert!(ErrCode::EmptyRange.is_series_err());
        assert!(!ErrCode::EmptyRange.is_trend_err());
        assert!(ErrCode::InsufficientHistory.is_trend_err());
        assert!(!ErrCode::ConfigError.is_series_err());
        assert!(!ErrCode::SeriesErrBegin.is_series_err());
    }
}
