use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Ordering key for comparison tables
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Current,
    Peak,
    Momentum,
}

/// Where a smoothing window sits relative to the point it produces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SmoothingAlignment {
    #[default]
    Centered,
    Trailing,
}

/// How `RatingSeriesStore::from_unsorted` treats two points on the same date
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    KeepFirst,
    KeepLast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("momentum").unwrap(), SortKey::Momentum);
        assert_eq!(SortKey::Peak.to_string(), "peak");
        assert!(SortKey::from_str("elo").is_err());
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!(
            SmoothingAlignment::from_str("trailing").unwrap(),
            SmoothingAlignment::Trailing
        );
        assert_eq!(SmoothingAlignment::default(), SmoothingAlignment::Centered);
    }

    #[test]
    fn test_duplicate_policy_parse() {
        assert_eq!(DuplicatePolicy::from_str("keep_last").unwrap(), DuplicatePolicy::KeepLast);
        assert_eq!(DuplicatePolicy::KeepFirst.to_string(), "keep_first");
    }

    #[test]
    fn test_serde_names_match_display() {
        assert_eq!(serde_json::to_string(&SortKey::Momentum).unwrap(), "\"momentum\"");
        assert_eq!(
            serde_json::to_string(&SmoothingAlignment::Trailing).unwrap(),
            "\"trailing\""
        );
        assert_eq!(
            serde_json::to_string(&DuplicatePolicy::KeepLast).unwrap(),
            "\"keep_last\""
        );
        let key: SortKey = serde_json::from_str("\"peak\"").unwrap();
        assert_eq!(key, SortKey::Peak);
    }
}
