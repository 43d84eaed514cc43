pub mod aggregate;
pub mod common;
pub mod config;
pub mod math;
pub mod series;
pub mod trend;

pub use aggregate::aggregator::{Aggregation, MultiTeamAggregator, RecentForm, TeamBatch, TeamError};
pub use aggregate::aligned_table::{AlignedRow, AlignedTable};
pub use aggregate::comparison_table::{ComparisonEntry, ComparisonTable};
pub use aggregate::leaderboard::{Leaderboard, LeaderboardEntry};
pub use common::enums::{DuplicatePolicy, SmoothingAlignment, SortKey};
pub use common::rating_exception::{ErrCode, RatingError};
pub use config::trend_config::TrendConfig;
pub use series::rating_point::RatingPoint;
pub use series::rating_series::RatingSeriesStore;
pub use trend::momentum::Momentum;
pub use trend::trend_computer::TrendComputer;
pub use trend::trend_summary::{SmoothedPoint, TrendSummary};
