pub mod aggregator;
pub mod aligned_table;
pub mod comparison_table;
pub mod leaderboard;
