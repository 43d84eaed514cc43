pub mod momentum;
pub mod trend_computer;
pub mod trend_summary;
