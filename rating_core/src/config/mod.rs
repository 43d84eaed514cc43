pub mod config_with_check;
pub mod trend_config;
