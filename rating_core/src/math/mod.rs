pub mod extremes;
pub mod rolling;
