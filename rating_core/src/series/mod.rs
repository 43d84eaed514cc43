pub mod rating_point;
pub mod rating_series;
