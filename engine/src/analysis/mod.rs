// Analysis over converted weights
pub mod statistics;

pub use statistics::WeightStatistics;
