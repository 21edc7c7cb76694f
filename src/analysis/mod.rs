pub mod aggregator;
pub mod catalog;
pub mod player_stats;
pub mod rank;
pub mod ranking;
