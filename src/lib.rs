//! OpenDota statistics client: fetches player data, combines it into win
//! rates and ranked hero lists, and renders the result as text.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use analysis::aggregator::{
    AggregatedProfileView, HeroDetailView, RankedHero, RankedHeroView, StatsAggregator,
};
pub use analysis::catalog::HeroCatalog;
pub use analysis::player_stats::PlayerId;
pub use api::client::StatsApiClient;
pub use api::transport::{HttpTransport, Transport};
pub use error::{AppError, StatsError};
