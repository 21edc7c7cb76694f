use thiserror::Error;

/// Classified outcome of a failed stats lookup.
///
/// Every aggregator operation returns one of these instead of panicking, so a
/// caller can always tell a missing player from a hidden one or from an
/// upstream outage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Player not found")]
    NotFound,

    #[error("Player profile is hidden")]
    Hidden,

    #[error("Upstream API error: HTTP {0}")]
    UpstreamError(u16),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Could not decode upstream response: {0}")]
    Decode(String),

    #[error("Hero not recognized: {0}")]
    HeroNotRecognized(String),

    #[error("No games recorded on hero {0}")]
    NoRecordForHero(u32),

    #[error("No heroes with at least {min_games} games")]
    NoQualifyingHeroes { min_games: u32 },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid player ID '{0}'. It must be a positive number")]
    InvalidPlayerId(String),

    #[error("HTTP client error: {0}")]
    HttpError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
