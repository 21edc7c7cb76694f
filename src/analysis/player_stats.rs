use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::AppError;

/// Upstream account identifier. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(PlayerId(raw))
    }

    pub fn parse(input: &str) -> Result<Self, AppError> {
        input
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(PlayerId::new)
            .ok_or_else(|| AppError::InvalidPlayerId(input.trim().to_string()))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for PlayerId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerId::parse(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerProfile {
    pub display_name: Option<String>,
    pub account_ref: Option<String>,
    pub estimated_rating: Option<f64>,
    pub rank_tier: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
}

impl WinLossRecord {
    pub fn total_matches(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }

    pub fn win_rate(&self) -> f64 {
        win_rate(u64::from(self.wins), self.total_matches())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroRecord {
    pub hero_id: u32,
    pub games_played: u32,
    pub wins: u32,
}

impl HeroRecord {
    /// Wins as trusted for display. Upstream reporting more wins than games
    /// is clamped to the game count.
    pub fn counted_wins(&self) -> u32 {
        if self.wins > self.games_played {
            warn!(
                hero_id = self.hero_id,
                games = self.games_played,
                wins = self.wins,
                "hero record reports more wins than games, clamping"
            );
        }
        self.wins.min(self.games_played)
    }

    pub fn losses(&self) -> u32 {
        self.games_played.saturating_sub(self.wins)
    }

    pub fn win_rate(&self) -> f64 {
        win_rate(
            u64::from(self.counted_wins()),
            u64::from(self.games_played),
        )
    }
}

/// Percentage of `wins` over `total`. Zero when there are no matches.
pub fn win_rate(wins: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("  86745912 ", 86745912)]
    #[case("4294967296", 4294967296)]
    fn parses_positive_ids(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(PlayerId::parse(input).unwrap().get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("abc")]
    #[case("")]
    #[case("12.5")]
    fn rejects_non_positive_or_non_numeric_ids(#[case] input: &str) {
        assert!(matches!(
            PlayerId::parse(input),
            Err(AppError::InvalidPlayerId(_))
        ));
    }

    #[test]
    fn zero_matches_means_zero_win_rate() {
        let record = WinLossRecord::default();
        assert_eq!(record.total_matches(), 0);
        assert_eq!(record.win_rate(), 0.0);

        let hero = HeroRecord {
            hero_id: 5,
            games_played: 0,
            wins: 0,
        };
        assert_eq!(hero.win_rate(), 0.0);
    }

    #[test]
    fn win_loss_derivations() {
        let record = WinLossRecord { wins: 7, losses: 3 };
        assert_eq!(record.total_matches(), 10);
        assert!((record.win_rate() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn totals_do_not_overflow() {
        let record = WinLossRecord {
            wins: u32::MAX,
            losses: u32::MAX,
        };
        assert_eq!(record.total_matches(), 2 * u64::from(u32::MAX));
        assert!((record.win_rate() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn inconsistent_hero_record_is_clamped() {
        let hero = HeroRecord {
            hero_id: 2,
            games_played: 4,
            wins: 6,
        };
        assert_eq!(hero.losses(), 0);
        assert_eq!(hero.counted_wins(), 4);
        assert!((hero.win_rate() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hero_losses_are_games_minus_wins() {
        let hero = HeroRecord {
            hero_id: 1,
            games_played: 10,
            wins: 6,
        };
        assert_eq!(hero.losses(), 4);
        assert!((hero.win_rate() - 60.0).abs() < 1e-9);
    }
}
