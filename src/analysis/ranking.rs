use std::cmp::Ordering;

use super::player_stats::HeroRecord;

pub const DEFAULT_MIN_GAMES: u32 = 5;
pub const DEFAULT_TOP_N: usize = 3;

/// Selects the best heroes of a history.
///
/// Records below `min_games` are dropped entirely. The rest are ordered by
/// win rate descending, then games played descending, then hero id
/// ascending, and cut to `top_n`.
pub fn top_heroes(records: &[HeroRecord], min_games: u32, top_n: usize) -> Vec<HeroRecord> {
    let mut qualifying: Vec<HeroRecord> = records
        .iter()
        .filter(|r| r.games_played >= min_games)
        .copied()
        .collect();

    qualifying.sort_by(compare_for_ranking);
    qualifying.truncate(top_n);
    qualifying
}

pub fn compare_for_ranking(a: &HeroRecord, b: &HeroRecord) -> Ordering {
    compare_win_rate(b, a)
        .then_with(|| b.games_played.cmp(&a.games_played))
        .then_with(|| a.hero_id.cmp(&b.hero_id))
}

// Exact comparison of wins/games without going through floats.
fn compare_win_rate(a: &HeroRecord, b: &HeroRecord) -> Ordering {
    let (a_wins, a_games) = (u64::from(a.counted_wins()), u64::from(a.games_played));
    let (b_wins, b_games) = (u64::from(b.counted_wins()), u64::from(b.games_played));

    match (a_games, b_games) {
        (0, 0) => Ordering::Equal,
        (0, _) => 0.cmp(&b_wins),
        (_, 0) => a_wins.cmp(&0),
        _ => (a_wins * b_games).cmp(&(b_wins * a_games)),
    }
}
