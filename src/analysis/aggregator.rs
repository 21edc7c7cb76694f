use std::sync::Arc;

use tracing::debug;

use super::catalog::{HeroCatalog, HeroIndex};
use super::player_stats::{HeroRecord, PlayerId, PlayerProfile, WinLossRecord};
use super::rank::rank_tier_name;
use super::ranking::top_heroes;
use crate::api::client::StatsApiClient;
use crate::api::transport::Transport;
use crate::error::StatsError;

pub const UNKNOWN_PLAYER: &str = "Unknown player";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedProfileView {
    pub player_id: PlayerId,
    pub display_name: String,
    pub account_ref: String,
    pub rating: String,
    pub rank: String,
    pub total_matches: u64,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedHero {
    pub position: usize,
    pub hero_id: u32,
    pub hero_name: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedHeroView {
    pub player_id: PlayerId,
    pub min_games: u32,
    pub heroes: Vec<RankedHero>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroDetailView {
    pub player_id: PlayerId,
    pub hero_id: u32,
    pub hero_name: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

/// Combines client fetches into the three derived views.
///
/// Views are rebuilt on every call. Only the hero catalog outlives a request,
/// and it is shared by every clone of the catalog handle.
pub struct StatsAggregator<T> {
    client: StatsApiClient<T>,
    catalog: Arc<HeroCatalog>,
}

impl<T: Transport> StatsAggregator<T> {
    pub fn new(client: StatsApiClient<T>) -> Self {
        Self::with_catalog(client, Arc::new(HeroCatalog::new()))
    }

    pub fn with_catalog(client: StatsApiClient<T>, catalog: Arc<HeroCatalog>) -> Self {
        StatsAggregator { client, catalog }
    }

    pub fn client(&self) -> &StatsApiClient<T> {
        &self.client
    }

    pub fn catalog(&self) -> &Arc<HeroCatalog> {
        &self.catalog
    }

    pub async fn build_profile_summary(
        &self,
        id: PlayerId,
    ) -> Result<AggregatedProfileView, StatsError> {
        let (profile, win_loss) =
            tokio::join!(self.client.fetch_profile(id), self.client.fetch_win_loss(id));

        // A missing or hidden profile wins over any win/loss outcome.
        if let Err(err @ (StatsError::NotFound | StatsError::Hidden)) = &profile {
            return Err(err.clone());
        }
        let win_loss = win_loss?;
        let profile = profile?;

        Ok(summarize(id, profile, win_loss))
    }

    pub async fn build_top_heroes(
        &self,
        id: PlayerId,
        min_games: u32,
        top_n: usize,
    ) -> Result<RankedHeroView, StatsError> {
        let (history, catalog) = tokio::join!(
            self.client.fetch_hero_history(id),
            self.catalog.load(&self.client)
        );
        let history = history?;
        if !history.iter().any(|r| r.games_played >= min_games) {
            return Err(StatsError::NoQualifyingHeroes { min_games });
        }

        let index = catalog.ok();
        let heroes: Vec<RankedHero> = top_heroes(&history, min_games, top_n)
            .iter()
            .enumerate()
            .map(|(i, record)| RankedHero {
                position: i + 1,
                hero_id: record.hero_id,
                hero_name: display_name(index, record.hero_id),
                games: record.games_played,
                wins: record.counted_wins(),
                losses: record.losses(),
                win_rate: round2(record.win_rate()),
            })
            .collect();

        Ok(RankedHeroView {
            player_id: id,
            min_games,
            heroes,
        })
    }

    /// `hero` is either a numeric hero id or a display name (any case).
    pub async fn build_hero_detail(
        &self,
        id: PlayerId,
        hero: &str,
    ) -> Result<HeroDetailView, StatsError> {
        let (index, history) = tokio::join!(
            self.catalog.load(&self.client),
            self.client.fetch_hero_history(id)
        );
        let index = index.ok();

        let hero_id = resolve_hero(index, hero)
            .ok_or_else(|| StatsError::HeroNotRecognized(hero.trim().to_string()))?;
        debug!(player = %id, hero_id, "hero resolved");

        let record = history?
            .into_iter()
            .find(|r| r.hero_id == hero_id && r.games_played > 0)
            .ok_or(StatsError::NoRecordForHero(hero_id))?;

        Ok(detail(id, index, record))
    }
}

fn summarize(id: PlayerId, profile: PlayerProfile, win_loss: WinLossRecord) -> AggregatedProfileView {
    AggregatedProfileView {
        player_id: id,
        display_name: profile
            .display_name
            .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        account_ref: profile
            .account_ref
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        rating: profile
            .estimated_rating
            .map(|r| format!("{:.0}", r))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        rank: rank_tier_name(profile.rank_tier),
        total_matches: win_loss.total_matches(),
        wins: win_loss.wins,
        losses: win_loss.losses,
        win_rate: round2(win_loss.win_rate()),
    }
}

fn detail(id: PlayerId, index: Option<&HeroIndex>, record: HeroRecord) -> HeroDetailView {
    HeroDetailView {
        player_id: id,
        hero_id: record.hero_id,
        hero_name: display_name(index, record.hero_id),
        games: record.games_played,
        wins: record.counted_wins(),
        losses: record.losses(),
        win_rate: round2(record.win_rate()),
    }
}

fn resolve_hero(index: Option<&HeroIndex>, hero: &str) -> Option<u32> {
    let hero = hero.trim();
    if let Ok(hero_id) = hero.parse::<u32>() {
        return (hero_id > 0).then_some(hero_id);
    }
    index?.id_of(hero)
}

fn display_name(index: Option<&HeroIndex>, hero_id: u32) -> String {
    index
        .and_then(|index| index.name_of(hero_id))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown hero ({})", hero_id))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, HEROES_JSON};

    fn id() -> PlayerId {
        PlayerId::parse("42").unwrap()
    }

    fn aggregator(transport: FakeTransport) -> StatsAggregator<FakeTransport> {
        StatsAggregator::new(StatsApiClient::new(transport))
    }

    #[tokio::test]
    async fn summary_combines_profile_and_win_loss() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/players/42", 200, r#"{"profile": {"personaname": "Dendi"}}"#)
                .with("/players/42/wl", 200, r#"{"win": 7, "lose": 3}"#),
        );
        let view = agg.build_profile_summary(id()).await.unwrap();

        assert_eq!(view.display_name, "Dendi");
        assert_eq!(view.wins, 7);
        assert_eq!(view.losses, 3);
        assert_eq!(view.total_matches, 10);
        assert_eq!(view.win_rate, 70.0);
        assert_eq!(view.rating, NOT_AVAILABLE);
        assert_eq!(view.rank, "Unknown");
    }

    #[tokio::test]
    async fn summary_defaults_absent_profile_fields() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/players/42", 200, r#"{"profile": {}, "mmr_estimate": {"estimate": 2875.4}, "rank_tier": 52}"#)
                .with("/players/42/wl", 200, r#"{"win": 0, "lose": 0}"#),
        );
        let view = agg.build_profile_summary(id()).await.unwrap();

        assert_eq!(view.display_name, UNKNOWN_PLAYER);
        assert_eq!(view.account_ref, NOT_AVAILABLE);
        assert_eq!(view.rating, "2875");
        assert_eq!(view.rank, "Legend 2");
        assert_eq!(view.total_matches, 0);
        assert_eq!(view.win_rate, 0.0);
    }

    #[tokio::test]
    async fn hidden_profile_dominates_successful_win_loss() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/players/42", 200, "{}")
                .with("/players/42/wl", 200, r#"{"win": 7, "lose": 3}"#),
        );
        assert_eq!(agg.build_profile_summary(id()).await, Err(StatsError::Hidden));
    }

    #[tokio::test]
    async fn not_found_profile_dominates_failed_win_loss() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/players/42", 404, "")
                .with("/players/42/wl", 500, ""),
        );
        assert_eq!(agg.build_profile_summary(id()).await, Err(StatsError::NotFound));
    }

    #[tokio::test]
    async fn win_loss_failure_propagates() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/players/42", 200, r#"{"profile": {}}"#)
                .timing_out("/players/42/wl"),
        );
        assert!(matches!(
            agg.build_profile_summary(id()).await,
            Err(StatsError::NetworkError(_))
        ));
    }

    #[tokio::test]
    async fn top_heroes_filters_and_names() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with(
                    "/players/42/heroes",
                    200,
                    r#"[{"hero_id":1,"games":10,"win":6},{"hero_id":2,"games":3,"win":3}]"#,
                ),
        );
        let view = agg.build_top_heroes(id(), 5, 3).await.unwrap();

        assert_eq!(view.heroes.len(), 1);
        let hero = &view.heroes[0];
        assert_eq!(hero.position, 1);
        assert_eq!(hero.hero_name, "Anti-Mage");
        assert_eq!(hero.losses, 4);
        assert_eq!(hero.win_rate, 60.0);
    }

    #[tokio::test]
    async fn top_heroes_uses_placeholder_when_catalog_unavailable() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 502, "")
                .with("/players/42/heroes", 200, r#"[{"hero_id":123,"games":9,"win":3}]"#),
        );
        let view = agg.build_top_heroes(id(), 5, 3).await.unwrap();
        assert_eq!(view.heroes[0].hero_name, "Unknown hero (123)");
        assert_eq!(view.heroes[0].win_rate, 33.33);
    }

    #[tokio::test]
    async fn top_heroes_without_qualifying_records() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 200, r#"[{"hero_id":1,"games":4,"win":4}]"#),
        );
        assert_eq!(
            agg.build_top_heroes(id(), 5, 3).await,
            Err(StatsError::NoQualifyingHeroes { min_games: 5 })
        );
    }

    #[tokio::test]
    async fn top_heroes_with_zero_top_n_is_empty_not_an_error() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 200, r#"[{"hero_id":1,"games":9,"win":4}]"#),
        );
        let view = agg.build_top_heroes(id(), 5, 0).await.unwrap();
        assert!(view.heroes.is_empty());
    }

    #[tokio::test]
    async fn top_heroes_fails_fast_on_history_error() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 429, ""),
        );
        assert_eq!(
            agg.build_top_heroes(id(), 5, 3).await,
            Err(StatsError::UpstreamError(429))
        );
    }

    #[tokio::test]
    async fn hero_detail_by_name_any_case() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with(
                    "/players/42/heroes",
                    200,
                    r#"[{"hero_id":39,"games":20,"win":11},{"hero_id":14,"games":2,"win":0}]"#,
                ),
        );
        let view = agg.build_hero_detail(id(), "queen of PAIN").await.unwrap();

        assert_eq!(view.hero_id, 39);
        assert_eq!(view.hero_name, "Queen of Pain");
        assert_eq!(view.games, 20);
        assert_eq!(view.wins, 11);
        assert_eq!(view.losses, 9);
        assert_eq!(view.win_rate, 55.0);
    }

    #[tokio::test]
    async fn hero_detail_by_numeric_id() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 200, r#"[{"hero_id":14,"games":2,"win":0}]"#),
        );
        let view = agg.build_hero_detail(id(), "14").await.unwrap();
        assert_eq!(view.hero_name, "Pudge");
        assert_eq!(view.win_rate, 0.0);
    }

    #[tokio::test]
    async fn unknown_hero_name_is_not_recognized() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 200, "[]"),
        );
        assert_eq!(
            agg.build_hero_detail(id(), "NonexistentHero").await,
            Err(StatsError::HeroNotRecognized("NonexistentHero".to_string()))
        );
    }

    #[tokio::test]
    async fn known_hero_without_games_is_no_record() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with(
                    "/players/42/heroes",
                    200,
                    r#"[{"hero_id":2,"games":0,"win":0},{"hero_id":1,"games":3,"win":1}]"#,
                ),
        );
        assert_eq!(
            agg.build_hero_detail(id(), "Axe").await,
            Err(StatsError::NoRecordForHero(2))
        );
        assert_eq!(
            agg.build_hero_detail(id(), "Pudge").await,
            Err(StatsError::NoRecordForHero(14))
        );
    }

    #[tokio::test]
    async fn catalog_is_shared_across_requests() {
        let agg = aggregator(
            FakeTransport::new()
                .with("/heroes", 200, HEROES_JSON)
                .with("/players/42/heroes", 200, r#"[{"hero_id":1,"games":9,"win":4}]"#),
        );
        agg.build_top_heroes(id(), 5, 3).await.unwrap();
        agg.build_hero_detail(id(), "anti-mage").await.unwrap();
        agg.build_top_heroes(id(), 1, 1).await.unwrap();
        assert_eq!(agg.client().transport().calls("/heroes"), 1);
        assert_eq!(agg.client().transport().calls("/players/42/heroes"), 3);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(200.0 / 3.0), 66.67);
        assert_eq!(round2(70.0), 70.0);
    }
}
