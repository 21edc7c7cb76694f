use serde::{Deserialize, Deserializer};

use crate::analysis::player_stats::{HeroRecord, PlayerProfile, WinLossRecord};

// GET /players/{id}
#[derive(Debug, Deserialize, Default)]
pub struct PlayerDto {
    #[serde(default)]
    pub profile: Option<ProfileDto>,
    #[serde(default)]
    pub mmr_estimate: Option<MmrEstimateDto>,
    #[serde(default)]
    pub rank_tier: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProfileDto {
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub steamid: Option<String>,
    #[serde(default)]
    pub rank_tier: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MmrEstimateDto {
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub solo_estimate: Option<f64>,
}

// GET /players/{id}/wl
#[derive(Debug, Deserialize, Default)]
pub struct WinLossDto {
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub lose: u32,
}

// GET /players/{id}/heroes
#[derive(Debug, Deserialize, Clone)]
pub struct PlayerHeroDto {
    #[serde(deserialize_with = "number_or_string")]
    pub hero_id: u32,
    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub win: u32,
}

// GET /heroes
#[derive(Debug, Deserialize, Clone)]
pub struct HeroDto {
    pub id: u32,
    pub localized_name: String,
}

impl PlayerDto {
    /// Converts the payload into a profile, or `None` when the `profile`
    /// sub-object is missing (privacy setting on the upstream account).
    pub fn into_profile(self) -> Option<PlayerProfile> {
        let profile = self.profile?;
        let estimated_rating = self
            .mmr_estimate
            .and_then(|mmr| mmr.estimate.or(mmr.solo_estimate));

        Some(PlayerProfile {
            display_name: profile.personaname.filter(|n| !n.is_empty()),
            account_ref: profile.steamid,
            estimated_rating,
            rank_tier: profile.rank_tier.or(self.rank_tier),
        })
    }
}

impl From<WinLossDto> for WinLossRecord {
    fn from(dto: WinLossDto) -> Self {
        WinLossRecord {
            wins: dto.win,
            losses: dto.lose,
        }
    }
}

impl From<PlayerHeroDto> for HeroRecord {
    fn from(dto: PlayerHeroDto) -> Self {
        HeroRecord {
            hero_id: dto.hero_id,
            games_played: dto.games,
            wins: dto.win,
        }
    }
}

// Some payloads send ids as strings, some as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }),
    )
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Num(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        StringOrNumber::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
