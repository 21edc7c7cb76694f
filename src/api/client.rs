use serde::de::DeserializeOwned;
use tracing::debug;

use super::endpoints;
use super::models::*;
use super::transport::{HttpResponse, Transport, TransportError};
use crate::analysis::player_stats::{HeroRecord, PlayerId, PlayerProfile, WinLossRecord};
use crate::error::StatsError;

/// One fetch per resource kind against the statistics service.
///
/// Each operation issues exactly one request and classifies the outcome; no
/// retries happen here.
pub struct StatsApiClient<T> {
    transport: T,
}

impl<T: Transport> StatsApiClient<T> {
    pub fn new(transport: T) -> Self {
        StatsApiClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch_profile(&self, id: PlayerId) -> Result<PlayerProfile, StatsError> {
        let dto: PlayerDto = self.get_json(&endpoints::player(id)).await?;
        dto.into_profile().ok_or(StatsError::Hidden)
    }

    pub async fn fetch_win_loss(&self, id: PlayerId) -> Result<WinLossRecord, StatsError> {
        let dto: WinLossDto = self.get_json(&endpoints::player_win_loss(id)).await?;
        Ok(dto.into())
    }

    pub async fn fetch_hero_history(&self, id: PlayerId) -> Result<Vec<HeroRecord>, StatsError> {
        let heroes: Vec<PlayerHeroDto> = self.get_json(&endpoints::player_heroes(id)).await?;
        debug!(player = %id, records = heroes.len(), "hero history fetched");
        Ok(heroes.into_iter().map(HeroRecord::from).collect())
    }

    pub async fn fetch_hero_catalog(&self) -> Result<Vec<HeroDto>, StatsError> {
        self.get_json(endpoints::HEROES).await
    }

    async fn get_json<D: DeserializeOwned>(&self, path: &str) -> Result<D, StatsError> {
        let response = self.transport.get(path).await.map_err(network_error)?;
        decode(response)
    }
}

fn network_error(err: TransportError) -> StatsError {
    StatsError::NetworkError(err.to_string())
}

fn decode<D: DeserializeOwned>(response: HttpResponse) -> Result<D, StatsError> {
    match response.status {
        200 => serde_json::from_str(&response.body).map_err(|e| StatsError::Decode(e.to_string())),
        404 => Err(StatsError::NotFound),
        status => Err(StatsError::UpstreamError(status)),
    }
}
