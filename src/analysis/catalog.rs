use std::collections::HashMap;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::api::client::StatsApiClient;
use crate::api::models::HeroDto;
use crate::api::transport::Transport;
use crate::error::StatsError;

/// Bidirectional hero id <-> display name index built from one roster fetch.
#[derive(Debug, Default, Clone)]
pub struct HeroIndex {
    by_id: HashMap<u32, String>,
    by_name: HashMap<String, u32>,
}

impl HeroIndex {
    /// Builds the index in fetch order. When two entries normalize to the
    /// same name, the later one owns that name.
    pub fn from_heroes(heroes: Vec<HeroDto>) -> Self {
        let mut index = HeroIndex::default();
        for hero in heroes {
            index.by_name.insert(normalize(&hero.localized_name), hero.id);
            index.by_id.insert(hero.id, hero.localized_name);
        }
        index
    }

    pub fn name_of(&self, hero_id: u32) -> Option<&str> {
        self.by_id.get(&hero_id).map(String::as_str)
    }

    /// Case-insensitive exact match.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(&normalize(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Process-wide hero roster, populated lazily on first use and never
/// invalidated afterwards.
///
/// Concurrent first callers share a single population: one of them fetches,
/// the rest wait on the same cell. A failed fetch leaves the cell empty so the
/// next lookup tries again.
#[derive(Debug, Default)]
pub struct HeroCatalog {
    index: OnceCell<HeroIndex>,
}

impl HeroCatalog {
    pub fn new() -> Self {
        HeroCatalog {
            index: OnceCell::new(),
        }
    }

    /// Returns the populated index, fetching the roster if this is the first
    /// successful use.
    pub async fn load<T: Transport>(
        &self,
        client: &StatsApiClient<T>,
    ) -> Result<&HeroIndex, StatsError> {
        self.index
            .get_or_try_init(|| async {
                match client.fetch_hero_catalog().await {
                    Ok(heroes) => {
                        let index = HeroIndex::from_heroes(heroes);
                        info!(heroes = index.len(), "hero catalog populated");
                        Ok(index)
                    }
                    Err(err) => {
                        warn!(error = %err, "hero catalog fetch failed");
                        Err(err)
                    }
                }
            })
            .await
    }

    /// The index if it has already been populated.
    pub fn cached(&self) -> Option<&HeroIndex> {
        self.index.get()
    }

    pub async fn resolve_id_to_name<T: Transport>(
        &self,
        client: &StatsApiClient<T>,
        hero_id: u32,
    ) -> Option<String> {
        let index = self.load(client).await.ok()?;
        index.name_of(hero_id).map(str::to_string)
    }

    pub async fn resolve_name_to_id<T: Transport>(
        &self,
        client: &StatsApiClient<T>,
        name: &str,
    ) -> Option<u32> {
        self.load(client).await.ok()?.id_of(name)
    }
}
