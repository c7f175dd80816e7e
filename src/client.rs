use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::normalize::normalize_pokemon;
use crate::pokemon::{
    AbilityDetail, EvolutionChain, ListResponse, MoveDetail, MoveResponse, MoveSlot,
    NamedApiResource, Pokemon, PokemonSpecies, TypeRelationsResponse,
};
use crate::retry::retry;

// Custom error types for fetch operations. None of these escape the client:
// every public operation absorbs them and returns absent data instead.
#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status(reqwest::StatusCode),
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Status(status) => write!(f, "Request failed with status: {}", status),
            FetchError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

// Resilient client for the catalog API. Creature and move-detail lookups go
// through a TTL cache keyed by both ID and name; everything else hits the
// network on every call, wrapped in the retry policy.
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache_enabled: bool,
    pokemon_cache: TtlCache<Pokemon>,
    move_cache: TtlCache<MoveDetail>,
}

impl PokeApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            cache_enabled: config.cache.enabled,
            pokemon_cache: TtlCache::from_config(&config.cache),
            move_cache: TtlCache::from_config(&config.cache),
        })
    }

    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(&Config::default())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        self.get_json_absolute(&url).await
    }

    async fn get_json_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!("Fetching from URL: {}", url);
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.json::<T>().await?)
    }

    // Full name listing for client-side search, up to 2000 entries.
    pub async fn fetch_all_names(&self) -> Vec<NamedApiResource> {
        tracing::info!("Fetching all pokemon names");
        let list = retry(|| {
            self.get_json::<ListResponse<NamedApiResource>>("pokemon?limit=2000&offset=0")
        })
        .await;
        list.map(|l| l.results).unwrap_or_default()
    }

    pub async fn fetch_names_page(&self, offset: u32, limit: u32) -> Vec<NamedApiResource> {
        tracing::info!("Fetching pokemon page offset={} limit={}", offset, limit);
        let path = format!("pokemon?limit={}&offset={}", limit, offset);
        let list = retry(|| self.get_json::<ListResponse<NamedApiResource>>(&path)).await;
        list.map(|l| l.results).unwrap_or_default()
    }

    // Creature by name or numeric ID. Cached under both aliases, normalized
    // before it is stored.
    pub async fn fetch_pokemon(&self, name_or_id: &str) -> Option<Arc<Pokemon>> {
        let key = name_or_id.trim().to_lowercase();
        tracing::info!("Looking up pokemon: {}", key);

        if self.cache_enabled {
            if let Some(cached) = self.pokemon_cache.get(&key) {
                return Some(cached);
            }
        }

        let path = format!("pokemon/{}", key);
        let mut pokemon = retry(|| self.get_json::<Pokemon>(&path)).await?;
        tracing::debug!(
            "Fetched pokemon {} (ID: {}) from API",
            pokemon.name,
            pokemon.id
        );
        normalize_pokemon(&mut pokemon);

        let aliases = [pokemon.id.to_string(), pokemon.name.clone()];
        let shared = Arc::new(pokemon);
        if self.cache_enabled {
            if let Err(e) = self.pokemon_cache.put(Arc::clone(&shared), &aliases) {
                tracing::warn!("Failed to cache pokemon {}: {}", key, e);
            }
        }
        Some(shared)
    }

    // Species record, used to reach the evolution chain.
    pub async fn fetch_species(&self, id: i32) -> Option<PokemonSpecies> {
        let path = format!("pokemon-species/{}", id);
        retry(|| self.get_json::<PokemonSpecies>(&path)).await
    }

    // Chains are addressed by the absolute URL the species record carries,
    // not by a templated path.
    pub async fn fetch_evolution_chain(&self, url: &str) -> Option<EvolutionChain> {
        let url = url.trim();
        retry(|| self.get_json_absolute::<EvolutionChain>(url)).await
    }

    pub async fn fetch_ability(&self, name: &str) -> Option<AbilityDetail> {
        let key = name.trim().to_lowercase();
        let path = format!("ability/{}", key);
        retry(|| self.get_json::<AbilityDetail>(&path)).await
    }

    // The generation document has no typed schema here; only the species
    // roster is pulled out of the raw JSON, sorted by name.
    pub async fn fetch_generation_roster(&self, generation_id: i32) -> Vec<NamedApiResource> {
        tracing::info!("Fetching roster for generation {}", generation_id);
        let path = format!("generation/{}", generation_id);
        let doc = retry(|| self.get_json::<serde_json::Value>(&path)).await;
        match doc {
            Some(doc) => extract_species_roster(&doc),
            None => Vec::new(),
        }
    }

    pub async fn fetch_type_relations(&self, type_name: &str) -> Option<TypeRelationsResponse> {
        let key = type_name.trim().to_lowercase();
        tracing::info!("Fetching type relations for: {}", key);
        let path = format!("type/{}", key);
        retry(|| self.get_json::<TypeRelationsResponse>(&path)).await
    }

    // Moves ride on the full pokemon document; only the moves array is kept.
    pub async fn fetch_pokemon_moves(&self, name_or_id: &str) -> Option<Vec<MoveSlot>> {
        let key = name_or_id.trim().to_lowercase();
        tracing::info!("Fetching moves for: {}", key);
        let path = format!("pokemon/{}", key);
        let response = retry(|| self.get_json::<MoveResponse>(&path)).await?;
        Some(response.moves)
    }

    pub async fn fetch_move_detail(&self, move_name: &str) -> Option<Arc<MoveDetail>> {
        let key = move_name.trim().to_lowercase();

        if self.cache_enabled {
            if let Some(cached) = self.move_cache.get(&key) {
                return Some(cached);
            }
        }

        let path = format!("move/{}", key);
        let detail = retry(|| self.get_json::<MoveDetail>(&path)).await?;
        let shared = Arc::new(detail);
        if self.cache_enabled {
            if let Err(e) = self.move_cache.put(Arc::clone(&shared), &[&key]) {
                tracing::warn!("Failed to cache move {}: {}", key, e);
            }
        }
        Some(shared)
    }
}

// Pulls the `pokemon_species` array out of an untyped generation document.
fn extract_species_roster(doc: &serde_json::Value) -> Vec<NamedApiResource> {
    let species = doc.get("pokemon_species").and_then(|v| v.as_array());
    let mut list: Vec<NamedApiResource> = match species {
        Some(entries) => entries
            .iter()
            .map(|item| NamedApiResource {
                name: item
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                url: item
                    .get("url")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect(),
        None => Vec::new(),
    };
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}
