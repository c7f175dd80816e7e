use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use crate::client::PokeApiClient;
use crate::pokemon::{ChainLink, PokemonSpecies};

// Upstream chain data is not guaranteed acyclic; the walk refuses to go
// deeper than this even if the visited check were defeated.
const MAX_DEPTH: usize = 16;

// Display-ready evolution tree. Built fresh on every call, never cached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolutionNode {
    pub name: String,
    pub sprite: Option<String>,
    pub details: String,
    pub next: Vec<EvolutionNode>,
}

// Seam between the tree walk and the network: the walk only needs a sprite
// per species name.
pub(crate) trait SpriteSource {
    fn sprite_for(&self, species_name: &str) -> impl Future<Output = Option<String>>;
}

impl SpriteSource for PokeApiClient {
    async fn sprite_for(&self, species_name: &str) -> Option<String> {
        let pokemon = self.fetch_pokemon(species_name).await?;
        pokemon.sprite_url().map(|s| s.to_string())
    }
}

// Assembles the full evolution tree for a species: chain fetch, then a
// depth-first walk that fetches one creature per node for its sprite.
pub async fn build_evolution_tree(
    client: &PokeApiClient,
    species: &PokemonSpecies,
) -> Option<EvolutionNode> {
    let url = species.evolution_chain.url.trim();
    if url.is_empty() {
        tracing::warn!("Species {} has no evolution chain URL", species.name);
        return None;
    }

    let chain = client.fetch_evolution_chain(url).await?;
    let mut visited = HashSet::new();
    visited.insert(chain.chain.species.name.trim().to_lowercase());
    Some(walk(client, &chain.chain, String::new(), 0, &mut visited).await)
}

// Human-readable trigger condition for the edge leading into this link,
// taken from the first evolution detail. The chain root has no incoming
// edge and gets an empty string.
pub fn trigger_text(link: &ChainLink) -> String {
    match link.evolution_details.first() {
        None => String::new(),
        Some(detail) => {
            if let Some(level) = detail.min_level {
                format!("Level {}", level)
            } else if let Some(item) = &detail.item {
                item.name.clone()
            } else if let Some(trigger) = &detail.trigger {
                trigger.name.clone()
            } else {
                String::new()
            }
        }
    }
}

// Recursive DFS over the chain. A failed sprite lookup leaves the node
// sprite-less but keeps the branch; repeated species and over-deep links
// are skipped so malformed chains still terminate.
fn walk<'a, S>(
    source: &'a S,
    link: &'a ChainLink,
    details: String,
    depth: usize,
    visited: &'a mut HashSet<String>,
) -> Pin<Box<dyn Future<Output = EvolutionNode> + 'a>>
where
    S: SpriteSource,
{
    Box::pin(async move {
        let name = link.species.name.clone();
        let sprite = source.sprite_for(&name).await;
        if sprite.is_none() {
            tracing::debug!("No sprite resolved for species {}", name);
        }

        let mut node = EvolutionNode {
            name,
            sprite,
            details,
            next: Vec::new(),
        };

        for child in &link.evolves_to {
            if depth + 1 >= MAX_DEPTH {
                tracing::warn!(
                    "Evolution chain exceeds depth {} at {}, truncating",
                    MAX_DEPTH,
                    child.species.name
                );
                continue;
            }
            let child_key = child.species.name.trim().to_lowercase();
            if !visited.insert(child_key) {
                tracing::warn!(
                    "Evolution chain revisits species {}, skipping",
                    child.species.name
                );
                continue;
            }
            let child_details = trigger_text(child);
            let child_node = walk(source, child, child_details, depth + 1, visited).await;
            node.next.push(child_node);
        }

        node
    })
}
