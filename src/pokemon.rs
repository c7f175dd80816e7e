// pokemon.rs
// Wire schemas for the PokeAPI resources this crate consumes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NamedApiResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pokemon {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

impl Pokemon {
    // Preferred display sprite: high-resolution artwork first, then the
    // plain front sprite.
    pub fn sprite_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<OfficialArtwork>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TypeSlot {
    pub slot: i32,
    pub r#type: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatSlot {
    pub base_stat: i32,
    pub stat: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    pub ability: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: i32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PokemonSpecies {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub evolution_chain: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EvolutionChain {
    #[serde(default)]
    pub chain: ChainLink,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChainLink {
    #[serde(default)]
    pub species: NamedApiResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EvolutionDetail {
    pub min_level: Option<i32>,
    pub item: Option<NamedApiResource>,
    pub trigger: Option<NamedApiResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AbilityDetail {
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    #[serde(default)]
    pub language: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TypeRelationsResponse {
    #[serde(default)]
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedApiResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedApiResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedApiResource>,
    #[serde(default)]
    pub double_damage_to: Vec<NamedApiResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedApiResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedApiResource>,
}

// The full pokemon document carries more than the `Pokemon` schema above;
// move lookups re-fetch it and only keep the `moves` array.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MoveResponse {
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MoveSlot {
    pub r#move: NamedApiResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: i32,
    #[serde(default)]
    pub move_learn_method: NamedApiResource,
    #[serde(default)]
    pub version_group: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MoveDetail {
    pub power: Option<i32>,
    pub accuracy: Option<i32>,
    pub pp: Option<i32>,
    #[serde(default)]
    pub r#type: NamedApiResource,
    #[serde(default)]
    pub damage_class: NamedApiResource,
}
