use crate::pokemon::{DamageRelations, NamedApiResource, Pokemon, TypeSlot};

// Sprite served when a creature has no artwork of its own.
pub const PLACEHOLDER_SPRITE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/0.png";

// Canonicalizes a loosely-typed list of type names: trimmed, lowercased,
// deduplicated. An empty result collapses to ["normal"].
pub fn normalize_types<I, S>(types: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list: Vec<String> = Vec::new();
    for t in types {
        let t = t.as_ref().trim().to_lowercase();
        if !t.is_empty() && !list.contains(&t) {
            list.push(t);
        }
    }
    if list.is_empty() {
        list.push("normal".to_string());
    }
    list
}

// Client-side filter check: a blank filter matches everything.
pub fn matches_type<I, S>(types: I, filter: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let list = normalize_types(types);
    let f = filter.trim().to_lowercase();
    if f.is_empty() {
        return true;
    }
    list.contains(&f)
}

// Post-fetch repairs for a creature document. The API occasionally omits
// structurally required fields; downstream code relies on types being
// non-empty and on a usable sprite URL.
pub fn normalize_pokemon(p: &mut Pokemon) {
    if p.types.is_empty() {
        tracing::warn!("Pokemon {} has no types defined, applying 'normal'", p.name);
        p.types = vec![TypeSlot {
            slot: 1,
            r#type: NamedApiResource {
                name: "normal".to_string(),
                url: String::new(),
            },
        }];
    }

    if p.sprite_url().is_none() {
        tracing::warn!("Pokemon {} has no sprite available", p.name);
        p.sprites.front_default = Some(PLACEHOLDER_SPRITE.to_string());
    }
}

// Damage relations collapsed into the three lists callers actually show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeMatchups {
    pub weaknesses: Vec<String>,
    pub resistances: Vec<String>,
    pub immunities: Vec<String>,
}

impl TypeMatchups {
    pub fn from_relations(relations: &DamageRelations) -> Self {
        fn names(list: &[NamedApiResource]) -> Vec<String> {
            list.iter().map(|r| r.name.clone()).collect()
        }

        Self {
            weaknesses: names(&relations.double_damage_from),
            resistances: names(&relations.half_damage_from),
            immunities: names(&relations.no_damage_from),
        }
    }
}
