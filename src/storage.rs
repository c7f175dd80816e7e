use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

// Key/value persistence collaborator. Failures of any kind degrade to
// "value absent" on read and `false` on write; nothing here raises.
pub trait KeyValueStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool;
    fn remove(&self, key: &str) -> bool;
}

// File-per-key JSON store rooted at a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    // Keys become file names; anything path-hostile is flattened out.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let json = fs::read_to_string(&path).ok()?;
        if json.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to deserialize stored value for {}: {}", key, e);
                None
            }
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize value for {}: {}", key, e);
                return false;
            }
        };
        match fs::write(self.path_for(key), json) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to persist value for {}: {}", key, e);
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        fs::remove_file(self.path_for(key)).is_ok()
    }
}

// A user-pinned creature with a free-form note and tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub fav_id: Uuid,
    pub pokemon_id: i32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Favorite {
    pub fn new(pokemon_id: i32) -> Self {
        Self {
            fav_id: Uuid::new_v4(),
            pokemon_id,
            note: String::new(),
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (JsonFileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("pokedex-client-test-{}", Uuid::new_v4()));
        let store = JsonFileStore::new(&dir).unwrap();
        (store, dir)
    }

    #[test]
    fn test_round_trips_favorites() {
        let (store, dir) = temp_store();

        let favorites = vec![Favorite::new(6), Favorite::new(25)];
        assert!(store.set("favorites", &favorites));

        let loaded: Vec<Favorite> = store.get("favorites").unwrap();
        assert_eq!(loaded, favorites);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let (store, dir) = temp_store();
        let loaded: Option<Vec<Favorite>> = store.get("nothing-here");
        assert!(loaded.is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_payload_is_absent_not_an_error() {
        let (store, dir) = temp_store();

        fs::write(store.path_for("favorites"), "not json at all").unwrap();
        let loaded: Option<Vec<Favorite>> = store.get("favorites");
        assert!(loaded.is_none());

        fs::write(store.path_for("blank"), "   ").unwrap();
        let loaded: Option<String> = store.get("blank");
        assert!(loaded.is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_remove_deletes_the_key() {
        let (store, dir) = temp_store();

        assert!(store.set("note", &"pinned".to_string()));
        assert!(store.remove("note"));
        let loaded: Option<String> = store.get("note");
        assert!(loaded.is_none());
        assert!(!store.remove("note"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_hostile_keys_stay_inside_the_directory() {
        let (store, dir) = temp_store();
        let path = store.path_for("../escape/attempt");
        assert!(path.starts_with(&dir));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_favorite_new_assigns_unique_ids() {
        let a = Favorite::new(1);
        let b = Favorite::new(1);
        assert_ne!(a.fav_id, b.fav_id);
    }
}
