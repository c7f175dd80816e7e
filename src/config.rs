use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub expiration: u64,
}

impl Config {
    pub fn load() -> Result<Config, toml::de::Error> {
        let config_str = include_str!("../config/config.toml");
        toml::from_str(config_str)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://pokeapi.co/api/v2".to_string(),
                timeout: 30,
            },
            cache: CacheConfig {
                enabled: true,
                expiration: 3600,
            },
        }
    }
}
