use chrono::Duration;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::store::{MemoryStore, MongoStore, Store, StoreResult};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    auth_ttl: u32,
    // secrets
    jwt_secret: String,
}

impl Config {
    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to sign JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Which backing holds voters, candidates, ballots and elections.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    Mongodb,
}

/// Configuration for the store.
#[derive(Debug, Deserialize)]
struct StoreConfig {
    #[serde(default)]
    store: Backend,
    // secrets
    db_uri: Option<String>,
    #[serde(default = "default_db_name")]
    db_name: String,
    /// Load the demo voters, candidates and elections into an empty store.
    #[serde(default = "default_seed")]
    seed: bool,
}

fn default_db_name() -> String {
    "voting".to_string()
}

fn default_seed() -> bool {
    true
}

/// A fairing that loads the store config, opens the configured backing,
/// performs any setup necessary, and places a [`Store`] into managed state.
pub struct StoreFairing;

impl StoreFairing {
    async fn open(config: &StoreConfig) -> StoreResult<Option<Store>> {
        match config.store {
            Backend::Memory => {
                let store = if config.seed {
                    MemoryStore::seeded()
                } else {
                    MemoryStore::new()
                };
                info!("Using in-memory store");
                Ok(Some(Store::new(store)))
            }
            Backend::Mongodb => {
                let Some(uri) = config.db_uri.as_deref() else {
                    error!("`db_uri` must be set to use the MongoDB store");
                    return Ok(None);
                };
                info!("Loaded database config, connecting...");
                let store = MongoStore::connect(uri, &config.db_name).await?;
                store.prepare().await?;
                if config.seed {
                    store.seed_if_empty().await?;
                }
                info!("...database connection online!");
                Ok(Some(Store::new(store)))
            }
        }
    }
}

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Store",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<StoreConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load store config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let store = match Self::open(&config).await {
            Ok(Some(store)) => store,
            Ok(None) => return Err(rocket),
            Err(e) => {
                error!("Failed to open {:?} store: {e}", config.store);
                return Err(rocket);
            }
        };

        rocket = rocket.manage(store);
        Ok(rocket)
    }
}
