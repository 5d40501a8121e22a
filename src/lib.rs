#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{figment::Figment, Build, Rocket};

use crate::config::{ConfigFairing, StoreFairing};
use crate::logging::LoggerFairing;
use crate::store::{Store, VotingStore};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::Config;

/// Build a server from `Rocket.toml` and `ROCKET_*` environment variables,
/// opening whichever store they configure.
pub fn build() -> Rocket<Build> {
    mount(rocket::build()).attach(StoreFairing)
}

/// Build a server around an already opened store.
pub fn rocket_for_store(figment: Figment, store: impl VotingStore + 'static) -> Rocket<Build> {
    mount(rocket::custom(figment)).manage(Store::new(store))
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
}

/// Config for in-process test servers.
#[cfg(test)]
pub(crate) fn test_figment() -> Figment {
    rocket::Config::figment()
        .merge(("jwt_secret", "a test secret"))
        .merge(("auth_ttl", 3600))
        .merge(("log_level", "off"))
}
