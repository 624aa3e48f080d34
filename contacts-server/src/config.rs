//! Environment based configuration
//!
//! Every key is optional. Values are read from the process environment, after
//! loading a `.env` file from the working directory when one exists.

use std::{env, net::SocketAddr, str::FromStr};
use tracing::trace;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Location of the contacts collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            database: "contactsdb".to_string(),
            collection: "contacts".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", &lookup, defaults.port)?,
            database: lookup("DB").unwrap_or(defaults.database),
            collection: lookup("COLLECTION").unwrap_or(defaults.collection),
        })
    }

    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}/", self.host, self.port)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    Mongo,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            _ => Err("expected one of `mongodb` or `memory`".to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub storage: StorageKind,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            trace!(%err, "no .env file loaded");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: parse_or("LISTEN_ADDR", &lookup, ([0, 0, 0, 0], 3000).into())?,
            storage: parse_or("STORAGE", &lookup, StorageKind::default())?,
            store: StoreConfig::from_lookup(&lookup)?,
        })
    }
}

fn parse_or<T>(
    key: &'static str,
    lookup: impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|err: T::Err| ConfigError {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}
