use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use roster_shared::store::dynamo::TABLE_NAME;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown store backend '{0}', expected 'memory' or 'dynamodb'")]
    UnknownStore(String),

    #[error("Unknown profile '{0}', expected 'dev', 'test' or 'prod'")]
    UnknownProfile(String),

    #[error("Invalid {name} value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Which storage backend serves the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    DynamoDb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "dynamodb" | "dynamo" => Ok(StoreBackend::DynamoDb),
            _ => Err(ConfigError::UnknownStore(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Test,
    Prod,
}

impl Profile {
    /// Sample users are only seeded outside production
    pub fn seeds_sample_data(self) -> bool {
        matches!(self, Profile::Dev | Profile::Test)
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Profile::Dev),
            "test" => Ok(Profile::Test),
            "prod" => Ok(Profile::Prod),
            _ => Err(ConfigError::UnknownProfile(value.to_string())),
        }
    }
}

/// Service configuration read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub table_name: String,
    pub bind_addr: SocketAddr,
    pub base_path: String,
    pub profile: Profile,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = env_or("USER_STORE", "memory").parse()?;
        let profile = env_or("APP_PROFILE", "prod").parse()?;
        let table_name = env_or("DYNAMODB_USER_TABLE", TABLE_NAME);

        let host = env_or("HOST", DEFAULT_HOST);
        let host: IpAddr = host.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            value: host.clone(),
        })?;

        let port = match env::var("PORT") {
            Ok(port) => port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            store,
            table_name,
            bind_addr: SocketAddr::new(host, port),
            base_path: normalize_base_path(&env_or("API_BASE_PATH", "")),
            profile,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

// "", "/" -> ""; "Prod/" -> "/Prod"
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
