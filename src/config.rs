// src/config.rs
use crate::domain::audit::ReferenceScheme;
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    max_connections: u32,
    reference_scheme: ReferenceScheme,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://inventory.db?mode=rwc".into()
}

fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_database_url);

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                ConfigError::Invalid(format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))
            })?,
            None => default_max_connections(),
        };
        if max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let reference_scheme = match lookup("AUDIT_REFERENCE_SCHEME") {
            Some(raw) => raw
                .parse::<ReferenceScheme>()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?,
            None => ReferenceScheme::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            reference_scheme,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Scheme used by the secondary audit accessors.
    pub fn reference_scheme(&self) -> ReferenceScheme {
        self.reference_scheme
    }
}
