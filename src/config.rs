use crate::auth::SessionJwtConfig;
use crate::services::authorization::CatalogWritePolicy;
use crate::services::lifecycle::SequencingPolicy;
use dotenvy::var;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn parsed_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

fn flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

/// Deployment choices the order and catalog rules depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub sequencing: SequencingPolicy,
    pub catalog_writes: CatalogWritePolicy,
}

impl PolicyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            sequencing: parsed_or("ORDER_SEQUENCING", SequencingPolicy::Loose)?,
            catalog_writes: CatalogWritePolicy {
                management_can_edit: flag("MANAGEMENT_CAN_EDIT_CATALOG", false)?,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_pool_size: u32,
    pub host: String,
    pub port: u16,
    pub session: SessionJwtConfig,
    pub policy: PolicyConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_pool_size: parsed_or("DATABASE_POOL_SIZE", 20)?,
            host: var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed_or("PORT", 8080)?,
            session: SessionJwtConfig::from_env()?,
            policy: PolicyConfig::from_env()?,
        })
    }
}
