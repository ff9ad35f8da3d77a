use crate::config::{parsed_or, required, ConfigError};
use dotenvy::var;
use std::fmt;

#[derive(Clone)]
pub struct SessionJwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub leeway_secs: u64,
    pub expiry_secs: u64,
}

impl SessionJwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "food-orders".to_string(),
            audience: "food-orders-api".to_string(),
            leeway_secs: 60,
            // 12 hours
            expiry_secs: 12 * 60 * 60,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new(required("SESSION_JWT_SECRET")?);
        Ok(Self {
            issuer: var("SESSION_JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: var("SESSION_JWT_AUDIENCE").unwrap_or(defaults.audience),
            leeway_secs: parsed_or("SESSION_JWT_LEEWAY_SECS", defaults.leeway_secs)?,
            expiry_secs: parsed_or("SESSION_JWT_EXPIRY_SECS", defaults.expiry_secs)?,
            secret: defaults.secret,
        })
    }
}

impl fmt::Debug for SessionJwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionJwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}
