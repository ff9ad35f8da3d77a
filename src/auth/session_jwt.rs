use crate::auth::config::SessionJwtConfig;
use crate::auth::principal::Principal;
use crate::models::common::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SessionJwtError {
    #[error("signing error: {0}")]
    Sign(String),
    #[error("verification error: {0}")]
    Verify(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String, // user_id
    pub role: Role,
    pub role_id: Uuid,
    pub iat: u64,
    pub exp: u64,
}

fn now_secs() -> Result<u64, SessionJwtError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| SessionJwtError::Sign(e.to_string()))
}

/// Signs a session for `principal`. There is no login endpoint; operators and
/// tests mint tokens through this.
pub fn issue_session_jwt(principal: &Principal, cfg: &SessionJwtConfig) -> Result<String, SessionJwtError> {
    let now = now_secs()?;
    let claims = SessionClaims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: principal.user_id.to_string(),
        role: principal.role,
        role_id: principal.role_id,
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| SessionJwtError::Sign(e.to_string()))
}

pub fn verify_session_jwt(token: &str, cfg: &SessionJwtConfig) -> Result<Principal, SessionJwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.leeway = cfg.leeway_secs;
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| SessionJwtError::Verify(e.to_string()))?;
    let user_id: Uuid = data
        .claims
        .sub
        .parse()
        .map_err(|e| SessionJwtError::Verify(format!("invalid sub: {e}")))?;
    Ok(Principal::new(user_id, data.claims.role, data.claims.role_id))
}
