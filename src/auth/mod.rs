pub mod config;
pub mod extractors;
pub mod middleware;
pub mod principal;
pub mod session_jwt;

pub use config::SessionJwtConfig;
pub use extractors::PrincipalExtractor;
pub use middleware::AuthLayer;
pub use principal::Principal;
pub use session_jwt::{issue_session_jwt, verify_session_jwt, SessionJwtError};
