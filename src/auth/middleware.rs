use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::{http::header, Error, HttpMessage, HttpResponse};
use futures::future::LocalBoxFuture;

use crate::auth::config::SessionJwtConfig;
use crate::auth::session_jwt::verify_session_jwt;
use crate::enums::common::ErrorResponse;

const PUBLIC_PATHS: &[&str] = &["/", "/health", "/api-docs/openapi.json"];

fn unauthorized(message: &'static str) -> Error {
    InternalError::from_response(
        message,
        HttpResponse::Unauthorized().json(ErrorResponse::new(message)),
    )
    .into()
}

/// Verifies the bearer session token and stores its [`crate::auth::Principal`]
/// in the request extensions.
#[derive(Clone)]
pub struct AuthLayer {
    session_cfg: Rc<SessionJwtConfig>,
}

impl AuthLayer {
    pub fn new(session_cfg: SessionJwtConfig) -> Self {
        Self {
            session_cfg: Rc::new(session_cfg),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            session_cfg: self.session_cfg.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    session_cfg: Rc<SessionJwtConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.contains(&req.path()) {
            let fut = self.service.call(req);
            #[allow(clippy::redundant_async_block)]
            return Box::pin(async move { fut.await });
        }

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let Some(token) = token else {
            return Box::pin(async { Err(unauthorized("missing or invalid auth header")) });
        };

        match verify_session_jwt(&token, &self.session_cfg) {
            Ok(principal) => {
                debug!(
                    "auth: {} {} as user {} ({})",
                    req.method(),
                    req.path(),
                    principal.user_id,
                    principal.role
                );
                req.extensions_mut().insert(principal);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await })
            }
            Err(e) => {
                warn!("auth: rejected token for {}: {}", req.path(), e);
                Box::pin(async { Err(unauthorized("unauthorized")) })
            }
        }
    }
}
