mod complaints;
mod errors;
mod food_items;
mod orders;
mod summaries;

use crate::auth::{AuthLayer, SessionJwtConfig};
use crate::enums::common::HealthResponse;
use crate::services::ServiceError;
use crate::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::guard::{self, Guard, GuardContext};
use actix_web::http::header;
use actix_web::{get, web, App, HttpResponse, Responder};
pub(crate) use errors::{
    default_error_handler, default_path_error_handler, default_query_error_handler,
    service_error_response,
};
use utoipa::openapi::OpenApi;
use utoipa_actix_web::service_config::ServiceConfig;
use utoipa_actix_web::AppExt;

/// Matches `application/json` bodies, with or without parameters.
pub struct ContentTypeHeader;

impl Guard for ContentTypeHeader {
    fn check(&self, ctx: &GuardContext<'_>) -> bool {
        ctx.head()
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    }
}

/// POST and PUT requests carrying JSON. Reads never enter a scope guarded by this.
pub(crate) fn json_write() -> impl Guard {
    guard::All(ContentTypeHeader).and(guard::Any(guard::Post()).or(guard::Put()))
}

pub(crate) async fn run_blocking<F, R>(f: F) -> Result<R, ServiceError>
where
    F: FnOnce() -> Result<R, ServiceError> + Send + 'static,
    R: Send + 'static,
{
    web::block(f).await.map_err(|e| {
        error!("run_blocking: blocking task failed: {}", e);
        ServiceError::Dependency(e.to_string())
    })?
}

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is up")),
    summary = "Liveness banner",
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is healthy", body = HealthResponse)),
    summary = "Health check",
)]
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        message: "ok".to_string(),
    })
}

#[get("/api-docs/openapi.json")]
async fn openapi_json(api: web::Data<OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(api.get_ref())
}

pub(crate) fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .service(health)
        .configure(|cfg| orders::config(cfg, &state.order_service))
        .configure(|cfg| food_items::config(cfg, &state.catalog_service))
        .configure(|cfg| complaints::config(cfg, &state.complaint_service))
        .configure(|cfg| summaries::config(cfg, &state.summary_service));
}

/// The full application: routes, JSON error handling, session auth and the
/// generated OpenAPI document.
pub fn build_app(
    state: AppState,
    session_cfg: SessionJwtConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (app, api) = App::new()
        .into_utoipa_app()
        .app_data(web::JsonConfig::default().error_handler(default_error_handler))
        .app_data(web::QueryConfig::default().error_handler(default_query_error_handler))
        .app_data(web::PathConfig::default().error_handler(default_path_error_handler))
        .configure(|cfg| configure(cfg, &state))
        .split_for_parts();

    app.app_data(web::Data::new(api))
        .service(openapi_json)
        .wrap(AuthLayer::new(session_cfg))
}
