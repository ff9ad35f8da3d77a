use crate::enums::common::ErrorResponse;
use crate::services::ServiceError;
use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse};

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let message = format!("invalid request body: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    )
    .into()
}

pub(crate) fn default_query_error_handler(
    err: actix_web::error::QueryPayloadError,
    req: &HttpRequest,
) -> Error {
    warn!("Bad query in request: {}: {}", req.full_url(), err);
    let message = format!("invalid query: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    )
    .into()
}

pub(crate) fn default_path_error_handler(
    err: actix_web::error::PathError,
    req: &HttpRequest,
) -> Error {
    warn!("Bad path in request: {}: {}", req.full_url(), err);
    let message = format!("invalid path: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    )
    .into()
}

/// Maps a core error onto the response envelope. Dependency details stay in
/// the log.
pub(crate) fn service_error_response(e: &ServiceError) -> HttpResponse {
    match e {
        ServiceError::Validation { .. } => HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
        ServiceError::Forbidden => HttpResponse::Forbidden().json(ErrorResponse::new(e.to_string())),
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(e.to_string())),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(ErrorResponse::new(e.to_string())),
        ServiceError::Dependency(detail) => {
            error!("dependency failure: {}", detail);
            HttpResponse::InternalServerError().json(ErrorResponse::new("internal server error"))
        }
    }
}
