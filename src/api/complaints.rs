use crate::api::{json_write, run_blocking, service_error_response};
use crate::auth::PrincipalExtractor;
use crate::enums::common::ErrorResponse;
use crate::enums::complaints::{ComplaintRequest, ComplaintResponse, ComplaintsResponse};
use crate::models::complaints::Complaint;
use crate::services::{ComplaintService, ServiceError};
use actix_web::middleware::NormalizePath;
use actix_web::{get, post, web, HttpResponse, Responder};
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;
use uuid::Uuid;

pub(super) fn config(cfg: &mut ServiceConfig, complaint_service: &ComplaintService) {
    cfg.service(
        scope::scope("/complaints")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(complaint_service.clone()))
            .service(scope::scope("").guard(json_write()).service(file_complaint))
            .service(
                scope::scope("")
                    .service(get_complaints)
                    .service(get_complaints_by_supplier)
                    .service(get_complaint),
            ),
    );
}

fn complaints_response(fn_name: &str, result: Result<Vec<Complaint>, ServiceError>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ComplaintsResponse {
            success: true,
            message: format!("{} complaints", data.len()),
            data,
        }),
        Err(e) => {
            warn!("{}: {}", fn_name, e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Complaints",
    request_body = ComplaintRequest,
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintResponse),
        (status = 400, description = "Invalid complaint", body = ErrorResponse),
        (status = 403, description = "Suppliers may not file complaints", body = ErrorResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    ),
    summary = "File a complaint against a supplier",
)]
#[post("")]
pub(super) async fn file_complaint(
    complaint_service: web::Data<ComplaintService>,
    principal: PrincipalExtractor,
    req_data: web::Json<ComplaintRequest>,
) -> impl Responder {
    let actor = principal.0;
    let request = req_data.into_inner();
    let svc = complaint_service.get_ref().clone();

    match run_blocking(move || svc.file_complaint(&actor, request)).await {
        Ok(complaint) => HttpResponse::Created().json(ComplaintResponse {
            success: true,
            message: "complaint filed".to_string(),
            data: Some(complaint),
        }),
        Err(e) => {
            warn!("file_complaint: {}", e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Complaints",
    responses((status = 200, description = "Complaints visible to the caller", body = ComplaintsResponse)),
    summary = "List complaints",
)]
#[get("")]
pub(super) async fn get_complaints(
    complaint_service: web::Data<ComplaintService>,
    principal: PrincipalExtractor,
) -> impl Responder {
    let actor = principal.0;
    let svc = complaint_service.get_ref().clone();

    complaints_response(
        "get_complaints",
        run_blocking(move || svc.list_complaints(&actor)).await,
    )
}

#[utoipa::path(
    tag = "Complaints",
    params(("supplier_id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Complaints against the supplier", body = ComplaintsResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
    ),
    summary = "List complaints against a supplier",
)]
#[get("/supplier/{supplier_id}")]
pub(super) async fn get_complaints_by_supplier(
    complaint_service: web::Data<ComplaintService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let actor = principal.0;
    let supplier_id = path.into_inner().0;
    let svc = complaint_service.get_ref().clone();

    complaints_response(
        "get_complaints_by_supplier",
        run_blocking(move || svc.list_complaints_by_supplier(&actor, supplier_id)).await,
    )
}

#[utoipa::path(
    tag = "Complaints",
    params(("id" = i32, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "The complaint", body = ComplaintResponse),
        (status = 404, description = "No such complaint visible to the caller", body = ErrorResponse),
    ),
    summary = "Get a complaint",
)]
#[get("/{id}")]
pub(super) async fn get_complaint(
    complaint_service: web::Data<ComplaintService>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let actor = principal.0;
    let complaint_id = path.into_inner().0;
    let svc = complaint_service.get_ref().clone();

    match run_blocking(move || svc.get_complaint(&actor, complaint_id)).await {
        Ok(complaint) => HttpResponse::Ok().json(ComplaintResponse {
            success: true,
            message: "complaint found".to_string(),
            data: Some(complaint),
        }),
        Err(e) => {
            debug!("get_complaint: {}: {}", complaint_id, e);
            service_error_response(&e)
        }
    }
}
