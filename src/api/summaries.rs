use crate::api::{run_blocking, service_error_response};
use crate::auth::PrincipalExtractor;
use crate::enums::common::ErrorResponse;
use crate::enums::summary::{SummariesResponse, SummaryResponse};
use crate::services::SummaryService;
use actix_web::middleware::NormalizePath;
use actix_web::{get, web, HttpResponse, Responder};
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;
use uuid::Uuid;

pub(super) fn config(cfg: &mut ServiceConfig, summary_service: &SummaryService) {
    cfg.service(
        scope::scope("/order-summaries")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(summary_service.clone()))
            .service(get_monthly_totals)
            .service(get_supplier_monthly_summary),
    );
}

#[utoipa::path(
    tag = "Order summaries",
    params(
        ("supplier_id" = Uuid, Path, description = "Supplier id"),
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1 to 12"),
    ),
    responses(
        (status = 200, description = "Monthly summary of the supplier", body = SummaryResponse),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    ),
    summary = "Monthly order summary of a supplier",
)]
#[get("/monthly/{supplier_id}/{year}/{month}")]
pub(super) async fn get_supplier_monthly_summary(
    summary_service: web::Data<SummaryService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid, i32, u32)>,
) -> impl Responder {
    let actor = principal.0;
    let (supplier_id, year, month) = path.into_inner();
    let svc = summary_service.get_ref().clone();

    match run_blocking(move || svc.supplier_monthly_summary(&actor, supplier_id, year, month)).await {
        Ok(summary) => HttpResponse::Ok().json(SummaryResponse {
            success: true,
            message: format!("{} orders in {}-{:02}", summary.order_count, year, month),
            data: Some(summary),
        }),
        Err(e) => {
            warn!("get_supplier_monthly_summary: {}: {}", supplier_id, e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Order summaries",
    params(
        ("year" = i32, Path, description = "Calendar year"),
        ("month" = u32, Path, description = "Month, 1 to 12"),
    ),
    responses(
        (status = 200, description = "One summary per supplier with orders in the month", body = SummariesResponse),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 403, description = "Management only", body = ErrorResponse),
    ),
    summary = "Monthly totals across suppliers",
)]
#[get("/totals/monthly/{year}/{month}")]
pub(super) async fn get_monthly_totals(
    summary_service: web::Data<SummaryService>,
    principal: PrincipalExtractor,
    path: web::Path<(i32, u32)>,
) -> impl Responder {
    let actor = principal.0;
    let (year, month) = path.into_inner();
    let svc = summary_service.get_ref().clone();

    match run_blocking(move || svc.monthly_totals(&actor, year, month)).await {
        Ok(data) => HttpResponse::Ok().json(SummariesResponse {
            success: true,
            message: format!("{} suppliers in {}-{:02}", data.len(), year, month),
            data,
        }),
        Err(e) => {
            warn!("get_monthly_totals: {}", e);
            service_error_response(&e)
        }
    }
}
