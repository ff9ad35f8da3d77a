use crate::api::{json_write, run_blocking, service_error_response};
use crate::auth::PrincipalExtractor;
use crate::enums::common::ErrorResponse;
use crate::enums::orders::{
    CreateOrderRequest, OrderFilter, OrderResponse, OrdersResponse, TransitionRequest,
};
use crate::models::orders::Order;
use crate::services::{OrderService, ServiceError};
use actix_web::middleware::NormalizePath;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;
use uuid::Uuid;

pub(super) fn config(cfg: &mut ServiceConfig, order_service: &OrderService) {
    cfg.service(
        scope::scope("/orders")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(order_service.clone()))
            .service(
                scope::scope("")
                    .guard(json_write())
                    .service(create_order)
                    .service(update_order_status),
            )
            .service(
                scope::scope("")
                    .service(get_orders)
                    .service(get_orders_by_user)
                    .service(get_orders_by_supplier)
                    .service(get_order_by_id),
            ),
    );
}

fn orders_response(
    fn_name: &str,
    result: Result<Vec<Order>, ServiceError>,
) -> HttpResponse {
    match result {
        Ok(data) => {
            debug!("{}: returning {} orders", fn_name, data.len());
            HttpResponse::Ok().json(OrdersResponse {
                success: true,
                message: format!("{} orders", data.len()),
                data,
            })
        }
        Err(e) => {
            warn!("{}: {}", fn_name, e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with price snapshots", body = OrderResponse),
        (status = 400, description = "Invalid order", body = ErrorResponse),
        (status = 403, description = "Role may not create orders", body = ErrorResponse),
        (status = 404, description = "Supplier or food item not found", body = ErrorResponse),
    ),
    summary = "Create an order",
)]
#[post("")]
pub(super) async fn create_order(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    req_data: web::Json<CreateOrderRequest>,
) -> impl Responder {
    let actor = principal.0;
    let request = req_data.into_inner();
    let svc = order_service.get_ref().clone();

    match run_blocking(move || svc.create_order(&actor, request)).await {
        Ok(details) => {
            info!(
                "create_order: created order {} with {} lines",
                details.order.order_id,
                details.items.len()
            );
            HttpResponse::Created().json(OrderResponse {
                success: true,
                message: "order created".to_string(),
                data: Some(details),
            })
        }
        Err(e) => {
            warn!("create_order: {}", e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Orders visible to the caller, newest first", body = OrdersResponse),
    ),
    summary = "List orders",
)]
#[get("")]
pub(super) async fn get_orders(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    filter: web::Query<OrderFilter>,
) -> impl Responder {
    let actor = principal.0;
    let filter = filter.into_inner();
    let svc = order_service.get_ref().clone();

    orders_response(
        "get_orders",
        run_blocking(move || svc.list_orders(&actor, &filter)).await,
    )
}

#[utoipa::path(
    tag = "Orders",
    params(("user_id" = Uuid, Path, description = "Creator of the orders")),
    responses(
        (status = 200, description = "Orders created by the user", body = OrdersResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
    ),
    summary = "List orders by creator",
)]
#[get("/userid/{user_id}")]
pub(super) async fn get_orders_by_user(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let actor = principal.0;
    let user_id = path.into_inner().0;
    let svc = order_service.get_ref().clone();

    orders_response(
        "get_orders_by_user",
        run_blocking(move || svc.list_orders_by_creator(&actor, user_id)).await,
    )
}

#[utoipa::path(
    tag = "Orders",
    params(("supplier_id" = Uuid, Path, description = "Supplier the orders were placed with")),
    responses(
        (status = 200, description = "Orders of the supplier", body = OrdersResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
    ),
    summary = "List orders by supplier",
)]
#[get("/supplier/{supplier_id}")]
pub(super) async fn get_orders_by_supplier(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let actor = principal.0;
    let supplier_id = path.into_inner().0;
    let svc = order_service.get_ref().clone();

    orders_response(
        "get_orders_by_supplier",
        run_blocking(move || svc.list_orders_by_supplier(&actor, supplier_id)).await,
    )
}

#[utoipa::path(
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order and its lines", body = OrderResponse),
        (status = 404, description = "No such order visible to the caller", body = ErrorResponse),
    ),
    summary = "Get an order",
)]
#[get("/{id}")]
pub(super) async fn get_order_by_id(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let actor = principal.0;
    let order_id = path.into_inner().0;
    let svc = order_service.get_ref().clone();

    match run_blocking(move || svc.get_order(&actor, order_id)).await {
        Ok(details) => HttpResponse::Ok().json(OrderResponse {
            success: true,
            message: "order found".to_string(),
            data: Some(details),
        }),
        Err(e) => {
            debug!("get_order_by_id: {}: {}", order_id, e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Status changed", body = OrderResponse),
        (status = 400, description = "Invalid transition", body = ErrorResponse),
        (status = 403, description = "Role may not set this status", body = ErrorResponse),
        (status = 404, description = "No such order visible to the caller", body = ErrorResponse),
        (status = 409, description = "Order changed concurrently", body = ErrorResponse),
    ),
    summary = "Change the status of an order",
)]
#[put("/{id}/status")]
pub(super) async fn update_order_status(
    order_service: web::Data<OrderService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
    req_data: web::Json<TransitionRequest>,
) -> impl Responder {
    let actor = principal.0;
    let order_id = path.into_inner().0;
    let request = req_data.into_inner();
    let svc = order_service.get_ref().clone();

    match run_blocking(move || svc.transition(&actor, order_id, request)).await {
        Ok(details) => HttpResponse::Ok().json(OrderResponse {
            success: true,
            message: format!("order is now {}", details.order.status),
            data: Some(details),
        }),
        Err(e) => {
            warn!("update_order_status: order {}: {}", order_id, e);
            service_error_response(&e)
        }
    }
}
