use crate::api::{json_write, run_blocking, service_error_response};
use crate::auth::PrincipalExtractor;
use crate::enums::catalog::{
    FoodItemFilter, FoodItemRemovalResponse, FoodItemRequest, FoodItemResponse, FoodItemsResponse,
};
use crate::enums::common::ErrorResponse;
use crate::models::catalog::{FoodItem, UpdateFoodItem};
use crate::services::{CatalogService, ServiceError};
use actix_web::middleware::NormalizePath;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;
use uuid::Uuid;

pub(super) fn config(cfg: &mut ServiceConfig, catalog_service: &CatalogService) {
    cfg.service(
        scope::scope("/food-items")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(catalog_service.clone()))
            .service(
                scope::scope("")
                    .guard(json_write())
                    .service(create_food_item)
                    .service(update_food_item),
            )
            .service(
                scope::scope("")
                    .service(get_food_items)
                    .service(get_available_food_items)
                    .service(get_food_items_by_supplier)
                    .service(get_food_item)
                    .service(delete_food_item),
            ),
    );
}

fn item_response(
    fn_name: &str,
    result: Result<FoodItem, ServiceError>,
    ok: impl FnOnce(&FoodItem) -> String,
) -> HttpResponse {
    match result {
        Ok(item) => HttpResponse::Ok().json(FoodItemResponse {
            success: true,
            message: ok(&item),
            data: Some(item),
        }),
        Err(e) => {
            warn!("{}: {}", fn_name, e);
            service_error_response(&e)
        }
    }
}

fn items_response(fn_name: &str, result: Result<Vec<FoodItem>, ServiceError>) -> HttpResponse {
    match result {
        Ok(data) => {
            debug!("{}: returning {} food items", fn_name, data.len());
            HttpResponse::Ok().json(FoodItemsResponse {
                success: true,
                message: format!("{} food items", data.len()),
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
    tag = "Food items",
    request_body = FoodItemRequest,
    responses(
        (status = 201, description = "Food item created", body = FoodItemResponse),
        (status = 400, description = "Invalid food item", body = ErrorResponse),
        (status = 403, description = "Caller may not edit this catalog", body = ErrorResponse),
    ),
    summary = "Create a food item",
)]
#[post("")]
pub(super) async fn create_food_item(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    req_data: web::Json<FoodItemRequest>,
) -> impl Responder {
    let actor = principal.0;
    let request = req_data.into_inner();
    let svc = catalog_service.get_ref().clone();

    match run_blocking(move || svc.create_food_item(&actor, request)).await {
        Ok(item) => HttpResponse::Created().json(FoodItemResponse {
            success: true,
            message: format!("food item {} created", item.food_item_id),
            data: Some(item),
        }),
        Err(e) => {
            warn!("create_food_item: {}", e);
            service_error_response(&e)
        }
    }
}

#[utoipa::path(
    tag = "Food items",
    params(FoodItemFilter),
    responses((status = 200, description = "Food items visible to the caller", body = FoodItemsResponse)),
    summary = "List food items",
)]
#[get("")]
pub(super) async fn get_food_items(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    filter: web::Query<FoodItemFilter>,
) -> impl Responder {
    let actor = principal.0;
    let filter = filter.into_inner();
    let svc = catalog_service.get_ref().clone();

    items_response(
        "get_food_items",
        run_blocking(move || svc.list_food_items(&actor, &filter)).await,
    )
}

#[utoipa::path(
    tag = "Food items",
    responses((status = 200, description = "Every available food item", body = FoodItemsResponse)),
    summary = "Today's specials",
)]
#[get("/available")]
pub(super) async fn get_available_food_items(
    catalog_service: web::Data<CatalogService>,
    _principal: PrincipalExtractor,
) -> impl Responder {
    let svc = catalog_service.get_ref().clone();

    items_response(
        "get_available_food_items",
        run_blocking(move || svc.list_available_food_items()).await,
    )
}

#[utoipa::path(
    tag = "Food items",
    params(("supplier_id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Food items of the supplier", body = FoodItemsResponse),
        (status = 403, description = "Not permitted", body = ErrorResponse),
    ),
    summary = "List food items of a supplier",
)]
#[get("/supplier/{supplier_id}")]
pub(super) async fn get_food_items_by_supplier(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    path: web::Path<(Uuid,)>,
) -> impl Responder {
    let actor = principal.0;
    let supplier_id = path.into_inner().0;
    let svc = catalog_service.get_ref().clone();

    items_response(
        "get_food_items_by_supplier",
        run_blocking(move || svc.list_food_items_by_supplier(&actor, supplier_id)).await,
    )
}

#[utoipa::path(
    tag = "Food items",
    params(("id" = i32, Path, description = "Food item id")),
    responses(
        (status = 200, description = "The food item", body = FoodItemResponse),
        (status = 404, description = "Food item not found", body = ErrorResponse),
    ),
    summary = "Get a food item",
)]
#[get("/{id}")]
pub(super) async fn get_food_item(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let actor = principal.0;
    let food_item_id = path.into_inner().0;
    let svc = catalog_service.get_ref().clone();

    item_response(
        "get_food_item",
        run_blocking(move || svc.get_food_item(&actor, food_item_id)).await,
        |item| item.name.clone(),
    )
}

#[utoipa::path(
    tag = "Food items",
    params(("id" = i32, Path, description = "Food item id")),
    request_body = UpdateFoodItem,
    responses(
        (status = 200, description = "Food item updated", body = FoodItemResponse),
        (status = 400, description = "Invalid change set", body = ErrorResponse),
        (status = 403, description = "Caller may not edit this item", body = ErrorResponse),
        (status = 404, description = "Food item not found", body = ErrorResponse),
    ),
    summary = "Update a food item",
)]
#[put("/{id}")]
pub(super) async fn update_food_item(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateFoodItem>,
) -> impl Responder {
    let actor = principal.0;
    let food_item_id = path.into_inner().0;
    let changes = req_data.into_inner();
    let svc = catalog_service.get_ref().clone();

    item_response(
        "update_food_item",
        run_blocking(move || svc.update_food_item(&actor, food_item_id, changes)).await,
        |item| format!("food item {} updated", item.food_item_id),
    )
}

#[utoipa::path(
    tag = "Food items",
    params(("id" = i32, Path, description = "Food item id")),
    responses(
        (status = 200, description = "Deleted, or retired when past orders reference it", body = FoodItemRemovalResponse),
        (status = 403, description = "Caller may not edit this item", body = ErrorResponse),
        (status = 404, description = "Food item not found", body = ErrorResponse),
    ),
    summary = "Delete a food item",
)]
#[delete("/{id}")]
pub(super) async fn delete_food_item(
    catalog_service: web::Data<CatalogService>,
    principal: PrincipalExtractor,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let actor = principal.0;
    let food_item_id = path.into_inner().0;
    let svc = catalog_service.get_ref().clone();

    match run_blocking(move || svc.delete_food_item(&actor, food_item_id)).await {
        Ok(removal) => HttpResponse::Ok().json(FoodItemRemovalResponse {
            success: true,
            message: format!("food item {} {:?}", food_item_id, removal.outcome).to_lowercase(),
            data: Some(removal),
        }),
        Err(e) => {
            warn!("delete_food_item: {}: {}", food_item_id, e);
            service_error_response(&e)
        }
    }
}
