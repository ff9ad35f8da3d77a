mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use food_orders::build_app;
use food_orders::test_utils::test_session_config;
use serde_json::Value;

#[actix_rt::test]
async fn root_endpoint_no_auth() {
    let (state, _store, _fx) = common::memory_app_state();
    let app = test::init_service(build_app(state, test_session_config())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Server up!");
}

#[actix_rt::test]
async fn health_endpoint_no_auth() {
    let (state, _store, _fx) = common::memory_app_state();
    let app = test::init_service(build_app(state, test_session_config())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = common::read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "ok");
}

#[actix_rt::test]
async fn openapi_document_lists_every_scope() {
    let (state, _store, _fx) = common::memory_app_state();
    let app = test::init_service(build_app(state, test_session_config())).await;

    let req = test::TestRequest::get().uri("/api-docs/openapi.json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = test::read_body_json(resp).await;

    let paths = doc["paths"].as_object().expect("paths object");
    for path in [
        "/health",
        "/orders",
        "/orders/{id}/status",
        "/food-items/{id}",
        "/complaints",
        "/order-summaries/monthly/{supplier_id}/{year}/{month}",
        "/order-summaries/totals/monthly/{year}/{month}",
    ] {
        assert!(paths.contains_key(path), "missing {path} in {:?}", paths.keys());
    }
}
