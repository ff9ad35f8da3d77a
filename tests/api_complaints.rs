mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::auth_header_for;
use food_orders::build_app;
use food_orders::test_utils::test_session_config;
use serde_json::json;

#[actix_rt::test]
async fn employee_files_and_supplier_reads_complaints() {
    let (state, _store, fx) = common::memory_app_state();
    let app = test::init_service(build_app(state, test_session_config())).await;

    let req = test::TestRequest::post()
        .uri("/complaints")
        .insert_header(auth_header_for(&fx.employee))
        .set_json(json!({
            "supplier_id": fx.supplier_a_id(),
            "comment": "idli was cold",
            "rating": 2,
        }))
        .to_request();
    let body = common::read_envelope(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["data"]["user_id"], json!(fx.employee.user_id));
    assert_eq!(body["data"]["rating"], 2);
    let id = body["data"]["complaint_id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/complaints/{id}"))
        .insert_header(auth_header_for(&fx.supplier_a))
        .to_request();
    let body = common::read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"]["comment"], "idli was cold");

    let req = test::TestRequest::get()
        .uri(&format!("/complaints/{id}"))
        .insert_header(auth_header_for(&fx.supplier_b))
        .to_request();
    common::read_envelope(test::call_service(&app, req).await, StatusCode::NOT_FOUND).await;

    let req = test::TestRequest::get()
        .uri("/complaints")
        .insert_header(auth_header_for(&fx.other_employee))
        .to_request();
    let body = common::read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::get()
        .uri(&format!("/complaints/supplier/{}", fx.supplier_a_id()))
        .insert_header(auth_header_for(&fx.management))
        .to_request();
    let body = common::read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/complaints/supplier/{}", fx.supplier_a_id()))
        .insert_header(auth_header_for(&fx.supplier_b))
        .to_request();
    common::read_envelope(test::call_service(&app, req).await, StatusCode::FORBIDDEN).await;
}

#[actix_rt::test]
async fn invalid_complaints_are_rejected() {
    let (state, _store, fx) = common::memory_app_state();
    let app = test::init_service(build_app(state, test_session_config())).await;

    for (who, payload, expected) in [
        (
            &fx.supplier_a,
            json!({ "supplier_id": fx.supplier_b_id(), "comment": "rival" }),
            StatusCode::FORBIDDEN,
        ),
        (
            &fx.employee,
            json!({ "supplier_id": fx.supplier_a_id(), "comment": "  " }),
            StatusCode::BAD_REQUEST,
        ),
        (
            &fx.employee,
            json!({ "supplier_id": fx.supplier_a_id(), "comment": "bad", "rating": 9 }),
            StatusCode::BAD_REQUEST,
        ),
        (
            &fx.employee,
            json!({ "supplier_id": fx.supplier_a_id(), "comment": "later", "complaint_date": "2999-01-01" }),
            StatusCode::BAD_REQUEST,
        ),
        (
            &fx.employee,
            json!({ "supplier_id": uuid::Uuid::new_v4(), "comment": "nobody" }),
            StatusCode::NOT_FOUND,
        ),
    ] {
        let req = test::TestRequest::post()
            .uri("/complaints")
            .insert_header(auth_header_for(who))
            .set_json(payload)
            .to_request();
        common::read_envelope(test::call_service(&app, req).await, expected).await;
    }
}
