mod common;

use std::sync::Arc;

use chrono::Utc;

use diesel::prelude::*;
use food_orders::config::PolicyConfig;
use food_orders::db::{
    ComplaintOperations, DbConnection, FoodItemOperations, OrderOperations, PgPool,
    RepositoryError, UserOperations,
};
use food_orders::enums::orders::{
    CreateOrderRequest, OrderFilter, OrderLineRequest, ReceivedItem, TransitionRequest,
};
use food_orders::models::catalog::RemovalOutcome;
use food_orders::models::common::{MealType, OrderStatus};
use food_orders::models::orders::{NewOrder, OrderDetails, OrderStatusChanges, OrderStatusUpdate};
use food_orders::services::authorization::OrderScope;
use food_orders::test_utils::{TestFixtures, TEST_DEPARTMENT_ID};
use food_orders::traits::{CatalogStore, OrderStore};
use food_orders::AppState;

fn pg_state(pool: &PgPool) -> AppState {
    AppState::new(
        Arc::new(OrderOperations::new(pool.clone())),
        Arc::new(FoodItemOperations::new(pool.clone())),
        Arc::new(ComplaintOperations::new(pool.clone())),
        Arc::new(UserOperations::new(pool.clone())),
        PolicyConfig::default(),
    )
}

fn place(state: &AppState, fx: &TestFixtures) -> OrderDetails {
    state
        .order_service
        .create_order(
            &fx.employee,
            CreateOrderRequest {
                supplier_id: fx.supplier_a_id(),
                department_id: TEST_DEPARTMENT_ID,
                meal_type: MealType::Breakfast,
                order_date: None,
                order_items: vec![
                    OrderLineRequest {
                        food_item_id: fx.supplier_a_items[0].food_item_id,
                        quantity: 2,
                        user_id: fx.employee.user_id,
                    },
                    OrderLineRequest {
                        food_item_id: fx.supplier_a_items[1].food_item_id,
                        quantity: 1,
                        user_id: fx.other_employee.user_id,
                    },
                ],
            },
        )
        .expect("create order")
}

fn received_counts(pool: &PgPool, order: uuid::Uuid) -> Vec<Option<i32>> {
    use food_orders::db::schema::order_items::dsl::*;
    let mut conn = DbConnection::new(pool).expect("db connection");
    order_items
        .filter(order_id.eq(order))
        .order(order_item_id.asc())
        .select(received_number_of_item)
        .load(conn.connection())
        .expect("load received counts")
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn create_order_persists_lines_and_totals() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let state = pg_state(&pool);
    let created = place(&state, &fx);

    assert_eq!(created.items.len(), 2);
    assert_eq!(created.order.total_order_price, 350);
    assert_eq!(created.order.version, 0);

    let ops = OrderOperations::new(pool.clone());
    let loaded = ops.get_order(created.order.order_id).expect("get order");
    assert_eq!(loaded, created);

    let listed = ops
        .list_orders(&OrderScope::CreatedBy(fx.employee.user_id), &OrderFilter::default())
        .expect("list orders");
    assert_eq!(listed.len(), 1);
    assert!(ops
        .list_orders(&OrderScope::Supplier(fx.supplier_b_id()), &OrderFilter::default())
        .expect("list orders")
        .is_empty());
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn non_completion_writes_received_counts_and_bumps_version() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let state = pg_state(&pool);
    let created = place(&state, &fx);

    let updated = state
        .order_service
        .transition(
            &fx.employee,
            created.order.order_id,
            TransitionRequest {
                reason: Some("one idli short".to_string()),
                received_items: vec![ReceivedItem {
                    order_item_id: created.items[0].order_item_id,
                    received_quantity: 1,
                }],
                ..TransitionRequest::to(OrderStatus::NonCompleted)
            },
        )
        .expect("transition");

    assert_eq!(updated.order.version, 1);
    assert_eq!(updated.order.to_be_paid_price, 250);
    assert_eq!(received_counts(&pool, created.order.order_id), vec![Some(1), None]);
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn reopening_clears_the_stored_collector() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let state = pg_state(&pool);
    let order_id = place(&state, &fx).order.order_id;

    let collected = state
        .order_service
        .transition(
            &fx.supplier_a,
            order_id,
            TransitionRequest {
                collected_by_user_id: Some(fx.employee.user_id),
                ..TransitionRequest::to(OrderStatus::Collected)
            },
        )
        .expect("collect");
    assert_eq!(collected.order.collected_by_user_id, Some(fx.employee.user_id));

    let reopened = state
        .order_service
        .transition(&fx.supplier_a, order_id, TransitionRequest::to(OrderStatus::Prepared))
        .expect("reopen");
    assert_eq!(reopened.order.status, OrderStatus::Prepared);
    assert_eq!(reopened.order.collected_by_user_id, None);
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn orders_must_name_an_existing_department() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(pool.clone());

    let order_id = uuid::Uuid::new_v4();
    let result = ops.create_order(
        NewOrder {
            order_id,
            order_creator_user_id: fx.employee.user_id,
            supplier_id: fx.supplier_a_id(),
            department_id: TEST_DEPARTMENT_ID + 999,
            meal_type: MealType::Lunch,
            status: OrderStatus::Pending,
            order_date: Utc::now().date_naive(),
            total_request_order_items: 0,
            total_order_price: 0,
            total_order_employee_price: 0,
            total_order_hospital_price: 0,
            to_be_paid_price: 0,
            to_be_paid_employee_price: 0,
            to_be_paid_hospital_price: 0,
            version: 0,
        },
        Vec::new(),
    );
    assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    assert!(matches!(ops.get_order(order_id), Err(RepositoryError::NotFound(_))));
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn stale_version_update_is_rejected() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let state = pg_state(&pool);
    let created = place(&state, &fx);
    let ops = OrderOperations::new(pool.clone());

    let prepared = OrderStatusUpdate {
        changes: OrderStatusChanges {
            status: OrderStatus::Prepared,
            collected_by_user_id: None,
            non_completion_reason: None,
            total_received_order_items: None,
            to_be_paid_price: None,
            to_be_paid_employee_price: None,
            to_be_paid_hospital_price: None,
        },
        received: Vec::new(),
    };
    ops.update_order_status(created.order.order_id, 0, prepared.clone())
        .expect("first update");

    let result = ops.update_order_status(created.order.order_id, 0, prepared.clone());
    assert!(matches!(result, Err(RepositoryError::VersionConflict(id)) if id == created.order.order_id));

    let missing = ops.update_order_status(uuid::Uuid::new_v4(), 0, prepared);
    assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
}

#[test]
#[ignore = "requires Docker or DATABASE_URL"]
fn referenced_food_items_are_deactivated_not_deleted() {
    let (pool, fx) = common::setup_pool_with_fixtures();
    let state = pg_state(&pool);
    place(&state, &fx);
    let catalog = FoodItemOperations::new(pool.clone());

    let idli = fx.supplier_a_items[0].food_item_id;
    let removal = catalog.remove_food_item(idli).expect("remove idli");
    assert_eq!(removal.outcome, RemovalOutcome::Deactivated);
    assert!(!catalog.get_food_item(idli).expect("idli still stored").available);

    let chai = fx.supplier_b_items[0].food_item_id;
    let removal = catalog.remove_food_item(chai).expect("remove chai");
    assert_eq!(removal.outcome, RemovalOutcome::Deleted);
    assert!(matches!(
        catalog.get_food_item(chai),
        Err(RepositoryError::NotFound(_))
    ));
}
