mod common;

use chrono::NaiveDate;
use food_orders::enums::orders::{CreateOrderRequest, OrderLineRequest, ReceivedItem, TransitionRequest};
use food_orders::models::common::{MealType, OrderStatus};
use food_orders::models::orders::OrderDetails;
use food_orders::services::pricing::PriceTotals;
use food_orders::services::summary::month_bounds;
use food_orders::services::ServiceError;
use food_orders::test_utils::{TestFixtures, TEST_DEPARTMENT_ID};
use food_orders::AppState;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn place(
    state: &AppState,
    fx: &TestFixtures,
    supplier_id: Uuid,
    food_item_id: i32,
    quantity: i32,
    on: NaiveDate,
) -> OrderDetails {
    state
        .order_service
        .create_order(
            &fx.employee,
            CreateOrderRequest {
                supplier_id,
                department_id: TEST_DEPARTMENT_ID,
                meal_type: MealType::Lunch,
                order_date: Some(on),
                order_items: vec![OrderLineRequest {
                    food_item_id,
                    quantity,
                    user_id: fx.employee.user_id,
                }],
            },
        )
        .unwrap()
}

#[test]
fn month_bounds_cover_the_whole_month() {
    assert_eq!(month_bounds(2024, 2).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
    assert_eq!(month_bounds(2025, 2).unwrap(), (date(2025, 2, 1), date(2025, 2, 28)));
    assert_eq!(month_bounds(2025, 12).unwrap(), (date(2025, 12, 1), date(2025, 12, 31)));
    for month in [0, 13] {
        assert!(matches!(
            month_bounds(2025, month),
            Err(ServiceError::Validation { .. })
        ));
    }
}

#[test]
fn supplier_summary_splits_running_and_payable_totals() {
    let (state, _store, fx) = common::memory_app_state();
    let idli = fx.supplier_a_items[0].food_item_id;
    let thali = fx.supplier_a_items[1].food_item_id;

    // Completed: 2 idli, all received.
    let completed = place(&state, &fx, fx.supplier_a_id(), idli, 2, date(2025, 1, 5));
    state
        .order_service
        .transition(
            &fx.employee,
            completed.order.order_id,
            TransitionRequest::to(OrderStatus::Completed),
        )
        .unwrap();

    // Non-completed: 2 thali, one received.
    let short = place(&state, &fx, fx.supplier_a_id(), thali, 2, date(2025, 1, 20));
    state
        .order_service
        .transition(
            &fx.employee,
            short.order.order_id,
            TransitionRequest {
                reason: Some("one thali missing".to_string()),
                received_items: vec![ReceivedItem {
                    order_item_id: short.items[0].order_item_id,
                    received_quantity: 1,
                }],
                ..TransitionRequest::to(OrderStatus::NonCompleted)
            },
        )
        .unwrap();

    // Still pending: counted in the running totals only.
    place(&state, &fx, fx.supplier_a_id(), idli, 1, date(2025, 1, 31));
    // Outside the month.
    place(&state, &fx, fx.supplier_a_id(), idli, 5, date(2025, 2, 1));

    let summary = state
        .summary_service
        .supplier_monthly_summary(&fx.supplier_a, fx.supplier_a_id(), 2025, 1)
        .unwrap();

    assert_eq!(summary.order_count, 3);
    assert_eq!(summary.completed_count, 1);
    assert_eq!(summary.non_completed_count, 1);
    assert_eq!(summary.requested_items, 5);
    assert_eq!(summary.received_items, 3);
    assert_eq!(
        summary.ordered,
        PriceTotals {
            price: 200 + 300 + 100,
            employee_price: 160 + 240 + 80,
            hospital_price: 240 + 360 + 120,
        }
    );
    assert_eq!(
        summary.to_be_paid,
        PriceTotals {
            price: 200 + 150,
            employee_price: 160 + 120,
            hospital_price: 240 + 180,
        }
    );
}

#[test]
fn summary_access_and_lookup_errors() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.summary_service;

    let empty = service
        .supplier_monthly_summary(&fx.management, fx.supplier_b_id(), 2025, 3)
        .unwrap();
    assert_eq!(empty.order_count, 0);
    assert_eq!(empty.to_be_paid, PriceTotals::default());

    assert!(matches!(
        service.supplier_monthly_summary(&fx.supplier_b, fx.supplier_a_id(), 2025, 3),
        Err(ServiceError::Forbidden)
    ));
    assert!(matches!(
        service.supplier_monthly_summary(&fx.employee, fx.supplier_a_id(), 2025, 3),
        Err(ServiceError::Forbidden)
    ));
    assert!(matches!(
        service.supplier_monthly_summary(&fx.management, Uuid::new_v4(), 2025, 3),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.supplier_monthly_summary(&fx.management, fx.supplier_a_id(), 2025, 13),
        Err(ServiceError::Validation { .. })
    ));
}

#[test]
fn monthly_totals_group_by_supplier_for_management() {
    let (state, _store, fx) = common::memory_app_state();
    let idli = fx.supplier_a_items[0].food_item_id;
    let chai = fx.supplier_b_items[0].food_item_id;

    place(&state, &fx, fx.supplier_a_id(), idli, 1, date(2025, 4, 2));
    place(&state, &fx, fx.supplier_a_id(), idli, 3, date(2025, 4, 9));
    place(&state, &fx, fx.supplier_b_id(), chai, 4, date(2025, 4, 30));

    let totals = state.summary_service.monthly_totals(&fx.management, 2025, 4).unwrap();
    assert_eq!(totals.len(), 2);
    let mut expected = [fx.supplier_a_id(), fx.supplier_b_id()];
    expected.sort();
    let suppliers: Vec<Uuid> = totals.iter().map(|s| s.supplier_id).collect();
    assert_eq!(suppliers, expected.to_vec());

    let a = totals.iter().find(|s| s.supplier_id == fx.supplier_a_id()).unwrap();
    assert_eq!(a.order_count, 2);
    assert_eq!(a.ordered.price, 400);
    assert_eq!(a.to_be_paid, PriceTotals::default());

    let b = totals.iter().find(|s| s.supplier_id == fx.supplier_b_id()).unwrap();
    assert_eq!(b.ordered.employee_price, 60);

    assert!(state.summary_service.monthly_totals(&fx.management, 2025, 5).unwrap().is_empty());
    assert!(matches!(
        state.summary_service.monthly_totals(&fx.supplier_a, 2025, 4),
        Err(ServiceError::Forbidden)
    ));
}
