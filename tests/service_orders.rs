mod common;

use food_orders::enums::orders::{
    CreateOrderRequest, OrderFilter, OrderLineRequest, ReceivedItem, TransitionRequest,
};
use food_orders::models::catalog::UpdateFoodItem;
use food_orders::models::common::{MealType, OrderStatus};
use food_orders::models::orders::{OrderDetails, OrderStatusChanges, OrderStatusUpdate};
use food_orders::services::ServiceError;
use food_orders::config::PolicyConfig;
use food_orders::services::lifecycle::SequencingPolicy;
use food_orders::test_utils::{memory_state, TestFixtures, TEST_DEPARTMENT_ID};
use food_orders::traits::{CatalogStore, OrderStore};
use food_orders::AppState;
use uuid::Uuid;

fn request_for(fx: &TestFixtures, lines: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        supplier_id: fx.supplier_a_id(),
        department_id: TEST_DEPARTMENT_ID,
        meal_type: MealType::Breakfast,
        order_date: None,
        order_items: lines
            .iter()
            .map(|&(food_item_id, quantity)| OrderLineRequest {
                food_item_id,
                quantity,
                user_id: fx.employee.user_id,
            })
            .collect(),
    }
}

fn idli_and_thali(state: &AppState, fx: &TestFixtures) -> OrderDetails {
    let idli = fx.supplier_a_items[0].food_item_id;
    let thali = fx.supplier_a_items[1].food_item_id;
    state
        .order_service
        .create_order(&fx.employee, request_for(fx, &[(idli, 2), (thali, 1)]))
        .expect("create order")
}

#[test]
fn create_order_snapshots_prices_and_totals() {
    let (state, store, fx) = common::memory_app_state();
    let created = idli_and_thali(&state, &fx);

    let order = &created.order;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.version, 0);
    assert_eq!(order.order_creator_user_id, fx.employee.user_id);
    assert_eq!(order.total_request_order_items, 3);
    assert_eq!(
        (
            order.total_order_price,
            order.total_order_employee_price,
            order.total_order_hospital_price
        ),
        (350, 280, 420)
    );
    assert_eq!(order.to_be_paid_price, order.total_order_price);
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.items[0].food_item_name, "Idli");
    assert_eq!(created.items[0].unit_price, 100);

    // A later price change does not touch the placed order.
    store
        .update_food_item(
            fx.supplier_a_items[0].food_item_id,
            UpdateFoodItem {
                base_price: Some(500),
                ..UpdateFoodItem::default()
            },
        )
        .unwrap();
    let reloaded = state
        .order_service
        .get_order(&fx.employee, order.order_id)
        .unwrap();
    assert_eq!(reloaded.order.total_order_price, 350);
    assert_eq!(reloaded.items[0].unit_price, 100);
}

#[test]
fn create_order_rejects_bad_lines() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.order_service;
    let idli = fx.supplier_a_items[0].food_item_id;
    let fish = fx.supplier_a_items[2].food_item_id;
    let chai = fx.supplier_b_items[0].food_item_id;

    let empty = service.create_order(&fx.employee, request_for(&fx, &[]));
    assert!(matches!(empty, Err(ServiceError::Validation { .. })));

    let zero = service.create_order(&fx.employee, request_for(&fx, &[(idli, 0)]));
    assert!(matches!(zero, Err(ServiceError::Validation { ref field, .. }) if field == "quantity"));

    let unavailable = service.create_order(&fx.employee, request_for(&fx, &[(fish, 1)]));
    assert!(matches!(unavailable, Err(ServiceError::Validation { .. })));

    let other_supplier = service.create_order(&fx.employee, request_for(&fx, &[(chai, 1)]));
    assert!(matches!(other_supplier, Err(ServiceError::Validation { .. })));

    let missing = service.create_order(&fx.employee, request_for(&fx, &[(9999, 1)]));
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));

    let mut unknown_beneficiary = request_for(&fx, &[(idli, 1)]);
    unknown_beneficiary.order_items[0].user_id = Uuid::new_v4();
    assert!(matches!(
        service.create_order(&fx.employee, unknown_beneficiary),
        Err(ServiceError::Validation { .. })
    ));

    let mut unknown_supplier = request_for(&fx, &[(idli, 1)]);
    unknown_supplier.supplier_id = Uuid::new_v4();
    assert!(matches!(
        service.create_order(&fx.employee, unknown_supplier),
        Err(ServiceError::NotFound(_))
    ));

    assert!(matches!(
        service.create_order(&fx.supplier_a, request_for(&fx, &[(idli, 1)])),
        Err(ServiceError::Forbidden)
    ));
    assert!(service
        .list_orders(&fx.management, &OrderFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn visibility_is_scoped_by_role() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.order_service;
    let created = idli_and_thali(&state, &fx);
    let order_id = created.order.order_id;

    assert!(service.get_order(&fx.management, order_id).is_ok());
    assert!(service.get_order(&fx.supplier_a, order_id).is_ok());
    assert!(matches!(
        service.get_order(&fx.other_employee, order_id),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.get_order(&fx.supplier_b, order_id),
        Err(ServiceError::NotFound(_))
    ));

    let filter = OrderFilter::default();
    assert_eq!(service.list_orders(&fx.employee, &filter).unwrap().len(), 1);
    assert!(service.list_orders(&fx.other_employee, &filter).unwrap().is_empty());
    assert!(service.list_orders(&fx.supplier_b, &filter).unwrap().is_empty());

    assert_eq!(
        service
            .list_orders_by_creator(&fx.management, fx.employee.user_id)
            .unwrap()
            .len(),
        1
    );
    assert!(matches!(
        service.list_orders_by_creator(&fx.other_employee, fx.employee.user_id),
        Err(ServiceError::Forbidden)
    ));
    assert!(matches!(
        service.list_orders_by_supplier(&fx.supplier_b, fx.supplier_a_id()),
        Err(ServiceError::Forbidden)
    ));
    assert_eq!(
        service
            .list_orders_by_supplier(&fx.supplier_a, fx.supplier_a_id())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn list_orders_applies_filters_newest_first() {
    let (state, _store, fx) = common::memory_app_state();
    let first = idli_and_thali(&state, &fx);
    let second = idli_and_thali(&state, &fx);

    let all = state
        .order_service
        .list_orders(&fx.management, &OrderFilter::default())
        .unwrap();
    assert_eq!(all[0].order_id, second.order.order_id);
    assert_eq!(all[1].order_id, first.order.order_id);

    let lunch_only = OrderFilter {
        meal_type: Some(MealType::Lunch),
        ..OrderFilter::default()
    };
    assert!(state
        .order_service
        .list_orders(&fx.management, &lunch_only)
        .unwrap()
        .is_empty());
}

#[test]
fn full_lifecycle_from_pending_to_completed() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.order_service;
    let order_id = idli_and_thali(&state, &fx).order.order_id;

    let prepared = service
        .transition(&fx.supplier_a, order_id, TransitionRequest::to(OrderStatus::Prepared))
        .unwrap();
    assert_eq!(prepared.order.status, OrderStatus::Prepared);
    assert_eq!(prepared.order.version, 1);

    let collected = service
        .transition(
            &fx.supplier_a,
            order_id,
            TransitionRequest {
                collected_by_user_id: Some(fx.employee.user_id),
                ..TransitionRequest::to(OrderStatus::Collected)
            },
        )
        .unwrap();
    assert_eq!(collected.order.collected_by_user_id, Some(fx.employee.user_id));

    let completed = service
        .transition(&fx.employee, order_id, TransitionRequest::to(OrderStatus::Completed))
        .unwrap();
    assert_eq!(completed.order.status, OrderStatus::Completed);
    assert_eq!(completed.order.total_received_order_items, 3);
    assert_eq!(completed.order.to_be_paid_price, 350);
    assert_eq!(completed.order.version, 3);

    let reopened = service.transition(
        &fx.supplier_a,
        order_id,
        TransitionRequest::to(OrderStatus::Pending),
    );
    assert!(matches!(reopened, Err(ServiceError::Validation { ref field, .. }) if field == "status"));
}

#[test]
fn reopening_a_collected_order_forgets_who_collected_it() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.order_service;
    let order_id = idli_and_thali(&state, &fx).order.order_id;

    service
        .transition(
            &fx.supplier_a,
            order_id,
            TransitionRequest {
                collected_by_user_id: Some(fx.employee.user_id),
                ..TransitionRequest::to(OrderStatus::Collected)
            },
        )
        .unwrap();

    let reopened = service
        .transition(&fx.supplier_a, order_id, TransitionRequest::to(OrderStatus::Pending))
        .unwrap();
    assert_eq!(reopened.order.status, OrderStatus::Pending);
    assert_eq!(reopened.order.collected_by_user_id, None);
    assert_eq!(reopened.order.version, 2);

    let stored = service.get_order(&fx.management, order_id).unwrap();
    assert_eq!(stored.order.collected_by_user_id, None);
}

#[test]
fn order_service_reports_its_sequencing_policy() {
    let (loose, _store, _fx) = common::memory_app_state();
    assert_eq!(loose.order_service.sequencing(), SequencingPolicy::Loose);

    let (strict, _store, _fx) = memory_state(PolicyConfig {
        sequencing: SequencingPolicy::Strict,
        ..PolicyConfig::default()
    });
    assert_eq!(strict.order_service.sequencing(), SequencingPolicy::Strict);
}

#[test]
fn non_completion_recomputes_to_be_paid() {
    let (state, _store, fx) = common::memory_app_state();
    let created = idli_and_thali(&state, &fx);
    let idli_line = created.items[0].order_item_id;

    let updated = state
        .order_service
        .transition(
            &fx.employee,
            created.order.order_id,
            TransitionRequest {
                reason: Some("one idli missing".to_string()),
                received_items: vec![ReceivedItem {
                    order_item_id: idli_line,
                    received_quantity: 1,
                }],
                ..TransitionRequest::to(OrderStatus::NonCompleted)
            },
        )
        .unwrap();

    assert_eq!(updated.order.status, OrderStatus::NonCompleted);
    assert_eq!(updated.order.to_be_paid_price, 250);
    assert_eq!(updated.order.to_be_paid_employee_price, 200);
    assert_eq!(updated.order.to_be_paid_hospital_price, 300);
    assert_eq!(updated.order.total_order_price, 350);
    assert_eq!(updated.items[0].received_number_of_item, Some(1));
    assert_eq!(
        updated.order.non_completion_reason.as_deref(),
        Some("one idli missing")
    );
}

#[test]
fn rejected_transitions_leave_the_order_untouched() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.order_service;
    let order_id = idli_and_thali(&state, &fx).order.order_id;

    let no_reason = service.transition(
        &fx.employee,
        order_id,
        TransitionRequest {
            reason: Some("  ".to_string()),
            ..TransitionRequest::to(OrderStatus::NonCompleted)
        },
    );
    assert!(matches!(no_reason, Err(ServiceError::Validation { ref field, .. }) if field == "reason"));

    let wrong_role = service.transition(&fx.supplier_a, order_id, TransitionRequest::to(OrderStatus::Completed));
    assert!(matches!(wrong_role, Err(ServiceError::Forbidden)));

    let other_supplier = service.transition(&fx.supplier_b, order_id, TransitionRequest::to(OrderStatus::Prepared));
    assert!(matches!(other_supplier, Err(ServiceError::NotFound(_))));

    let unknown_collector = service.transition(
        &fx.supplier_a,
        order_id,
        TransitionRequest {
            collected_by_user_id: Some(Uuid::new_v4()),
            ..TransitionRequest::to(OrderStatus::Collected)
        },
    );
    assert!(matches!(unknown_collector, Err(ServiceError::Validation { .. })));

    let current = service.get_order(&fx.management, order_id).unwrap();
    assert_eq!(current.order.status, OrderStatus::Pending);
    assert_eq!(current.order.version, 0);
    assert_eq!(current.order.non_completion_reason, None);
}

#[test]
fn stale_version_is_a_conflict() {
    let (state, store, fx) = common::memory_app_state();
    let order_id = idli_and_thali(&state, &fx).order.order_id;

    state
        .order_service
        .transition(&fx.supplier_a, order_id, TransitionRequest::to(OrderStatus::Prepared))
        .unwrap();

    // A writer that still holds version 0.
    let stale = store.update_order_status(
        order_id,
        0,
        OrderStatusUpdate {
            changes: OrderStatusChanges {
                status: OrderStatus::Collected,
                collected_by_user_id: Some(Some(fx.employee.user_id)),
                non_completion_reason: None,
                total_received_order_items: None,
                to_be_paid_price: None,
                to_be_paid_employee_price: None,
                to_be_paid_hospital_price: None,
            },
            received: Vec::new(),
        },
    );
    let err = ServiceError::from(stale.unwrap_err());
    assert!(matches!(err, ServiceError::Conflict(id) if id == order_id));

    let current = state.order_service.get_order(&fx.management, order_id).unwrap();
    assert_eq!(current.order.status, OrderStatus::Prepared);
    assert_eq!(current.order.version, 1);
}
