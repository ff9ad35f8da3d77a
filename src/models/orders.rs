use crate::models::common::{MealType, OrderStatus};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub order_id: Uuid,
    pub order_creator_user_id: Uuid,
    pub collected_by_user_id: Option<Uuid>,
    pub supplier_id: Uuid,
    pub department_id: i32,
    pub meal_type: MealType,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub total_request_order_items: i32,
    pub total_received_order_items: i32,
    pub total_order_price: i64,
    pub total_order_employee_price: i64,
    pub total_order_hospital_price: i64,
    pub to_be_paid_price: i64,
    pub to_be_paid_employee_price: i64,
    pub to_be_paid_hospital_price: i64,
    pub non_completion_reason: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub order_id: Uuid,
    pub order_creator_user_id: Uuid,
    pub supplier_id: Uuid,
    pub department_id: i32,
    pub meal_type: MealType,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub total_request_order_items: i32,
    pub total_order_price: i64,
    pub total_order_employee_price: i64,
    pub total_order_hospital_price: i64,
    pub to_be_paid_price: i64,
    pub to_be_paid_employee_price: i64,
    pub to_be_paid_hospital_price: i64,
    pub version: i32,
}

/// An order line. Prices are copied from the food item when the order is
/// created and never re-read afterwards.
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(primary_key(order_item_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: Uuid,
    pub food_item_id: i32,
    /// Person in the department the line was ordered for.
    pub user_id: Uuid,
    pub food_item_name: String,
    pub quantity: i32,
    pub received_number_of_item: Option<i32>,
    pub unit_price: i64,
    pub unit_employee_price: i64,
    pub unit_hospital_price: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: Uuid,
    pub food_item_id: i32,
    pub user_id: Uuid,
    pub food_item_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub unit_employee_price: i64,
    pub unit_hospital_price: i64,
}

/// The aggregate: an order and its lines in insertion order.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Columns written by a status transition. `None` leaves the stored value alone;
/// `Some(None)` on the collector clears it.
#[derive(AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct OrderStatusChanges {
    pub status: OrderStatus,
    pub collected_by_user_id: Option<Option<Uuid>>,
    pub non_completion_reason: Option<String>,
    pub total_received_order_items: Option<i32>,
    pub to_be_paid_price: Option<i64>,
    pub to_be_paid_employee_price: Option<i64>,
    pub to_be_paid_hospital_price: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedCount {
    pub order_item_id: i32,
    pub received: i32,
}

/// Everything a transition writes, applied atomically against an expected version.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatusUpdate {
    pub changes: OrderStatusChanges,
    pub received: Vec<ReceivedCount>,
}
