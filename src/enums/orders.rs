use crate::models::common::{MealType, OrderStatus};
use crate::models::orders::{Order, OrderDetails};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct OrderLineRequest {
    pub food_item_id: i32,
    pub quantity: i32,
    /// Beneficiary of the line; may differ from the order creator.
    pub user_id: Uuid,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct CreateOrderRequest {
    pub supplier_id: Uuid,
    pub department_id: i32,
    pub meal_type: MealType,
    pub order_date: Option<NaiveDate>,
    pub order_items: Vec<OrderLineRequest>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedItem {
    pub order_item_id: i32,
    pub received_quantity: i32,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub collected_by_user_id: Option<Uuid>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub received_items: Vec<ReceivedItem>,
}

impl TransitionRequest {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            collected_by_user_id: None,
            reason: None,
            received_items: Vec::new(),
        }
    }
}

#[derive(Deserialize, IntoParams, ToSchema, Debug, Clone, Default, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub meal_type: Option<MealType>,
    pub department_id: Option<i32>,
    /// Inclusive lower bound on the order date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the order date.
    pub end_date: Option<NaiveDate>,
    pub supplier_id: Option<Uuid>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.is_none_or(|s| order.status == s)
            && self.meal_type.is_none_or(|m| order.meal_type == m)
            && self.department_id.is_none_or(|d| order.department_id == d)
            && self.start_date.is_none_or(|d| order.order_date >= d)
            && self.end_date.is_none_or(|d| order.order_date <= d)
            && self.supplier_id.is_none_or(|s| order.supplier_id == s)
    }
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<OrderDetails>,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Order>,
}
