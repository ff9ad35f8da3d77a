use crate::models::catalog::{FoodItem, FoodItemRemoval};
use crate::models::common::DietType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct FoodItemRequest {
    /// Required when management creates an item; suppliers always create for themselves.
    pub supplier_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub diet_type: DietType,
    pub base_price: i64,
    pub employee_price: i64,
    pub hospital_price: i64,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Deserialize, IntoParams, ToSchema, Debug, Clone, Default, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct FoodItemFilter {
    pub category: Option<String>,
    pub available: Option<bool>,
    pub supplier_id: Option<Uuid>,
    /// Inclusive bounds on the base price.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl FoodItemFilter {
    pub fn matches(&self, item: &FoodItem) -> bool {
        self.category.as_deref().is_none_or(|c| item.category == c)
            && self.available.is_none_or(|a| item.available == a)
            && self.supplier_id.is_none_or(|s| item.supplier_id == s)
            && self.min_price.is_none_or(|p| item.base_price >= p)
            && self.max_price.is_none_or(|p| item.base_price <= p)
    }
}

#[derive(Serialize, ToSchema)]
pub struct FoodItemResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<FoodItem>,
}

#[derive(Serialize, ToSchema)]
pub struct FoodItemsResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<FoodItem>,
}

#[derive(Serialize, ToSchema)]
pub struct FoodItemRemovalResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<FoodItemRemoval>,
}
