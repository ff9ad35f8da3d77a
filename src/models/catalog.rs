use crate::models::common::DietType;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::food_items)]
#[diesel(primary_key(food_item_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FoodItem {
    pub food_item_id: i32,
    pub supplier_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub diet_type: DietType,
    pub base_price: i64,
    pub employee_price: i64,
    pub hospital_price: i64,
    pub available: bool,
    /// URL returned by the image host; the image itself is never handled here.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::food_items)]
pub struct NewFoodItem {
    pub supplier_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub diet_type: DietType,
    pub base_price: i64,
    pub employee_price: i64,
    pub hospital_price: i64,
    pub available: bool,
    pub image_url: Option<String>,
}

#[derive(AsChangeset, Deserialize, ToSchema, Debug, Clone, Default)]
#[diesel(table_name = crate::db::schema::food_items)]
pub struct UpdateFoodItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub diet_type: Option<DietType>,
    pub base_price: Option<i64>,
    pub employee_price: Option<i64>,
    pub hospital_price: Option<i64>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

impl UpdateFoodItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.diet_type.is_none()
            && self.base_price.is_none()
            && self.employee_price.is_none()
            && self.hospital_price.is_none()
            && self.available.is_none()
            && self.image_url.is_none()
    }

    /// Applies the change set to a copy of `item`.
    pub fn merged_into(&self, item: &FoodItem) -> FoodItem {
        let mut merged = item.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            merged.category = category.clone();
        }
        if let Some(diet_type) = self.diet_type {
            merged.diet_type = diet_type;
        }
        if let Some(base_price) = self.base_price {
            merged.base_price = base_price;
        }
        if let Some(employee_price) = self.employee_price {
            merged.employee_price = employee_price;
        }
        if let Some(hospital_price) = self.hospital_price {
            merged.hospital_price = hospital_price;
        }
        if let Some(available) = self.available {
            merged.available = available;
        }
        if let Some(image_url) = &self.image_url {
            merged.image_url = Some(image_url.clone());
        }
        merged
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RemovalOutcome {
    Deleted,
    /// Still referenced by order lines, so only marked unavailable.
    Deactivated,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct FoodItemRemoval {
    pub outcome: RemovalOutcome,
    pub food_item: FoodItem,
}
