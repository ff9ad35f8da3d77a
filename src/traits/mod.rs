//! Persistence seams consumed by the services. `db::*Operations` implement
//! them over PostgreSQL and `db::MemoryStore` keeps everything in process.

use crate::db::RepositoryError;
use crate::enums::catalog::FoodItemFilter;
use crate::enums::orders::OrderFilter;
use crate::models::catalog::{FoodItem, FoodItemRemoval, NewFoodItem, UpdateFoodItem};
use crate::models::complaints::{Complaint, NewComplaint};
use crate::models::directory::{Supplier, UserProfile};
use crate::models::orders::{NewOrder, NewOrderItem, Order, OrderDetails, OrderStatusUpdate};
use crate::services::authorization::{ComplaintScope, OrderScope};
use uuid::Uuid;

pub trait OrderStore: Send + Sync {
    /// Inserts the order and its lines atomically. Lines keep their order.
    fn create_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderDetails, RepositoryError>;

    fn get_order(&self, order_id: Uuid) -> Result<OrderDetails, RepositoryError>;

    /// Newest first.
    fn list_orders(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError>;

    /// Applies `update` only if the stored version still equals
    /// `expected_version`, bumping it by one. A stale version yields
    /// [`RepositoryError::VersionConflict`].
    fn update_order_status(
        &self,
        order_id: Uuid,
        expected_version: i32,
        update: OrderStatusUpdate,
    ) -> Result<OrderDetails, RepositoryError>;

    fn list_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        self.list_orders(&OrderScope::All, &OrderFilter::default())
    }

    fn list_orders_by_creator(&self, user_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        self.list_orders(&OrderScope::CreatedBy(user_id), &OrderFilter::default())
    }

    fn list_orders_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        self.list_orders(&OrderScope::Supplier(supplier_id), &OrderFilter::default())
    }
}

pub trait CatalogStore: Send + Sync {
    fn insert_food_item(&self, item: NewFoodItem) -> Result<FoodItem, RepositoryError>;

    fn get_food_item(&self, food_item_id: i32) -> Result<FoodItem, RepositoryError>;

    /// Missing ids are simply absent from the result.
    fn get_food_items(&self, food_item_ids: &[i32]) -> Result<Vec<FoodItem>, RepositoryError>;

    fn list_food_items(&self, filter: &FoodItemFilter) -> Result<Vec<FoodItem>, RepositoryError>;

    fn update_food_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<FoodItem, RepositoryError>;

    /// Deletes the item, or marks it unavailable when order lines reference it.
    fn remove_food_item(&self, food_item_id: i32) -> Result<FoodItemRemoval, RepositoryError>;
}

pub trait ComplaintStore: Send + Sync {
    fn insert_complaint(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError>;

    fn get_complaint(&self, complaint_id: i32) -> Result<Complaint, RepositoryError>;

    fn list_complaints(&self, scope: &ComplaintScope) -> Result<Vec<Complaint>, RepositoryError>;
}

pub trait UserDirectory: Send + Sync {
    fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, RepositoryError>;

    fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, RepositoryError>;
}
