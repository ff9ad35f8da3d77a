//! In-process store with the same observable behaviour as the PostgreSQL
//! operations. Backs the test suites and `AppState::in_memory`.

use crate::db::RepositoryError;
use crate::enums::catalog::FoodItemFilter;
use crate::enums::orders::OrderFilter;
use crate::models::catalog::{FoodItem, FoodItemRemoval, NewFoodItem, RemovalOutcome, UpdateFoodItem};
use crate::models::complaints::{Complaint, NewComplaint};
use crate::models::directory::{Supplier, UserProfile};
use crate::models::orders::{NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, OrderStatusUpdate};
use crate::services::authorization::{ComplaintScope, OrderScope};
use crate::traits::{CatalogStore, ComplaintStore, OrderStore, UserDirectory};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, UserProfile>,
    suppliers: HashMap<Uuid, Supplier>,
    food_items: BTreeMap<i32, FoodItem>,
    next_food_item_id: i32,
    // Insertion order doubles as creation order.
    orders: Vec<Order>,
    order_items: BTreeMap<i32, OrderItem>,
    next_order_item_id: i32,
    complaints: BTreeMap<i32, Complaint>,
    next_complaint_id: i32,
}

impl MemoryState {
    fn details(&self, order: &Order) -> OrderDetails {
        OrderDetails {
            order: order.clone(),
            items: self
                .order_items
                .values()
                .filter(|item| item.order_id == order.order_id)
                .cloned()
                .collect(),
        }
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory store lock poisoned".to_string()))
    }

    pub fn insert_user(&self, user: UserProfile) -> Result<(), RepositoryError> {
        self.lock()?.users.insert(user.user_id, user);
        Ok(())
    }

    pub fn insert_supplier(&self, supplier: Supplier) -> Result<(), RepositoryError> {
        self.lock()?.suppliers.insert(supplier.supplier_id, supplier);
        Ok(())
    }
}

impl UserDirectory for MemoryStore {
    fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.lock()?.users.get(&user_id).cloned())
    }

    fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, RepositoryError> {
        Ok(self.lock()?.suppliers.get(&supplier_id).cloned())
    }
}

impl CatalogStore for MemoryStore {
    fn insert_food_item(&self, item: NewFoodItem) -> Result<FoodItem, RepositoryError> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let food_item = FoodItem {
            food_item_id: next_id(&mut state.next_food_item_id),
            supplier_id: item.supplier_id,
            name: item.name,
            description: item.description,
            category: item.category,
            diet_type: item.diet_type,
            base_price: item.base_price,
            employee_price: item.employee_price,
            hospital_price: item.hospital_price,
            available: item.available,
            image_url: item.image_url,
            created_at: now,
            updated_at: now,
        };
        state
            .food_items
            .insert(food_item.food_item_id, food_item.clone());
        Ok(food_item)
    }

    fn get_food_item(&self, food_item_id: i32) -> Result<FoodItem, RepositoryError> {
        self.lock()?
            .food_items
            .get(&food_item_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("food item {food_item_id}")))
    }

    fn get_food_items(&self, food_item_ids: &[i32]) -> Result<Vec<FoodItem>, RepositoryError> {
        let state = self.lock()?;
        Ok(food_item_ids
            .iter()
            .filter_map(|id| state.food_items.get(id).cloned())
            .collect())
    }

    fn list_food_items(&self, filter: &FoodItemFilter) -> Result<Vec<FoodItem>, RepositoryError> {
        Ok(self
            .lock()?
            .food_items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn update_food_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<FoodItem, RepositoryError> {
        let mut state = self.lock()?;
        let stored = state
            .food_items
            .get_mut(&food_item_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("food item {food_item_id}")))?;
        *stored = changes.merged_into(stored);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    fn remove_food_item(&self, food_item_id: i32) -> Result<FoodItemRemoval, RepositoryError> {
        let mut state = self.lock()?;
        let referenced = state
            .order_items
            .values()
            .any(|line| line.food_item_id == food_item_id);

        if referenced {
            let stored = state
                .food_items
                .get_mut(&food_item_id)
                .ok_or_else(|| RepositoryError::NotFound(format!("food item {food_item_id}")))?;
            stored.available = false;
            stored.updated_at = Utc::now();
            return Ok(FoodItemRemoval {
                outcome: RemovalOutcome::Deactivated,
                food_item: stored.clone(),
            });
        }

        let food_item = state
            .food_items
            .remove(&food_item_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("food item {food_item_id}")))?;
        Ok(FoodItemRemoval {
            outcome: RemovalOutcome::Deleted,
            food_item,
        })
    }
}

impl OrderStore for MemoryStore {
    fn create_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let stored = Order {
            order_id: order.order_id,
            order_creator_user_id: order.order_creator_user_id,
            collected_by_user_id: None,
            supplier_id: order.supplier_id,
            department_id: order.department_id,
            meal_type: order.meal_type,
            status: order.status,
            order_date: order.order_date,
            total_request_order_items: order.total_request_order_items,
            total_received_order_items: 0,
            total_order_price: order.total_order_price,
            total_order_employee_price: order.total_order_employee_price,
            total_order_hospital_price: order.total_order_hospital_price,
            to_be_paid_price: order.to_be_paid_price,
            to_be_paid_employee_price: order.to_be_paid_employee_price,
            to_be_paid_hospital_price: order.to_be_paid_hospital_price,
            non_completion_reason: None,
            version: order.version,
            created_at: now,
            updated_at: now,
        };

        for item in items {
            let order_item_id = next_id(&mut state.next_order_item_id);
            state.order_items.insert(
                order_item_id,
                OrderItem {
                    order_item_id,
                    order_id: stored.order_id,
                    food_item_id: item.food_item_id,
                    user_id: item.user_id,
                    food_item_name: item.food_item_name,
                    quantity: item.quantity,
                    received_number_of_item: None,
                    unit_price: item.unit_price,
                    unit_employee_price: item.unit_employee_price,
                    unit_hospital_price: item.unit_hospital_price,
                },
            );
        }

        let details = state.details(&stored);
        state.orders.push(stored);
        Ok(details)
    }

    fn get_order(&self, order_id: Uuid) -> Result<OrderDetails, RepositoryError> {
        let state = self.lock()?;
        state
            .orders
            .iter()
            .find(|order| order.order_id == order_id)
            .map(|order| state.details(order))
            .ok_or_else(|| RepositoryError::NotFound(format!("order {order_id}")))
    }

    fn list_orders(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .lock()?
            .orders
            .iter()
            .rev()
            .filter(|order| scope.covers(order) && filter.matches(order))
            .cloned()
            .collect())
    }

    fn update_order_status(
        &self,
        order_id: Uuid,
        expected_version: i32,
        update: OrderStatusUpdate,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut state = self.lock()?;
        let position = state
            .orders
            .iter()
            .position(|order| order.order_id == order_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("order {order_id}")))?;
        if state.orders[position].version != expected_version {
            return Err(RepositoryError::VersionConflict(order_id));
        }

        for count in &update.received {
            if let Some(line) = state
                .order_items
                .get_mut(&count.order_item_id)
                .filter(|line| line.order_id == order_id)
            {
                line.received_number_of_item = Some(count.received);
            }
        }

        let changes = update.changes;
        let order = &mut state.orders[position];
        order.status = changes.status;
        if let Some(collector) = changes.collected_by_user_id {
            order.collected_by_user_id = collector;
        }
        if let Some(reason) = changes.non_completion_reason {
            order.non_completion_reason = Some(reason);
        }
        if let Some(received) = changes.total_received_order_items {
            order.total_received_order_items = received;
        }
        if let Some(price) = changes.to_be_paid_price {
            order.to_be_paid_price = price;
        }
        if let Some(price) = changes.to_be_paid_employee_price {
            order.to_be_paid_employee_price = price;
        }
        if let Some(price) = changes.to_be_paid_hospital_price {
            order.to_be_paid_hospital_price = price;
        }
        order.version += 1;
        order.updated_at = Utc::now();

        let order = order.clone();
        Ok(state.details(&order))
    }
}

impl ComplaintStore for MemoryStore {
    fn insert_complaint(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError> {
        let mut state = self.lock()?;
        let stored = Complaint {
            complaint_id: next_id(&mut state.next_complaint_id),
            user_id: complaint.user_id,
            supplier_id: complaint.supplier_id,
            comment: complaint.comment,
            rating: complaint.rating,
            complaint_date: complaint.complaint_date,
            created_at: Utc::now(),
        };
        state.complaints.insert(stored.complaint_id, stored.clone());
        Ok(stored)
    }

    fn get_complaint(&self, complaint_id: i32) -> Result<Complaint, RepositoryError> {
        self.lock()?
            .complaints
            .get(&complaint_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("complaint {complaint_id}")))
    }

    fn list_complaints(&self, scope: &ComplaintScope) -> Result<Vec<Complaint>, RepositoryError> {
        let mut found: Vec<Complaint> = self
            .lock()?
            .complaints
            .values()
            .filter(|complaint| scope.covers(complaint))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.complaint_date
                .cmp(&a.complaint_date)
                .then(b.complaint_id.cmp(&a.complaint_id))
        });
        Ok(found)
    }
}
