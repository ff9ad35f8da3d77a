use crate::auth::Principal;
use crate::enums::orders::{CreateOrderRequest, OrderFilter, TransitionRequest};
use crate::models::common::OrderStatus;
use crate::models::orders::{NewOrder, NewOrderItem, Order, OrderDetails};
use crate::services::authorization::{self, OrderScope};
use crate::services::errors::ServiceError;
use crate::services::lifecycle::{self, SequencingPolicy};
use crate::services::pricing::{self, PricedLine, UnitPrices};
use crate::traits::{CatalogStore, OrderStore, UserDirectory};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
    users: Arc<dyn UserDirectory>,
    sequencing: SequencingPolicy,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        users: Arc<dyn UserDirectory>,
        sequencing: SequencingPolicy,
    ) -> Self {
        Self {
            orders,
            catalog,
            users,
            sequencing,
        }
    }

    pub fn sequencing(&self) -> SequencingPolicy {
        self.sequencing
    }

    /// Creates a pending order, copying the current prices of every food
    /// item into its lines.
    pub fn create_order(
        &self,
        actor: &Principal,
        request: CreateOrderRequest,
    ) -> Result<OrderDetails, ServiceError> {
        if !authorization::can_create_order(actor) {
            warn!(
                "create_order: role {} of user {} may not create orders",
                actor.role, actor.user_id
            );
            return Err(ServiceError::Forbidden);
        }
        if request.order_items.is_empty() {
            return Err(ServiceError::validation(
                "order_items",
                "an order needs at least one item",
            ));
        }
        if let Some(line) = request.order_items.iter().find(|l| l.quantity < 1) {
            return Err(ServiceError::validation(
                "quantity",
                format!(
                    "food item {}: quantity must be at least 1, got {}",
                    line.food_item_id, line.quantity
                ),
            ));
        }

        if self.users.find_supplier(request.supplier_id)?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "supplier {}",
                request.supplier_id
            )));
        }

        let mut ids: Vec<i32> = request.order_items.iter().map(|l| l.food_item_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let food_items: HashMap<i32, _> = self
            .catalog
            .get_food_items(&ids)?
            .into_iter()
            .map(|item| (item.food_item_id, item))
            .collect();

        let order_id = Uuid::new_v4();
        let mut lines = Vec::with_capacity(request.order_items.len());
        let mut new_items = Vec::with_capacity(request.order_items.len());
        for line in &request.order_items {
            let item = food_items
                .get(&line.food_item_id)
                .ok_or_else(|| ServiceError::NotFound(format!("food item {}", line.food_item_id)))?;
            if item.supplier_id != request.supplier_id {
                return Err(ServiceError::validation(
                    "food_item_id",
                    format!(
                        "food item {} is not offered by supplier {}",
                        item.food_item_id, request.supplier_id
                    ),
                ));
            }
            if !item.available {
                return Err(ServiceError::validation(
                    "food_item_id",
                    format!("food item {} ({}) is not available", item.food_item_id, item.name),
                ));
            }
            if self.users.find_user(line.user_id)?.is_none() {
                return Err(ServiceError::validation(
                    "user_id",
                    format!("unknown user {}", line.user_id),
                ));
            }

            let unit = UnitPrices::of(item);
            lines.push(PricedLine::requested(line.quantity, unit));
            new_items.push(NewOrderItem {
                order_id,
                food_item_id: item.food_item_id,
                user_id: line.user_id,
                food_item_name: item.name.clone(),
                quantity: line.quantity,
                unit_price: unit.base,
                unit_employee_price: unit.employee,
                unit_hospital_price: unit.hospital,
            });
        }

        let totals = pricing::order_totals(&lines)?;
        let new_order = NewOrder {
            order_id,
            order_creator_user_id: actor.user_id,
            supplier_id: request.supplier_id,
            department_id: request.department_id,
            meal_type: request.meal_type,
            status: OrderStatus::Pending,
            order_date: request
                .order_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            total_request_order_items: pricing::requested_item_count(&lines)?,
            total_order_price: totals.price,
            total_order_employee_price: totals.employee_price,
            total_order_hospital_price: totals.hospital_price,
            to_be_paid_price: totals.price,
            to_be_paid_employee_price: totals.employee_price,
            to_be_paid_hospital_price: totals.hospital_price,
            version: 0,
        };

        let created = self.orders.create_order(new_order, new_items)?;
        info!(
            "create_order: order {} created by {} for supplier {} with {} lines, total {}",
            created.order.order_id,
            actor.user_id,
            created.order.supplier_id,
            created.items.len(),
            created.order.total_order_price
        );
        Ok(created)
    }

    /// Orders outside the actor's scope are reported as missing.
    pub fn get_order(&self, actor: &Principal, order_id: Uuid) -> Result<OrderDetails, ServiceError> {
        let details = self.orders.get_order(order_id)?;
        if !authorization::can_view_order(actor, &details.order) {
            debug!(
                "get_order: order {} hidden from user {} ({})",
                order_id, actor.user_id, actor.role
            );
            return Err(ServiceError::NotFound(format!("order {}", order_id)));
        }
        Ok(details)
    }

    pub fn list_orders(
        &self,
        actor: &Principal,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, ServiceError> {
        let scope = authorization::order_scope(actor);
        let orders = self.orders.list_orders(&scope, filter)?;
        debug!(
            "list_orders: {} orders for user {} in scope {:?}",
            orders.len(),
            actor.user_id,
            scope
        );
        Ok(orders)
    }

    pub fn list_orders_by_creator(
        &self,
        actor: &Principal,
        creator: Uuid,
    ) -> Result<Vec<Order>, ServiceError> {
        let scope = authorization::order_scope(actor)
            .restrict_to_creator(creator)
            .ok_or(ServiceError::Forbidden)?;
        self.scoped(scope)
    }

    pub fn list_orders_by_supplier(
        &self,
        actor: &Principal,
        supplier_id: Uuid,
    ) -> Result<Vec<Order>, ServiceError> {
        let scope = authorization::order_scope(actor)
            .restrict_to_supplier(supplier_id)
            .ok_or(ServiceError::Forbidden)?;
        self.scoped(scope)
    }

    fn scoped(&self, scope: OrderScope) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.list_orders(&scope, &OrderFilter::default())?)
    }

    /// Validates and applies a status change. Request-only checks run
    /// before anything is read; the write is conditional on the version
    /// that was read.
    pub fn transition(
        &self,
        actor: &Principal,
        order_id: Uuid,
        request: TransitionRequest,
    ) -> Result<OrderDetails, ServiceError> {
        lifecycle::check_request(actor.role, &request).map_err(|e| {
            warn!(
                "transition: rejected {} on order {} by user {}: {}",
                request.status, order_id, actor.user_id, e
            );
            ServiceError::from(e)
        })?;

        if let Some(collector) = request.collected_by_user_id {
            if request.status == OrderStatus::Collected && self.users.find_user(collector)?.is_none() {
                return Err(ServiceError::validation(
                    "collected_by_user_id",
                    format!("unknown user {}", collector),
                ));
            }
        }

        let details = self.get_order(actor, order_id)?;
        let update = lifecycle::plan_transition(actor.role, &details, &request, self.sequencing)?;
        let from = details.order.status;
        let updated = self
            .orders
            .update_order_status(order_id, details.order.version, update)?;
        info!(
            "transition: order {} moved {} -> {} by user {} ({})",
            order_id, from, updated.order.status, actor.user_id, actor.role
        );
        Ok(updated)
    }
}
