use crate::auth::Principal;
use crate::enums::catalog::{FoodItemFilter, FoodItemRequest};
use crate::models::catalog::{FoodItem, FoodItemRemoval, NewFoodItem, UpdateFoodItem};
use crate::models::common::Role;
use crate::services::authorization::{self, CatalogWritePolicy};
use crate::services::errors::ServiceError;
use crate::traits::{CatalogStore, UserDirectory};
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    users: Arc<dyn UserDirectory>,
    policy: CatalogWritePolicy,
}

struct PriceFields<'a> {
    name: &'a str,
    category: &'a str,
    base: i64,
    employee: i64,
    hospital: i64,
}

fn validate_fields(fields: PriceFields<'_>) -> Result<(), ServiceError> {
    if fields.name.trim().is_empty() {
        return Err(ServiceError::validation("name", "must not be empty"));
    }
    if fields.category.trim().is_empty() {
        return Err(ServiceError::validation("category", "must not be empty"));
    }
    for (field, value) in [
        ("base_price", fields.base),
        ("employee_price", fields.employee),
        ("hospital_price", fields.hospital),
    ] {
        if value < 0 {
            return Err(ServiceError::validation(
                field,
                format!("must not be negative, got {value}"),
            ));
        }
    }
    if fields.employee > fields.base {
        return Err(ServiceError::validation(
            "employee_price",
            format!(
                "employee price {} exceeds base price {}",
                fields.employee, fields.base
            ),
        ));
    }
    Ok(())
}

fn validate_item(item: &FoodItem) -> Result<(), ServiceError> {
    validate_fields(PriceFields {
        name: &item.name,
        category: &item.category,
        base: item.base_price,
        employee: item.employee_price,
        hospital: item.hospital_price,
    })
}

impl CatalogService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        users: Arc<dyn UserDirectory>,
        policy: CatalogWritePolicy,
    ) -> Self {
        Self {
            catalog,
            users,
            policy,
        }
    }

    fn ensure_writable(&self, actor: &Principal, supplier_id: Uuid) -> Result<(), ServiceError> {
        if authorization::can_write_catalog(actor, supplier_id, self.policy) {
            Ok(())
        } else {
            warn!(
                "catalog: user {} ({}) may not write items of supplier {}",
                actor.user_id, actor.role, supplier_id
            );
            Err(ServiceError::Forbidden)
        }
    }

    /// Loads an item for a write, hiding items the actor cannot see.
    fn load_for_write(&self, actor: &Principal, food_item_id: i32) -> Result<FoodItem, ServiceError> {
        let item = self.get_food_item(actor, food_item_id)?;
        self.ensure_writable(actor, item.supplier_id)?;
        Ok(item)
    }

    pub fn create_food_item(
        &self,
        actor: &Principal,
        request: FoodItemRequest,
    ) -> Result<FoodItem, ServiceError> {
        let supplier_id = match (actor.role, request.supplier_id) {
            (Role::Supplier, _) => actor.role_id,
            (_, Some(supplier_id)) => supplier_id,
            (Role::Management, None) if self.policy.management_can_edit => {
                return Err(ServiceError::validation(
                    "supplier_id",
                    "required when not acting as a supplier",
                ));
            }
            (_, None) => return Err(ServiceError::Forbidden),
        };
        self.ensure_writable(actor, supplier_id)?;

        validate_fields(PriceFields {
            name: &request.name,
            category: &request.category,
            base: request.base_price,
            employee: request.employee_price,
            hospital: request.hospital_price,
        })?;
        if self.users.find_supplier(supplier_id)?.is_none() {
            return Err(ServiceError::NotFound(format!("supplier {supplier_id}")));
        }

        let created = self.catalog.insert_food_item(NewFoodItem {
            supplier_id,
            name: request.name.trim().to_string(),
            description: request.description,
            category: request.category.trim().to_string(),
            diet_type: request.diet_type,
            base_price: request.base_price,
            employee_price: request.employee_price,
            hospital_price: request.hospital_price,
            available: request.available,
            image_url: request.image_url,
        })?;
        info!(
            "create_food_item: item {} '{}' added for supplier {} by {}",
            created.food_item_id, created.name, supplier_id, actor.user_id
        );
        Ok(created)
    }

    pub fn update_food_item(
        &self,
        actor: &Principal,
        food_item_id: i32,
        mut changes: UpdateFoodItem,
    ) -> Result<FoodItem, ServiceError> {
        changes.name = changes.name.map(|name| name.trim().to_string());
        changes.category = changes.category.map(|category| category.trim().to_string());
        if changes.is_empty() {
            return Err(ServiceError::validation("body", "no fields to update"));
        }
        let current = self.load_for_write(actor, food_item_id)?;
        validate_item(&changes.merged_into(&current))?;

        let updated = self.catalog.update_food_item(food_item_id, changes)?;
        info!(
            "update_food_item: item {} updated by {}",
            food_item_id, actor.user_id
        );
        Ok(updated)
    }

    /// Deletes an item outright, or retires it when past orders reference it.
    pub fn delete_food_item(
        &self,
        actor: &Principal,
        food_item_id: i32,
    ) -> Result<FoodItemRemoval, ServiceError> {
        self.load_for_write(actor, food_item_id)?;
        let removal = self.catalog.remove_food_item(food_item_id)?;
        info!(
            "delete_food_item: item {} {:?} by {}",
            food_item_id, removal.outcome, actor.user_id
        );
        Ok(removal)
    }

    pub fn get_food_item(&self, actor: &Principal, food_item_id: i32) -> Result<FoodItem, ServiceError> {
        let item = self.catalog.get_food_item(food_item_id)?;
        if !authorization::can_view_food_item(actor, &item) {
            return Err(ServiceError::NotFound(format!("food item {food_item_id}")));
        }
        Ok(item)
    }

    pub fn list_food_items(
        &self,
        actor: &Principal,
        filter: &FoodItemFilter,
    ) -> Result<Vec<FoodItem>, ServiceError> {
        let scope = authorization::catalog_scope(actor);
        let items: Vec<FoodItem> = self
            .catalog
            .list_food_items(filter)?
            .into_iter()
            .filter(|item| scope.covers(item))
            .collect();
        debug!(
            "list_food_items: {} items for user {} in scope {:?}",
            items.len(),
            actor.user_id,
            scope
        );
        Ok(items)
    }

    pub fn list_food_items_by_supplier(
        &self,
        actor: &Principal,
        supplier_id: Uuid,
    ) -> Result<Vec<FoodItem>, ServiceError> {
        if actor.role == Role::Supplier && actor.role_id != supplier_id {
            return Err(ServiceError::Forbidden);
        }
        self.list_food_items(
            actor,
            &FoodItemFilter {
                supplier_id: Some(supplier_id),
                ..FoodItemFilter::default()
            },
        )
    }

    /// Every available item, whatever the actor's role.
    pub fn list_available_food_items(&self) -> Result<Vec<FoodItem>, ServiceError> {
        Ok(self.catalog.list_food_items(&FoodItemFilter {
            available: Some(true),
            ..FoodItemFilter::default()
        })?)
    }
}
