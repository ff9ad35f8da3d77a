use crate::db::schema::{food_items, order_items};
use crate::db::{DbConnection, PgPool, RepositoryError};
use crate::enums::catalog::FoodItemFilter;
use crate::models::catalog::{FoodItem, FoodItemRemoval, NewFoodItem, RemovalOutcome, UpdateFoodItem};
use crate::traits::CatalogStore;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error;
use log::{error, info};

#[derive(Clone)]
pub struct FoodItemOperations {
    pool: PgPool,
}

impl FoodItemOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: i32) -> impl Fn(Error) -> RepositoryError {
    move |e| match e {
        Error::NotFound => RepositoryError::NotFound(format!("food item {id}")),
        other => RepositoryError::DatabaseError(other),
    }
}

impl CatalogStore for FoodItemOperations {
    fn insert_food_item(&self, item: NewFoodItem) -> Result<FoodItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_food_item: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(food_items::table)
            .values(&item)
            .returning(FoodItem::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "insert_food_item: error inserting food item '{}': {}",
                    item.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    fn get_food_item(&self, food_item_id: i32) -> Result<FoodItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_food_item: failed to acquire DB connection: {}", e);
            e
        })?;

        food_items::table
            .find(food_item_id)
            .select(FoodItem::as_select())
            .first(conn.connection())
            .map_err(not_found(food_item_id))
    }

    fn get_food_items(&self, food_item_ids: &[i32]) -> Result<Vec<FoodItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_food_items: failed to acquire DB connection: {}", e);
            e
        })?;

        food_items::table
            .filter(food_items::food_item_id.eq_any(food_item_ids))
            .select(FoodItem::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!(
                    "get_food_items: error loading food items {:?}: {}",
                    food_item_ids, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    fn list_food_items(&self, filter: &FoodItemFilter) -> Result<Vec<FoodItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_food_items: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = food_items::table.select(FoodItem::as_select()).into_boxed();
        if let Some(category) = &filter.category {
            query = query.filter(food_items::category.eq(category.clone()));
        }
        if let Some(available) = filter.available {
            query = query.filter(food_items::available.eq(available));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(food_items::supplier_id.eq(supplier_id));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(food_items::base_price.ge(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(food_items::base_price.le(max));
        }

        query
            .order(food_items::food_item_id.asc())
            .load::<FoodItem>(conn.connection())
            .map_err(|e| {
                error!("list_food_items: error loading food items: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn update_food_item(
        &self,
        food_item_id: i32,
        changes: UpdateFoodItem,
    ) -> Result<FoodItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_food_item: failed to acquire DB connection for id {}: {}",
                food_item_id, e
            );
            e
        })?;

        diesel::update(food_items::table.find(food_item_id))
            .set((&changes, food_items::updated_at.eq(Utc::now())))
            .returning(FoodItem::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "update_food_item: error updating food item {}: {}",
                    food_item_id, e
                );
                not_found(food_item_id)(e)
            })
    }

    fn remove_food_item(&self, food_item_id: i32) -> Result<FoodItemRemoval, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_food_item: failed to acquire DB connection for id {}: {}",
                food_item_id, e
            );
            e
        })?;

        conn.connection().transaction::<_, RepositoryError, _>(|conn| {
            let referenced = diesel::select(exists(
                order_items::table.filter(order_items::food_item_id.eq(food_item_id)),
            ))
            .get_result::<bool>(conn)?;

            if referenced {
                let food_item = diesel::update(food_items::table.find(food_item_id))
                    .set((
                        food_items::available.eq(false),
                        food_items::updated_at.eq(Utc::now()),
                    ))
                    .returning(FoodItem::as_returning())
                    .get_result(conn)
                    .map_err(not_found(food_item_id))?;
                info!(
                    "remove_food_item: food item {} is referenced by orders, marked unavailable",
                    food_item_id
                );
                return Ok(FoodItemRemoval {
                    outcome: RemovalOutcome::Deactivated,
                    food_item,
                });
            }

            let food_item = diesel::delete(food_items::table.find(food_item_id))
                .returning(FoodItem::as_returning())
                .get_result(conn)
                .map_err(not_found(food_item_id))?;
            Ok(FoodItemRemoval {
                outcome: RemovalOutcome::Deleted,
                food_item,
            })
        })
    }
}
