use crate::db::schema::{order_items, orders};
use crate::db::{DbConnection, PgPool, RepositoryError};
use crate::enums::orders::OrderFilter;
use crate::models::orders::{NewOrder, NewOrderItem, Order, OrderDetails, OrderItem, OrderStatusUpdate};
use crate::services::authorization::OrderScope;
use crate::traits::OrderStore;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderOperations {
    pool: PgPool,
}

impl OrderOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn load_details(conn: &mut PgConnection, id: Uuid) -> Result<OrderDetails, RepositoryError> {
    let order = orders::table
        .find(id)
        .select(Order::as_select())
        .first(conn)
        .map_err(|e| match e {
            Error::NotFound => RepositoryError::NotFound(format!("order {id}")),
            other => RepositoryError::DatabaseError(other),
        })?;

    let items = order_items::table
        .filter(order_items::order_id.eq(id))
        .order(order_items::order_item_id.asc())
        .select(OrderItem::as_select())
        .load(conn)?;

    Ok(OrderDetails { order, items })
}

impl OrderStore for OrderOperations {
    fn create_order(
        &self,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection()
            .transaction::<_, RepositoryError, _>(|conn| {
                let order = diesel::insert_into(orders::table)
                    .values(&order)
                    .returning(Order::as_returning())
                    .get_result(conn)?;

                let mut lines = diesel::insert_into(order_items::table)
                    .values(&items)
                    .returning(OrderItem::as_returning())
                    .get_results(conn)?;
                lines.sort_by_key(|line: &OrderItem| line.order_item_id);

                Ok(OrderDetails {
                    order,
                    items: lines,
                })
            })
            .map_err(|e| {
                error!("create_order: transaction rolled back: {}", e);
                e
            })
    }

    fn get_order(&self, order_id: Uuid) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_order: failed to acquire DB connection: {}", e);
            e
        })?;

        load_details(conn.connection(), order_id)
    }

    fn list_orders(
        &self,
        scope: &OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = orders::table.select(Order::as_select()).into_boxed();
        match *scope {
            OrderScope::All => {}
            OrderScope::CreatedBy(user_id) => {
                query = query.filter(orders::order_creator_user_id.eq(user_id));
            }
            OrderScope::Supplier(supplier_id) => {
                query = query.filter(orders::supplier_id.eq(supplier_id));
            }
        }
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status));
        }
        if let Some(meal_type) = filter.meal_type {
            query = query.filter(orders::meal_type.eq(meal_type));
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(orders::department_id.eq(department_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(orders::order_date.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(orders::order_date.le(end));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(orders::supplier_id.eq(supplier_id));
        }

        let found = query
            .order(orders::created_at.desc())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error loading orders for {:?}: {}", scope, e);
                RepositoryError::DatabaseError(e)
            })?;
        debug!("list_orders: {} rows for {:?}", found.len(), scope);
        Ok(found)
    }

    fn update_order_status(
        &self,
        order_id: Uuid,
        expected_version: i32,
        update: OrderStatusUpdate,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_order_status: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction::<_, RepositoryError, _>(|conn| {
            let touched = diesel::update(
                orders::table
                    .filter(orders::order_id.eq(order_id))
                    .filter(orders::version.eq(expected_version)),
            )
            .set((
                &update.changes,
                orders::version.eq(expected_version + 1),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            if touched == 0 {
                let present = diesel::select(exists(orders::table.filter(orders::order_id.eq(order_id))))
                    .get_result::<bool>(conn)?;
                return Err(if present {
                    warn!(
                        "update_order_status: order {} is no longer at version {}",
                        order_id, expected_version
                    );
                    RepositoryError::VersionConflict(order_id)
                } else {
                    RepositoryError::NotFound(format!("order {order_id}"))
                });
            }

            for count in &update.received {
                diesel::update(
                    order_items::table
                        .filter(order_items::order_item_id.eq(count.order_item_id))
                        .filter(order_items::order_id.eq(order_id)),
                )
                .set(order_items::received_number_of_item.eq(Some(count.received)))
                .execute(conn)?;
            }

            load_details(conn, order_id)
        })
    }
}
