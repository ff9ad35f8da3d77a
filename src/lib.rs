#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod traits;

use crate::config::{AppConfig, PolicyConfig};
use crate::db::{
    establish_connection_pool, run_db_migrations, ComplaintOperations, FoodItemOperations,
    MemoryStore, OrderOperations, RepositoryError, UserOperations,
};
use crate::services::{CatalogService, ComplaintService, OrderService, SummaryService};
use crate::traits::{CatalogStore, ComplaintStore, OrderStore, UserDirectory};
use std::sync::Arc;

pub use api::build_app;

#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService,
    pub catalog_service: CatalogService,
    pub complaint_service: ComplaintService,
    pub summary_service: SummaryService,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        complaints: Arc<dyn ComplaintStore>,
        users: Arc<dyn UserDirectory>,
        policy: PolicyConfig,
    ) -> Self {
        AppState {
            order_service: OrderService::new(
                orders.clone(),
                catalog.clone(),
                users.clone(),
                policy.sequencing,
            ),
            catalog_service: CatalogService::new(catalog, users.clone(), policy.catalog_writes),
            complaint_service: ComplaintService::new(complaints, users.clone()),
            summary_service: SummaryService::new(orders, users),
        }
    }

    /// PostgreSQL-backed state; runs pending migrations first.
    pub fn from_config(config: &AppConfig) -> Result<Self, RepositoryError> {
        let db = establish_connection_pool(&config.database_url, config.database_pool_size)?;
        run_db_migrations(&db)?;

        Ok(Self::new(
            Arc::new(OrderOperations::new(db.clone())),
            Arc::new(FoodItemOperations::new(db.clone())),
            Arc::new(ComplaintOperations::new(db.clone())),
            Arc::new(UserOperations::new(db)),
            config.policy,
        ))
    }

    pub fn in_memory(store: MemoryStore, policy: PolicyConfig) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store.clone(), store, policy)
    }
}
