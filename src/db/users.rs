use crate::db::schema::{departments, suppliers, users};
use crate::db::{DbConnection, PgPool, RepositoryError};
use crate::models::directory::{NewSupplier, NewUserProfile, Supplier, UserProfile};
use crate::traits::UserDirectory;
use diesel::prelude::*;
use log::error;
use uuid::Uuid;

/// Read access to the user and supplier directory. Accounts are provisioned
/// elsewhere; the insert helpers exist for seeding.
#[derive(Clone)]
pub struct UserOperations {
    pool: PgPool,
}

impl UserOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn create_department(&self, department_name: &str) -> Result<i32, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        diesel::insert_into(departments::table)
            .values(departments::name.eq(department_name))
            .returning(departments::department_id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_department: error inserting department '{}': {}",
                    department_name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn create_user(&self, new_user: NewUserProfile) -> Result<UserProfile, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(UserProfile::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_user: error inserting new user with email '{}': {}",
                    new_user.email, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn create_supplier(&self, new_supplier: NewSupplier) -> Result<Supplier, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        diesel::insert_into(suppliers::table)
            .values(&new_supplier)
            .returning(Supplier::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_supplier: error inserting supplier '{}': {}",
                    new_supplier.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}

impl UserDirectory for UserOperations {
    fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("find_user: failed to acquire DB connection: {}", e);
            e
        })?;

        users::table
            .find(user_id)
            .select(UserProfile::as_select())
            .first(conn.connection())
            .optional()
            .map_err(|e| {
                error!("find_user: error fetching user {}: {}", user_id, e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("find_supplier: failed to acquire DB connection: {}", e);
            e
        })?;

        suppliers::table
            .find(supplier_id)
            .select(Supplier::as_select())
            .first(conn.connection())
            .optional()
            .map_err(|e| {
                error!("find_supplier: error fetching supplier {}: {}", supplier_id, e);
                RepositoryError::DatabaseError(e)
            })
    }
}
