use crate::db::schema::complaints;
use crate::db::{DbConnection, PgPool, RepositoryError};
use crate::models::complaints::{Complaint, NewComplaint};
use crate::services::authorization::ComplaintScope;
use crate::traits::ComplaintStore;
use diesel::prelude::*;
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct ComplaintOperations {
    pool: PgPool,
}

impl ComplaintOperations {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ComplaintStore for ComplaintOperations {
    fn insert_complaint(&self, complaint: NewComplaint) -> Result<Complaint, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_complaint: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(complaints::table)
            .values(&complaint)
            .returning(Complaint::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "insert_complaint: error inserting complaint against {}: {}",
                    complaint.supplier_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    fn get_complaint(&self, complaint_id: i32) -> Result<Complaint, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_complaint: failed to acquire DB connection: {}", e);
            e
        })?;

        complaints::table
            .find(complaint_id)
            .select(Complaint::as_select())
            .first(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("complaint {complaint_id}")),
                other => RepositoryError::DatabaseError(other),
            })
    }

    fn list_complaints(&self, scope: &ComplaintScope) -> Result<Vec<Complaint>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_complaints: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = complaints::table.select(Complaint::as_select()).into_boxed();
        match *scope {
            ComplaintScope::All => {}
            ComplaintScope::AgainstSupplier(supplier_id) => {
                query = query.filter(complaints::supplier_id.eq(supplier_id));
            }
            ComplaintScope::FiledBy(user_id) => {
                query = query.filter(complaints::user_id.eq(user_id));
            }
        }

        query
            .order((complaints::complaint_date.desc(), complaints::complaint_id.desc()))
            .load::<Complaint>(conn.connection())
            .map_err(|e| {
                error!("list_complaints: error loading complaints for {:?}: {}", scope, e);
                RepositoryError::DatabaseError(e)
            })
    }
}
