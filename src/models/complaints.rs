use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::complaints)]
#[diesel(primary_key(complaint_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Complaint {
    pub complaint_id: i32,
    pub user_id: Uuid,
    pub supplier_id: Uuid,
    pub comment: String,
    pub rating: Option<i16>,
    pub complaint_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::complaints)]
pub struct NewComplaint {
    pub user_id: Uuid,
    pub supplier_id: Uuid,
    pub comment: String,
    pub rating: Option<i16>,
    pub complaint_date: NaiveDate,
}
