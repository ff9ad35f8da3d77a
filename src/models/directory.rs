use crate::models::common::{MealType, Role};
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub role_id: Uuid,
    pub department_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub role_id: Uuid,
    pub department_id: Option<i32>,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::suppliers)]
#[diesel(primary_key(supplier_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Supplier {
    pub supplier_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub food_type: MealType,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::suppliers)]
pub struct NewSupplier {
    pub supplier_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub food_type: MealType,
    pub phone: Option<String>,
}
