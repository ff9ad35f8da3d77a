use crate::models::complaints::Complaint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct ComplaintRequest {
    pub supplier_id: Uuid,
    pub comment: String,
    pub rating: Option<i16>,
    /// Defaults to today; future dates are rejected.
    pub complaint_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct ComplaintResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<Complaint>,
}

#[derive(Serialize, ToSchema)]
pub struct ComplaintsResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Complaint>,
}
