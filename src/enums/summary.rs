use crate::services::pricing::PriceTotals;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub supplier_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub order_count: i64,
    pub completed_count: i64,
    pub non_completed_count: i64,
    pub requested_items: i64,
    pub received_items: i64,
    /// Running totals over every order in the month.
    pub ordered: PriceTotals,
    /// To-be-paid totals over finalized orders only.
    pub to_be_paid: PriceTotals,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<MonthlySummary>,
}

#[derive(Serialize, ToSchema)]
pub struct SummariesResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<MonthlySummary>,
}
