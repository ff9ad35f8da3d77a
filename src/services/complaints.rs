use crate::auth::Principal;
use crate::enums::complaints::ComplaintRequest;
use crate::models::complaints::{Complaint, NewComplaint};
use crate::services::authorization;
use crate::services::errors::ServiceError;
use crate::traits::{ComplaintStore, UserDirectory};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Clone)]
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintStore>,
    users: Arc<dyn UserDirectory>,
}

/// Checks a complaint against `today` and returns the date to store.
pub fn validate_complaint(request: &ComplaintRequest, today: NaiveDate) -> Result<NaiveDate, ServiceError> {
    if request.comment.trim().is_empty() {
        return Err(ServiceError::validation("comment", "must not be empty"));
    }
    if let Some(rating) = request.rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ServiceError::validation(
                "rating",
                format!("must be between {MIN_RATING} and {MAX_RATING}, got {rating}"),
            ));
        }
    }
    let date = request.complaint_date.unwrap_or(today);
    if date > today {
        return Err(ServiceError::validation(
            "complaint_date",
            format!("{date} is in the future"),
        ));
    }
    Ok(date)
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { complaints, users }
    }

    pub fn file_complaint(
        &self,
        actor: &Principal,
        request: ComplaintRequest,
    ) -> Result<Complaint, ServiceError> {
        if !authorization::can_file_complaint(actor) {
            warn!(
                "file_complaint: role {} of user {} may not file complaints",
                actor.role, actor.user_id
            );
            return Err(ServiceError::Forbidden);
        }
        let complaint_date = validate_complaint(&request, Utc::now().date_naive())?;
        if self.users.find_supplier(request.supplier_id)?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "supplier {}",
                request.supplier_id
            )));
        }

        let filed = self.complaints.insert_complaint(NewComplaint {
            user_id: actor.user_id,
            supplier_id: request.supplier_id,
            comment: request.comment.trim().to_string(),
            rating: request.rating,
            complaint_date,
        })?;
        info!(
            "file_complaint: complaint {} filed by {} against supplier {}",
            filed.complaint_id, actor.user_id, filed.supplier_id
        );
        Ok(filed)
    }

    pub fn get_complaint(&self, actor: &Principal, complaint_id: i32) -> Result<Complaint, ServiceError> {
        let complaint = self.complaints.get_complaint(complaint_id)?;
        if !authorization::can_view_complaint(actor, &complaint) {
            return Err(ServiceError::NotFound(format!("complaint {complaint_id}")));
        }
        Ok(complaint)
    }

    pub fn list_complaints(&self, actor: &Principal) -> Result<Vec<Complaint>, ServiceError> {
        Ok(self
            .complaints
            .list_complaints(&authorization::complaint_scope(actor))?)
    }

    pub fn list_complaints_by_supplier(
        &self,
        actor: &Principal,
        supplier_id: Uuid,
    ) -> Result<Vec<Complaint>, ServiceError> {
        if !authorization::can_list_complaints_of_supplier(actor, supplier_id) {
            return Err(ServiceError::Forbidden);
        }
        Ok(self
            .complaints
            .list_complaints(&authorization::ComplaintScope::AgainstSupplier(supplier_id))?)
    }
}
