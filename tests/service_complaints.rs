mod common;

use chrono::{Days, NaiveDate, Utc};
use food_orders::enums::complaints::ComplaintRequest;
use food_orders::services::complaints::validate_complaint;
use food_orders::services::ServiceError;
use uuid::Uuid;

fn request(supplier_id: Uuid, comment: &str, rating: Option<i16>) -> ComplaintRequest {
    ComplaintRequest {
        supplier_id,
        comment: comment.to_string(),
        rating,
        complaint_date: None,
    }
}

#[test]
fn validate_complaint_checks_comment_rating_and_date() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let supplier = Uuid::new_v4();

    assert_eq!(validate_complaint(&request(supplier, "cold rice", None), today).unwrap(), today);
    assert_eq!(validate_complaint(&request(supplier, "late", Some(1)), today).unwrap(), today);
    assert!(validate_complaint(&request(supplier, "late", Some(5)), today).is_ok());

    for bad in [
        request(supplier, "   ", Some(3)),
        request(supplier, "late", Some(0)),
        request(supplier, "late", Some(6)),
        ComplaintRequest {
            complaint_date: today.succ_opt(),
            ..request(supplier, "from the future", None)
        },
    ] {
        assert!(matches!(
            validate_complaint(&bad, today),
            Err(ServiceError::Validation { .. })
        ));
    }

    let yesterday = today.pred_opt().unwrap();
    let backdated = ComplaintRequest {
        complaint_date: Some(yesterday),
        ..request(supplier, "yesterday's lunch", Some(2))
    };
    assert_eq!(validate_complaint(&backdated, today).unwrap(), yesterday);
}

#[test]
fn consumers_file_and_suppliers_read_their_own() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.complaint_service;

    let filed = service
        .file_complaint(&fx.employee, request(fx.supplier_a_id(), "  soggy idli ", Some(2)))
        .unwrap();
    assert_eq!(filed.user_id, fx.employee.user_id);
    assert_eq!(filed.comment, "soggy idli");
    assert_eq!(filed.complaint_date, Utc::now().date_naive());

    service
        .file_complaint(&fx.management, request(fx.supplier_b_id(), "no sugar option", None))
        .unwrap();

    assert!(matches!(
        service.file_complaint(&fx.supplier_a, request(fx.supplier_b_id(), "competitor", None)),
        Err(ServiceError::Forbidden)
    ));
    assert!(matches!(
        service.file_complaint(&fx.employee, request(Uuid::new_v4(), "who?", None)),
        Err(ServiceError::NotFound(_))
    ));

    assert_eq!(service.list_complaints(&fx.management).unwrap().len(), 2);
    assert_eq!(service.list_complaints(&fx.employee).unwrap().len(), 1);
    assert!(service.list_complaints(&fx.other_employee).unwrap().is_empty());

    let against_a = service.list_complaints(&fx.supplier_a).unwrap();
    assert_eq!(against_a.len(), 1);
    assert_eq!(against_a[0].complaint_id, filed.complaint_id);

    assert!(service.get_complaint(&fx.supplier_a, filed.complaint_id).is_ok());
    assert!(matches!(
        service.get_complaint(&fx.supplier_b, filed.complaint_id),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.get_complaint(&fx.other_employee, filed.complaint_id),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn complaints_by_supplier_are_newest_first() {
    let (state, _store, fx) = common::memory_app_state();
    let service = &state.complaint_service;
    let today = Utc::now().date_naive();
    let last_week = today.checked_sub_days(Days::new(7)).unwrap();

    let older = service
        .file_complaint(
            &fx.employee,
            ComplaintRequest {
                complaint_date: Some(last_week),
                ..request(fx.supplier_a_id(), "tea was cold", Some(3))
            },
        )
        .unwrap();
    let newer = service
        .file_complaint(&fx.other_employee, request(fx.supplier_a_id(), "missing spoon", Some(4)))
        .unwrap();

    let listed = service
        .list_complaints_by_supplier(&fx.management, fx.supplier_a_id())
        .unwrap();
    let ids: Vec<i32> = listed.iter().map(|c| c.complaint_id).collect();
    assert_eq!(ids, vec![newer.complaint_id, older.complaint_id]);

    assert_eq!(
        service
            .list_complaints_by_supplier(&fx.supplier_a, fx.supplier_a_id())
            .unwrap()
            .len(),
        2
    );
    assert!(matches!(
        service.list_complaints_by_supplier(&fx.supplier_b, fx.supplier_a_id()),
        Err(ServiceError::Forbidden)
    ));
    assert!(matches!(
        service.list_complaints_by_supplier(&fx.employee, fx.supplier_a_id()),
        Err(ServiceError::Forbidden)
    ));
}
