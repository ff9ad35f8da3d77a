//! Monthly order summaries per supplier, keyed on `order_date`.

use crate::auth::Principal;
use crate::enums::orders::OrderFilter;
use crate::enums::summary::MonthlySummary;
use crate::models::common::OrderStatus;
use crate::models::orders::Order;
use crate::services::authorization::{self, OrderScope};
use crate::services::errors::ServiceError;
use crate::services::pricing::PriceTotals;
use crate::traits::{OrderStore, UserDirectory};
use chrono::{Months, NaiveDate};
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct SummaryService {
    orders: Arc<dyn OrderStore>,
    users: Arc<dyn UserDirectory>,
}

/// First and last day of the month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ServiceError> {
    if !(1..=12).contains(&month) {
        return Err(ServiceError::validation(
            "month",
            format!("must be between 1 and 12, got {month}"),
        ));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ServiceError::validation("year", format!("{year} is out of range")))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| ServiceError::validation("year", format!("{year} is out of range")))?;
    Ok((first, last))
}

fn add(acc: &mut PriceTotals, totals: PriceTotals) -> Result<(), ServiceError> {
    let overflow = || ServiceError::validation("total", "summary exceeds the supported range");
    acc.price = acc.price.checked_add(totals.price).ok_or_else(overflow)?;
    acc.employee_price = acc
        .employee_price
        .checked_add(totals.employee_price)
        .ok_or_else(overflow)?;
    acc.hospital_price = acc
        .hospital_price
        .checked_add(totals.hospital_price)
        .ok_or_else(overflow)?;
    Ok(())
}

/// Folds one supplier's orders of a month. Running totals cover every order;
/// to-be-paid totals and received items cover finalized orders only.
pub fn summarize(
    supplier_id: Uuid,
    year: i32,
    month: u32,
    orders: &[Order],
) -> Result<MonthlySummary, ServiceError> {
    let mut summary = MonthlySummary {
        supplier_id,
        year,
        month,
        order_count: 0,
        completed_count: 0,
        non_completed_count: 0,
        requested_items: 0,
        received_items: 0,
        ordered: PriceTotals::default(),
        to_be_paid: PriceTotals::default(),
    };

    for order in orders.iter().filter(|o| o.supplier_id == supplier_id) {
        summary.order_count += 1;
        summary.requested_items += i64::from(order.total_request_order_items);
        add(&mut summary.ordered, PriceTotals::running(order))?;

        match order.status {
            OrderStatus::Completed => summary.completed_count += 1,
            OrderStatus::NonCompleted => summary.non_completed_count += 1,
            _ => continue,
        }
        summary.received_items += i64::from(order.total_received_order_items);
        add(&mut summary.to_be_paid, PriceTotals::to_be_paid(order))?;
    }
    Ok(summary)
}

impl SummaryService {
    pub fn new(orders: Arc<dyn OrderStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { orders, users }
    }

    fn orders_in(
        &self,
        scope: OrderScope,
        year: i32,
        month: u32,
    ) -> Result<Vec<Order>, ServiceError> {
        let (start, end) = month_bounds(year, month)?;
        let filter = OrderFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..OrderFilter::default()
        };
        Ok(self.orders.list_orders(&scope, &filter)?)
    }

    pub fn supplier_monthly_summary(
        &self,
        actor: &Principal,
        supplier_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, ServiceError> {
        if !authorization::can_view_supplier_summary(actor, supplier_id) {
            return Err(ServiceError::Forbidden);
        }
        month_bounds(year, month)?;
        if self.users.find_supplier(supplier_id)?.is_none() {
            return Err(ServiceError::NotFound(format!("supplier {supplier_id}")));
        }
        let orders = self.orders_in(OrderScope::Supplier(supplier_id), year, month)?;
        debug!(
            "supplier_monthly_summary: {} orders for supplier {} in {}-{:02}",
            orders.len(),
            supplier_id,
            year,
            month
        );
        summarize(supplier_id, year, month, &orders)
    }

    /// One summary per supplier with orders in the month, ordered by supplier id.
    pub fn monthly_totals(
        &self,
        actor: &Principal,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlySummary>, ServiceError> {
        if !authorization::can_view_all_summaries(actor) {
            return Err(ServiceError::Forbidden);
        }
        let orders = self.orders_in(OrderScope::All, year, month)?;
        let mut by_supplier: BTreeMap<Uuid, Vec<Order>> = BTreeMap::new();
        for order in orders {
            by_supplier.entry(order.supplier_id).or_default().push(order);
        }
        by_supplier
            .into_iter()
            .map(|(supplier_id, orders)| summarize(supplier_id, year, month, &orders))
            .collect()
    }
}
