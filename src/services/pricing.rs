//! Order totals.
//!
//! Every order carries three parallel totals: the standard price, the
//! employee-subsidised price and the price billed to the hospital. The
//! running totals use requested quantities; the to-be-paid totals use what
//! was actually received, falling back to the requested quantity for lines
//! without a recorded receipt.

use crate::models::catalog::FoodItem;
use crate::models::orders::{Order, OrderItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("line {line}: quantity {quantity} is negative")]
    NegativeQuantity { line: usize, quantity: i32 },
    #[error("line {line}: {field} {value} is negative")]
    NegativePrice {
        line: usize,
        field: &'static str,
        value: i64,
    },
    #[error("line {line}: total exceeds the supported range")]
    Overflow { line: usize },
}

/// The three unit prices of a food item, captured at order time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct UnitPrices {
    pub base: i64,
    pub employee: i64,
    pub hospital: i64,
}

impl UnitPrices {
    pub fn of(item: &FoodItem) -> Self {
        Self {
            base: item.base_price,
            employee: item.employee_price,
            hospital: item.hospital_price,
        }
    }

    fn check(&self, line: usize) -> Result<(), PricingError> {
        for (field, value) in [
            ("base price", self.base),
            ("employee price", self.employee),
            ("hospital price", self.hospital),
        ] {
            if value < 0 {
                return Err(PricingError::NegativePrice { line, field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PriceTotals {
    pub price: i64,
    pub employee_price: i64,
    pub hospital_price: i64,
}

impl PriceTotals {
    pub fn running(order: &Order) -> Self {
        Self {
            price: order.total_order_price,
            employee_price: order.total_order_employee_price,
            hospital_price: order.total_order_hospital_price,
        }
    }

    pub fn to_be_paid(order: &Order) -> Self {
        Self {
            price: order.to_be_paid_price,
            employee_price: order.to_be_paid_employee_price,
            hospital_price: order.to_be_paid_hospital_price,
        }
    }

    fn add_line(&mut self, line: usize, count: i32, unit: &UnitPrices) -> Result<(), PricingError> {
        let count = i64::from(count);
        let overflow = || PricingError::Overflow { line };
        let price = count.checked_mul(unit.base).ok_or_else(overflow)?;
        let employee = count.checked_mul(unit.employee).ok_or_else(overflow)?;
        let hospital = count.checked_mul(unit.hospital).ok_or_else(overflow)?;
        self.price = self.price.checked_add(price).ok_or_else(overflow)?;
        self.employee_price = self
            .employee_price
            .checked_add(employee)
            .ok_or_else(overflow)?;
        self.hospital_price = self
            .hospital_price
            .checked_add(hospital)
            .ok_or_else(overflow)?;
        Ok(())
    }
}

/// One line as the calculator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub quantity: i32,
    pub received: Option<i32>,
    pub unit: UnitPrices,
}

impl PricedLine {
    pub fn requested(quantity: i32, unit: UnitPrices) -> Self {
        Self {
            quantity,
            received: None,
            unit,
        }
    }

    /// Received count, defaulting to a full receipt.
    pub fn effective_received(&self) -> i32 {
        self.received.unwrap_or(self.quantity)
    }
}

impl From<&OrderItem> for PricedLine {
    fn from(item: &OrderItem) -> Self {
        Self {
            quantity: item.quantity,
            received: item.received_number_of_item,
            unit: UnitPrices {
                base: item.unit_price,
                employee: item.unit_employee_price,
                hospital: item.unit_hospital_price,
            },
        }
    }
}

fn validate(lines: &[PricedLine]) -> Result<(), PricingError> {
    for (line, priced) in lines.iter().enumerate() {
        if priced.quantity < 0 {
            return Err(PricingError::NegativeQuantity {
                line,
                quantity: priced.quantity,
            });
        }
        if let Some(received) = priced.received.filter(|r| *r < 0) {
            return Err(PricingError::NegativeQuantity {
                line,
                quantity: received,
            });
        }
        priced.unit.check(line)?;
    }
    Ok(())
}

/// Σ quantity × unit price, per price column.
pub fn order_totals(lines: &[PricedLine]) -> Result<PriceTotals, PricingError> {
    validate(lines)?;
    let mut totals = PriceTotals::default();
    for (line, priced) in lines.iter().enumerate() {
        totals.add_line(line, priced.quantity, &priced.unit)?;
    }
    Ok(totals)
}

/// Σ received × unit price, per price column.
pub fn to_be_paid_totals(lines: &[PricedLine]) -> Result<PriceTotals, PricingError> {
    validate(lines)?;
    let mut totals = PriceTotals::default();
    for (line, priced) in lines.iter().enumerate() {
        totals.add_line(line, priced.effective_received(), &priced.unit)?;
    }
    Ok(totals)
}

pub fn requested_item_count(lines: &[PricedLine]) -> Result<i32, PricingError> {
    validate(lines)?;
    lines.iter().enumerate().try_fold(0i32, |acc, (line, priced)| {
        acc.checked_add(priced.quantity)
            .ok_or(PricingError::Overflow { line })
    })
}

pub fn received_item_count(lines: &[PricedLine]) -> Result<i32, PricingError> {
    validate(lines)?;
    lines.iter().enumerate().try_fold(0i32, |acc, (line, priced)| {
        acc.checked_add(priced.effective_received())
            .ok_or(PricingError::Overflow { line })
    })
}
