//! Order status transitions.
//!
//! Two tracks share one status field. Suppliers drive
//! `pending -> prepared -> collected`; the ordering side (employees and
//! management) closes the order with `completed` or `non-completed`.
//! Which targets a role may request is fixed; whether the current status
//! must precede the target is a [`SequencingPolicy`].

use crate::enums::orders::TransitionRequest;
use crate::models::common::{OrderStatus, Role};
use crate::models::orders::{OrderDetails, OrderStatusChanges, OrderStatusUpdate, ReceivedCount};
use crate::services::pricing::{self, PricedLine, PricingError};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("role {role} may not set status {status}")]
    RoleNotPermitted { role: Role, status: OrderStatus },
    #[error("a reason is required to mark an order non-completed")]
    MissingReason,
    #[error("collected_by_user_id is required to mark an order collected")]
    MissingCollector,
    #[error("order is already {0} and cannot change status")]
    AlreadyFinal(OrderStatus),
    #[error("cannot move an order from {from} to {to}")]
    OutOfSequence { from: OrderStatus, to: OrderStatus },
    #[error("order item {0} does not belong to this order")]
    UnknownOrderItem(i32),
    #[error("order item {0} is listed more than once")]
    DuplicateReceivedItem(i32),
    #[error("order item {order_item_id}: received {received} is outside 0..={quantity}")]
    ReceivedOutOfRange {
        order_item_id: i32,
        received: i32,
        quantity: i32,
    },
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencingPolicy {
    /// Any non-final order may jump to any status the role may set.
    #[default]
    Loose,
    /// Only the edges of [`STRICT_TRANSITIONS`] are allowed.
    Strict,
}

impl FromStr for SequencingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loose" => Ok(SequencingPolicy::Loose),
            "strict" => Ok(SequencingPolicy::Strict),
            other => Err(format!("unknown sequencing policy '{other}'")),
        }
    }
}

impl fmt::Display for SequencingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencingPolicy::Loose => f.write_str("loose"),
            SequencingPolicy::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

pub const STRICT_TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: OrderStatus::Pending,
        to: OrderStatus::Prepared,
    },
    TransitionRule {
        from: OrderStatus::Prepared,
        to: OrderStatus::Collected,
    },
    TransitionRule {
        from: OrderStatus::Collected,
        to: OrderStatus::Completed,
    },
    TransitionRule {
        from: OrderStatus::Collected,
        to: OrderStatus::NonCompleted,
    },
];

const SUPPLIER_TARGETS: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::Prepared,
    OrderStatus::Collected,
];

const CONSUMER_TARGETS: &[OrderStatus] = &[OrderStatus::Completed, OrderStatus::NonCompleted];

/// Statuses `role` may request.
pub fn permitted_targets(role: Role) -> &'static [OrderStatus] {
    match role {
        Role::Supplier => SUPPLIER_TARGETS,
        Role::Management | Role::NormalEmployee => CONSUMER_TARGETS,
    }
}

/// Checks that need nothing but the request: role set, reason, collector.
pub fn check_request(role: Role, request: &TransitionRequest) -> Result<(), LifecycleError> {
    if !permitted_targets(role).contains(&request.status) {
        return Err(LifecycleError::RoleNotPermitted {
            role,
            status: request.status,
        });
    }
    match request.status {
        OrderStatus::NonCompleted
            if request
                .reason
                .as_deref()
                .is_none_or(|r| r.trim().is_empty()) =>
        {
            Err(LifecycleError::MissingReason)
        }
        OrderStatus::Collected if request.collected_by_user_id.is_none() => {
            Err(LifecycleError::MissingCollector)
        }
        _ => Ok(()),
    }
}

pub fn check_sequence(
    current: OrderStatus,
    target: OrderStatus,
    policy: SequencingPolicy,
) -> Result<(), LifecycleError> {
    if current.is_terminal() {
        return Err(LifecycleError::AlreadyFinal(current));
    }
    match policy {
        SequencingPolicy::Loose => Ok(()),
        SequencingPolicy::Strict => {
            if STRICT_TRANSITIONS
                .iter()
                .any(|rule| rule.from == current && rule.to == target)
            {
                Ok(())
            } else {
                Err(LifecycleError::OutOfSequence {
                    from: current,
                    to: target,
                })
            }
        }
    }
}

/// Validates `request` against the loaded aggregate and computes what to write.
///
/// Supplier transitions touch no money. `completed` assumes a full receipt.
/// `non-completed` records the received counts it is given and recomputes the
/// to-be-paid totals from them; unlisted lines count as fully received.
pub fn plan_transition(
    role: Role,
    details: &OrderDetails,
    request: &TransitionRequest,
    policy: SequencingPolicy,
) -> Result<OrderStatusUpdate, LifecycleError> {
    check_request(role, request)?;
    check_sequence(details.order.status, request.status, policy)?;

    let mut changes = OrderStatusChanges {
        status: request.status,
        collected_by_user_id: None,
        non_completion_reason: None,
        total_received_order_items: None,
        to_be_paid_price: None,
        to_be_paid_employee_price: None,
        to_be_paid_hospital_price: None,
    };

    let received = match request.status {
        OrderStatus::Pending | OrderStatus::Prepared => {
            changes.collected_by_user_id = Some(None);
            Vec::new()
        }
        OrderStatus::Collected => {
            changes.collected_by_user_id = Some(request.collected_by_user_id);
            Vec::new()
        }
        OrderStatus::Completed => {
            let lines: Vec<PricedLine> = details
                .items
                .iter()
                .map(|item| PricedLine {
                    received: None,
                    ..PricedLine::from(item)
                })
                .collect();
            set_financials(&mut changes, &lines)?;
            Vec::new()
        }
        OrderStatus::NonCompleted => {
            let received = received_counts(details, request)?;
            let overrides: HashMap<i32, i32> = received
                .iter()
                .map(|r| (r.order_item_id, r.received))
                .collect();
            let lines: Vec<PricedLine> = details
                .items
                .iter()
                .map(|item| PricedLine {
                    received: overrides.get(&item.order_item_id).copied(),
                    ..PricedLine::from(item)
                })
                .collect();
            set_financials(&mut changes, &lines)?;
            changes.non_completion_reason = request.reason.as_ref().map(|r| r.trim().to_string());
            received
        }
    };

    Ok(OrderStatusUpdate { changes, received })
}

fn set_financials(changes: &mut OrderStatusChanges, lines: &[PricedLine]) -> Result<(), PricingError> {
    let to_be_paid = pricing::to_be_paid_totals(lines)?;
    changes.to_be_paid_price = Some(to_be_paid.price);
    changes.to_be_paid_employee_price = Some(to_be_paid.employee_price);
    changes.to_be_paid_hospital_price = Some(to_be_paid.hospital_price);
    changes.total_received_order_items = Some(pricing::received_item_count(lines)?);
    Ok(())
}

fn received_counts(
    details: &OrderDetails,
    request: &TransitionRequest,
) -> Result<Vec<ReceivedCount>, LifecycleError> {
    let quantities: HashMap<i32, i32> = details
        .items
        .iter()
        .map(|item| (item.order_item_id, item.quantity))
        .collect();
    let mut seen = HashSet::with_capacity(request.received_items.len());
    let mut counts = Vec::with_capacity(request.received_items.len());
    for entry in &request.received_items {
        let quantity = *quantities
            .get(&entry.order_item_id)
            .ok_or(LifecycleError::UnknownOrderItem(entry.order_item_id))?;
        if !seen.insert(entry.order_item_id) {
            return Err(LifecycleError::DuplicateReceivedItem(entry.order_item_id));
        }
        if entry.received_quantity < 0 || entry.received_quantity > quantity {
            return Err(LifecycleError::ReceivedOutOfRange {
                order_item_id: entry.order_item_id,
                received: entry.received_quantity,
                quantity,
            });
        }
        counts.push(ReceivedCount {
            order_item_id: entry.order_item_id,
            received: entry.received_quantity,
        });
    }
    Ok(counts)
}
