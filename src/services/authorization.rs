//! Role-scoped visibility and mutation rules.
//!
//! Management sees everything, a supplier sees what carries its own
//! supplier id and a normal employee sees the orders it created. Every
//! check fails closed.

use crate::auth::Principal;
use crate::models::catalog::FoodItem;
use crate::models::common::Role;
use crate::models::complaints::Complaint;
use crate::models::orders::Order;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    CreatedBy(Uuid),
    Supplier(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    All,
    Supplier(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintScope {
    All,
    AgainstSupplier(Uuid),
    FiledBy(Uuid),
}

/// Whether management may write to the catalog. Off unless configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogWritePolicy {
    pub management_can_edit: bool,
}

pub fn order_scope(actor: &Principal) -> OrderScope {
    match actor.role {
        Role::Management => OrderScope::All,
        Role::Supplier => OrderScope::Supplier(actor.role_id),
        Role::NormalEmployee => OrderScope::CreatedBy(actor.user_id),
    }
}

impl OrderScope {
    pub fn covers(&self, order: &Order) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::CreatedBy(user_id) => order.order_creator_user_id == *user_id,
            OrderScope::Supplier(supplier_id) => order.supplier_id == *supplier_id,
        }
    }

    /// Narrows the scope to one creator, or `None` when the actor may not
    /// look at that creator's orders.
    pub fn restrict_to_creator(&self, creator: Uuid) -> Option<OrderScope> {
        match self {
            OrderScope::All => Some(OrderScope::CreatedBy(creator)),
            OrderScope::CreatedBy(own) if *own == creator => Some(*self),
            _ => None,
        }
    }

    /// Narrows the scope to one supplier, or `None` when not permitted.
    pub fn restrict_to_supplier(&self, supplier_id: Uuid) -> Option<OrderScope> {
        match self {
            OrderScope::All => Some(OrderScope::Supplier(supplier_id)),
            OrderScope::Supplier(own) if *own == supplier_id => Some(*self),
            _ => None,
        }
    }
}

pub fn can_view_order(actor: &Principal, order: &Order) -> bool {
    order_scope(actor).covers(order)
}

pub fn can_create_order(actor: &Principal) -> bool {
    actor.role.is_consumer()
}

pub fn catalog_scope(actor: &Principal) -> CatalogScope {
    match actor.role {
        Role::Supplier => CatalogScope::Supplier(actor.role_id),
        // Employees browse the whole catalog to place orders.
        Role::Management | Role::NormalEmployee => CatalogScope::All,
    }
}

impl CatalogScope {
    pub fn covers(&self, item: &FoodItem) -> bool {
        match self {
            CatalogScope::All => true,
            CatalogScope::Supplier(supplier_id) => item.supplier_id == *supplier_id,
        }
    }
}

pub fn can_view_food_item(actor: &Principal, item: &FoodItem) -> bool {
    catalog_scope(actor).covers(item)
}

/// Whether `actor` may create, edit or retire items of `supplier_id`.
pub fn can_write_catalog(actor: &Principal, supplier_id: Uuid, policy: CatalogWritePolicy) -> bool {
    match actor.role {
        Role::Supplier => actor.role_id == supplier_id,
        Role::Management => policy.management_can_edit,
        Role::NormalEmployee => false,
    }
}

pub fn complaint_scope(actor: &Principal) -> ComplaintScope {
    match actor.role {
        Role::Management => ComplaintScope::All,
        Role::Supplier => ComplaintScope::AgainstSupplier(actor.role_id),
        Role::NormalEmployee => ComplaintScope::FiledBy(actor.user_id),
    }
}

impl ComplaintScope {
    pub fn covers(&self, complaint: &Complaint) -> bool {
        match self {
            ComplaintScope::All => true,
            ComplaintScope::AgainstSupplier(supplier_id) => complaint.supplier_id == *supplier_id,
            ComplaintScope::FiledBy(user_id) => complaint.user_id == *user_id,
        }
    }
}

pub fn can_view_complaint(actor: &Principal, complaint: &Complaint) -> bool {
    complaint_scope(actor).covers(complaint)
}

pub fn can_file_complaint(actor: &Principal) -> bool {
    actor.role.is_consumer()
}

fn manages_or_is_supplier(actor: &Principal, supplier_id: Uuid) -> bool {
    match actor.role {
        Role::Management => true,
        Role::Supplier => actor.role_id == supplier_id,
        Role::NormalEmployee => false,
    }
}

pub fn can_list_complaints_of_supplier(actor: &Principal, supplier_id: Uuid) -> bool {
    manages_or_is_supplier(actor, supplier_id)
}

pub fn can_view_supplier_summary(actor: &Principal, supplier_id: Uuid) -> bool {
    manages_or_is_supplier(actor, supplier_id)
}

pub fn can_view_all_summaries(actor: &Principal) -> bool {
    actor.role == Role::Management
}
