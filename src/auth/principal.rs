use crate::models::common::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated actor behind a request. Passed explicitly into every
/// service call; nothing below the HTTP layer looks it up on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    /// Id of the role record: the supplier id for suppliers.
    pub role_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid, role: Role, role_id: Uuid) -> Self {
        Self {
            user_id,
            role,
            role_id,
        }
    }

    pub fn supplier_id(&self) -> Option<Uuid> {
        match self.role {
            Role::Supplier => Some(self.role_id),
            _ => None,
        }
    }
}
