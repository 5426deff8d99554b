use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Hr,
}

impl Role {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            "hr" => Some(Role::Hr),
            _ => None,
        }
    }

    /// HR decides requests beyond its own direct reports.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Hr)
    }
}
