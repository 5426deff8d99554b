use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Denied,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Denied => "denied",
        }
    }

    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Denied)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored leave request. Only the store mutates these; everything handed
/// out of the store is a clone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[schema(example = "7f8de3a4-7c1b-4f6e-9a36-9e9b0c1d2e3f", value_type = String)]
    /// leave application id
    pub id: Uuid,
    /// employee who filed the request
    #[schema(example = "0b9c6a2e-1d4f-4a8b-8c7d-5e6f7a8b9c0d", value_type = String)]
    pub requester_id: Uuid,
    /// manager/HR responsible for the decision, fixed at creation
    #[schema(example = "3c2d1e0f-9a8b-7c6d-5e4f-3a2b1c0d9e8f", value_type = String)]
    pub approver_id: Uuid,
    #[schema(example = "Flu")]
    pub reason: String,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    /// note left by the approver, set only when the request is decided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_note: Option<String>,
    #[schema(example = "2024-02-28T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    /// present exactly when status is no longer pending
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub decided_at: Option<DateTime<Utc>>,
}
