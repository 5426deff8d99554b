use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::caller::Caller;
use crate::lifecycle::{self, Decision, TransitionError};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::notify::{LeaveEvent, Notifier};
use crate::validate::{self, LeaveDraft, ValidationErrors};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leave request not found")]
    NotFound,
    /// Draft failed the store's defensive re-validation. The boundary runs
    /// the validator before calling `create`, so hitting this means a caller
    /// bypassed it.
    #[error("leave draft failed re-validation")]
    InvalidRequest(ValidationErrors),
    #[error(transparent)]
    Rejected(#[from] TransitionError),
}

/// Authoritative collection of leave requests. Sole owner of every record:
/// callers get clones, and all mutation goes through `create`/`transition`.
///
/// A single `RwLock` over the map serializes transitions per id (at most one
/// succeeds) and makes every read a consistent snapshot.
pub struct LeaveStore {
    records: RwLock<HashMap<Uuid, LeaveRequest>>,
    notifier: Arc<dyn Notifier>,
}

impl LeaveStore {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            notifier,
        }
    }

    /// Admit a validated draft. Assigns the id, stamps `created_at`, starts
    /// the request in `Pending`, and returns the stored record.
    pub fn create(
        &self,
        requester_id: Uuid,
        approver_id: Uuid,
        draft: &LeaveDraft,
    ) -> Result<LeaveRequest, StoreError> {
        let validated = validate::validate(draft).map_err(|errors| {
            tracing::error!(
                %requester_id,
                failed_fields = errors.len(),
                "Draft reached the store without passing validation"
            );
            StoreError::InvalidRequest(errors)
        })?;

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            requester_id,
            approver_id,
            reason: validated.reason,
            start_date: validated.start_date,
            end_date: validated.end_date,
            status: LeaveStatus::Pending,
            decision_note: None,
            created_at: Utc::now(),
            decided_at: None,
        };

        {
            let mut records = self.records.write().expect("leave store lock poisoned");
            records.insert(request.id, request.clone());
        }

        self.notifier.notify(&LeaveEvent::Submitted(request.clone()));
        Ok(request)
    }

    pub fn get(&self, id: Uuid) -> Result<LeaveRequest, StoreError> {
        let records = self.records.read().expect("leave store lock poisoned");
        records.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    /// History for one requester, most recent first.
    pub fn list_by_requester(&self, requester_id: Uuid) -> Vec<LeaveRequest> {
        let records = self.records.read().expect("leave store lock poisoned");
        let mut items: Vec<LeaveRequest> = records
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Approval queue for one approver, optionally narrowed by status,
    /// most recent first.
    pub fn list_by_approver(
        &self,
        approver_id: Uuid,
        status: Option<LeaveStatus>,
    ) -> Vec<LeaveRequest> {
        let records = self.records.read().expect("leave store lock poisoned");
        let mut items: Vec<LeaveRequest> = records
            .values()
            .filter(|r| r.approver_id == approver_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Decide a pending request. Legality is delegated to the lifecycle
    /// engine while the write lock is held, so concurrent decisions on the
    /// same id resolve to exactly one success; the rest observe
    /// `AlreadyDecided` (or `Forbidden`). A failed call leaves the record
    /// untouched.
    pub fn transition(
        &self,
        id: Uuid,
        actor: &Caller,
        decision: Decision,
        note: Option<String>,
    ) -> Result<LeaveRequest, StoreError> {
        let decided = {
            let mut records = self.records.write().expect("leave store lock poisoned");
            let request = records.get_mut(&id).ok_or(StoreError::NotFound)?;

            let next = lifecycle::decide(request, actor, decision)?;

            request.status = next;
            request.decision_note = note;
            request.decided_at = Some(Utc::now());
            request.clone()
        };

        self.notifier.notify(&LeaveEvent::Decided(decided.clone()));
        Ok(decided)
    }
}
