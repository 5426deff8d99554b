use thiserror::Error;

use crate::auth::caller::Caller;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

/// The two events that move a request out of `Pending`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    pub fn target_status(&self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Deny => LeaveStatus::Denied,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TransitionError {
    /// Wrong state: the request already reached a terminal status. Carries
    /// the current status so the client can refresh instead of retrying.
    #[error("request already {0}")]
    AlreadyDecided(LeaveStatus),
    /// Wrong actor: not the assigned approver and not an elevated role.
    #[error("not authorized to decide this request")]
    Forbidden,
}

/// Transition legality check. Pure; the store invokes it under its write
/// lock and applies the returned status itself.
///
/// State is checked before the guard, so a decided request answers
/// `AlreadyDecided` to everyone, including actors who could never have
/// decided it.
pub fn decide(
    request: &LeaveRequest,
    actor: &Caller,
    decision: Decision,
) -> Result<LeaveStatus, TransitionError> {
    if request.status.is_terminal() {
        return Err(TransitionError::AlreadyDecided(request.status));
    }

    if !may_decide(actor, request) {
        return Err(TransitionError::Forbidden);
    }

    Ok(decision.target_status())
}

/// Guard shared by approve and deny: the assigned approver, or an elevated
/// role acting over it.
pub fn may_decide(actor: &Caller, request: &LeaveRequest) -> bool {
    actor.id == request.approver_id || actor.role.is_elevated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn pending_request(approver_id: Uuid) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            approver_id,
            reason: "Flu".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            status: LeaveStatus::Pending,
            decision_note: None,
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    fn manager(id: Uuid) -> Caller {
        Caller::new(id, Role::Manager, None)
    }

    #[test]
    fn assigned_approver_may_approve_and_deny() {
        let approver = Uuid::new_v4();
        let request = pending_request(approver);
        let actor = manager(approver);

        assert_eq!(
            decide(&request, &actor, Decision::Approve),
            Ok(LeaveStatus::Approved)
        );
        assert_eq!(
            decide(&request, &actor, Decision::Deny),
            Ok(LeaveStatus::Denied)
        );
    }

    #[test]
    fn other_manager_is_forbidden() {
        let request = pending_request(Uuid::new_v4());
        let outsider = manager(Uuid::new_v4());

        assert_eq!(
            decide(&request, &outsider, Decision::Approve),
            Err(TransitionError::Forbidden)
        );
    }

    #[test]
    fn hr_decides_beyond_its_own_queue() {
        let request = pending_request(Uuid::new_v4());
        let hr = Caller::new(Uuid::new_v4(), Role::Hr, None);

        assert_eq!(
            decide(&request, &hr, Decision::Deny),
            Ok(LeaveStatus::Denied)
        );
    }

    #[test]
    fn terminal_state_rejects_any_event() {
        let approver = Uuid::new_v4();
        let mut request = pending_request(approver);
        request.status = LeaveStatus::Approved;
        request.decided_at = Some(Utc::now());

        assert_eq!(
            decide(&request, &manager(approver), Decision::Deny),
            Err(TransitionError::AlreadyDecided(LeaveStatus::Approved))
        );
    }

    #[test]
    fn wrong_state_wins_over_wrong_actor() {
        // a decided request answers AlreadyDecided even to an outsider
        let mut request = pending_request(Uuid::new_v4());
        request.status = LeaveStatus::Denied;
        request.decided_at = Some(Utc::now());

        assert_eq!(
            decide(&request, &manager(Uuid::new_v4()), Decision::Approve),
            Err(TransitionError::AlreadyDecided(LeaveStatus::Denied))
        );
    }
}
