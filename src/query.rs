use std::sync::Arc;

use uuid::Uuid;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store::LeaveStore;

/// Role-scoped read facade over the store. Trusts the identity handed in;
/// authentication happened upstream. Everything returned is an owned copy,
/// so callers can never mutate stored records through it.
pub struct QueryService {
    store: Arc<LeaveStore>,
}

impl QueryService {
    pub fn new(store: Arc<LeaveStore>) -> Self {
        Self { store }
    }

    /// An employee's own history, most recent first.
    pub fn for_employee(&self, employee_id: Uuid) -> Vec<LeaveRequest> {
        self.store.list_by_requester(employee_id)
    }

    /// An approver's queue, optionally narrowed to one status.
    pub fn for_approver(
        &self,
        approver_id: Uuid,
        status: Option<LeaveStatus>,
    ) -> Vec<LeaveRequest> {
        self.store.list_by_approver(approver_id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use crate::validate::LeaveDraft;

    fn draft() -> LeaveDraft {
        LeaveDraft {
            reason: Some("Flu".to_string()),
            start_date: Some("2024-03-01".to_string()),
            end_date: Some("2024-03-03".to_string()),
        }
    }

    #[test]
    fn scopes_reads_to_the_given_identity() {
        let store = Arc::new(LeaveStore::new(Arc::new(LogNotifier)));
        let queries = QueryService::new(store.clone());

        let requester = Uuid::new_v4();
        let approver = Uuid::new_v4();
        store.create(requester, approver, &draft()).unwrap();
        store.create(Uuid::new_v4(), Uuid::new_v4(), &draft()).unwrap();

        assert_eq!(queries.for_employee(requester).len(), 1);
        assert_eq!(queries.for_approver(approver, None).len(), 1);
        assert_eq!(
            queries
                .for_approver(approver, Some(LeaveStatus::Pending))
                .len(),
            1
        );
        assert!(queries
            .for_approver(approver, Some(LeaveStatus::Approved))
            .is_empty());
        assert!(queries.for_employee(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn returned_copies_are_detached_from_the_store() {
        let store = Arc::new(LeaveStore::new(Arc::new(LogNotifier)));
        let queries = QueryService::new(store.clone());

        let requester = Uuid::new_v4();
        store.create(requester, Uuid::new_v4(), &draft()).unwrap();

        let mut view = queries.for_employee(requester);
        view[0].reason = "edited locally".to_string();

        assert_eq!(queries.for_employee(requester)[0].reason, "Flu");
    }
}
