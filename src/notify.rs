use crate::model::leave_request::LeaveRequest;

/// Lifecycle event emitted once per successful store mutation.
#[derive(Debug, Clone)]
pub enum LeaveEvent {
    Submitted(LeaveRequest),
    Decided(LeaveRequest),
}

/// Hook informed of lifecycle events. Delivery (mail, chat, …) lives outside
/// this service; implementations here only hand the event over.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &LeaveEvent);
}

/// Default hook: structured log line per event.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &LeaveEvent) {
        match event {
            LeaveEvent::Submitted(request) => tracing::info!(
                leave_id = %request.id,
                requester_id = %request.requester_id,
                approver_id = %request.approver_id,
                "Leave request submitted"
            ),
            LeaveEvent::Decided(request) => tracing::info!(
                leave_id = %request.id,
                status = %request.status,
                approver_id = %request.approver_id,
                "Leave request decided"
            ),
        }
    }
}
