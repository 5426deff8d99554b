use crate::api::leave_request::DecideLeave;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::validate::LeaveDraft;
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oversee Leave API",
        version = "1.0.0",
        description = r#"
## Oversee Leave Request Lifecycle

This API powers the leave request workflow of the Oversee HR tool.

### 🔹 Key Features
- **Apply for Leave**
  - Submit a leave draft with reason and date range, field-level validation
- **Leave History**
  - Employees view their own requests, most recent first
- **Approval Queue**
  - Managers and HR list requests routed to them, filterable by status
- **Decisions**
  - Approve or deny a pending request with an optional note; terminal
    states never change again

### 🔐 Identity
The session layer in front of this service authenticates the caller and
forwards an opaque identity via the `X-Employee-Id`, `X-Employee-Role`
and `X-Reports-To` headers.

### 📦 Response Format
- JSON-based RESTful responses
- Mutations return the updated record so clients can refresh locally
"#
    ),
    paths(
        crate::api::leave_request::apply_leave,
        crate::api::leave_request::leave_history,
        crate::api::leave_request::approver_queue,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::deny_leave,
    ),
    components(schemas(LeaveDraft, LeaveRequest, LeaveStatus, Role, DecideLeave)),
    modifiers(&IdentityAddon),
    tags(
        (name = "Leave", description = "Leave request lifecycle endpoints")
    )
)]
pub struct ApiDoc;

pub struct IdentityAddon;

impl Modify for IdentityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "identity_headers",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Employee-Id"))),
            );
        }
    }
}
