use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::caller::Caller;
use crate::lifecycle::{Decision, TransitionError, may_decide};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::query::QueryService;
use crate::store::{LeaveStore, StoreError};
use crate::validate::{self, LeaveDraft};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DecideLeave {
    /// optional note shown to the requester alongside the decision
    #[schema(example = "ok")]
    pub note: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct QueueFilter {
    /// Narrow the queue to one status
    #[param(example = "pending")]
    pub status: Option<LeaveStatus>,
}

fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound => HttpResponse::NotFound().json(json!({
            "message": "Leave request not found"
        })),
        StoreError::Rejected(TransitionError::Forbidden) => HttpResponse::Forbidden().json(json!({
            "message": "You are not the approver for this request"
        })),
        StoreError::Rejected(TransitionError::AlreadyDecided(status)) => {
            // carry the current status so the client refreshes instead of retrying
            HttpResponse::Conflict().json(json!({
                "message": "Leave request already decided",
                "status": status
            }))
        }
        StoreError::InvalidRequest(_) => {
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}

/* =========================
Apply for leave (Employee/Manager)
========================= */
/// Swagger doc for apply_leave endpoint
#[utoipa::path(
    post,
    path = "/leave/apply",
    request_body(
        content = LeaveDraft,
        description = "Leave draft payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request created", body = LeaveRequest),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": { "reason": "Reason is required" }
        })),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Caller has no approver on record", body = Object, example = json!({
            "message": "No approver on record for this employee"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "leave_apply", skip(store, payload), fields(requester_id = %caller.id))]
pub async fn apply_leave(
    caller: Caller,
    store: web::Data<LeaveStore>,
    payload: web::Json<LeaveDraft>,
) -> actix_web::Result<impl Responder> {
    // 1️⃣ validate the draft, reporting every failing field
    if let Err(errors) = validate::validate(&payload) {
        info!(failed_fields = errors.len(), "Leave draft rejected");
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Validation failed",
            "errors": errors
        })));
    }

    // 2️⃣ the approver is the next identity up the reporting line
    let approver_id = match caller.reports_to {
        Some(id) => id,
        None => {
            info!("Leave draft rejected: caller has no approver");
            return Ok(HttpResponse::UnprocessableEntity().json(json!({
                "message": "No approver on record for this employee"
            })));
        }
    };

    // 3️⃣ admit the request; the created record comes back so the client
    // can update its view without a full re-query
    match store.create(caller.id, approver_id, &payload) {
        Ok(request) => Ok(HttpResponse::Created().json(request)),
        Err(err) => Ok(store_error_response(err)),
    }
}

/* =========================
Leave history per requester
========================= */
/// Swagger doc for leave_history endpoint
#[utoipa::path(
    get,
    path = "/leave/user/{id}",
    params(
        ("id" = String, Path, description = "Requester whose history to fetch")
    ),
    responses(
        (status = 200, description = "Leave history, most recent first", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn leave_history(
    caller: Caller,
    queries: web::Data<QueryService>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let requester_id = path.into_inner();

    // a requester reads their own history; HR reads anyone's
    if caller.id != requester_id && !caller.role.is_elevated() {
        return Ok(HttpResponse::Forbidden().json(json!({
            "message": "You may only view your own leave history"
        })));
    }

    Ok(HttpResponse::Ok().json(queries.for_employee(requester_id)))
}

/* =========================
Approval queue per approver
========================= */
/// Swagger doc for approver_queue endpoint
#[utoipa::path(
    get,
    path = "/leave/approver/{id}",
    params(
        ("id" = String, Path, description = "Approver whose queue to fetch"),
        QueueFilter
    ),
    responses(
        (status = 200, description = "Approval queue, most recent first", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Leave"
)]
pub async fn approver_queue(
    caller: Caller,
    queries: web::Data<QueryService>,
    path: web::Path<Uuid>,
    query: web::Query<QueueFilter>,
) -> actix_web::Result<impl Responder> {
    let approver_id = path.into_inner();

    if caller.id != approver_id && !caller.role.is_elevated() {
        return Ok(HttpResponse::Forbidden().json(json!({
            "message": "You may only view your own approval queue"
        })));
    }

    Ok(HttpResponse::Ok().json(queries.for_approver(approver_id, query.status)))
}

/* =========================
Fetch one leave request
========================= */
/// Swagger doc for get_leave endpoint
#[utoipa::path(
    get,
    path = "/leave/{id}",
    params(
        ("id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    caller: Caller,
    store: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let request = match store.get(leave_id) {
        Ok(r) => r,
        Err(err) => return Ok(store_error_response(err)),
    };

    // readable by the requester, the assigned approver, and HR
    let readable = caller.id == request.requester_id || may_decide(&caller, &request);
    if !readable {
        return Ok(HttpResponse::Forbidden().json(json!({
            "message": "You may not view this leave request"
        })));
    }

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Approve leave (assigned approver / HR)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/leave/{id}/approve",
    params(
        ("id" = String, Path, description = "ID of the leave request to approve")
    ),
    request_body(
        content = DecideLeave,
        description = "Optional decision note",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already decided", body = Object, example = json!({
            "message": "Leave request already decided",
            "status": "approved"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "leave_approve", skip(store, body), fields(actor_id = %caller.id))]
pub async fn approve_leave(
    caller: Caller,
    store: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
    body: Option<web::Json<DecideLeave>>,
) -> actix_web::Result<impl Responder> {
    Ok(decide_leave(&store, &caller, path.into_inner(), Decision::Approve, body))
}

/* =========================
Deny leave (assigned approver / HR)
========================= */
/// Swagger doc for deny_leave endpoint
#[utoipa::path(
    put,
    path = "/leave/{id}/deny",
    params(
        ("id" = String, Path, description = "ID of the leave request to deny")
    ),
    request_body(
        content = DecideLeave,
        description = "Optional decision note",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave denied", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already decided")
    ),
    tag = "Leave"
)]
#[instrument(name = "leave_deny", skip(store, body), fields(actor_id = %caller.id))]
pub async fn deny_leave(
    caller: Caller,
    store: web::Data<LeaveStore>,
    path: web::Path<Uuid>,
    body: Option<web::Json<DecideLeave>>,
) -> actix_web::Result<impl Responder> {
    Ok(decide_leave(&store, &caller, path.into_inner(), Decision::Deny, body))
}

fn decide_leave(
    store: &LeaveStore,
    caller: &Caller,
    leave_id: Uuid,
    decision: Decision,
    body: Option<web::Json<DecideLeave>>,
) -> HttpResponse {
    let note = body.and_then(|b| b.into_inner().note);

    match store.transition(leave_id, caller, decision, note) {
        Ok(request) => {
            info!(%leave_id, status = %request.status, "Leave request decided");
            HttpResponse::Ok().json(request)
        }
        Err(err) => store_error_response(err),
    }
}
