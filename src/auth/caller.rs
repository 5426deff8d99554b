use crate::model::role::Role;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};
use uuid::Uuid;

/// Authenticated identity forwarded by the session layer in front of this
/// service. Carried explicitly through every store/engine/query call rather
/// than read from ambient state.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
    /// next identity up the reporting line: the employee's manager, or a
    /// manager's HR contact. Absent for top-of-chain identities.
    pub reports_to: Option<Uuid>,
}

impl Caller {
    pub fn new(id: Uuid, role: Role, reports_to: Option<Uuid>) -> Self {
        Self { id, role, reports_to }
    }
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|h| h.to_str().ok())
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = match header_value(req, "X-Employee-Id").and_then(|v| Uuid::parse_str(v).ok()) {
            Some(id) => id,
            None => return ready(Err(ErrorUnauthorized("Missing or invalid X-Employee-Id"))),
        };

        let role = match header_value(req, "X-Employee-Role").and_then(Role::from_name) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Missing or invalid X-Employee-Role"))),
        };

        // optional: absent for identities with nobody above them
        let reports_to = match header_value(req, "X-Reports-To") {
            Some(v) => match Uuid::parse_str(v) {
                Ok(id) => Some(id),
                Err(_) => return ready(Err(ErrorUnauthorized("Invalid X-Reports-To"))),
            },
            None => None,
        };

        ready(Ok(Caller { id, role, reports_to }))
    }
}
