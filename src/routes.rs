use crate::{api::leave_request, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let apply_limiter = build_limiter(config.rate_apply_per_min);
    let leave_limiter = build_limiter(config.rate_leave_per_min);

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/leave")
                .wrap(leave_limiter)
                // /leave/apply
                .service(
                    web::resource("/apply")
                        .wrap(apply_limiter)
                        .route(web::post().to(leave_request::apply_leave)),
                )
                // /leave/user/{id}
                .service(
                    web::resource("/user/{id}")
                        .route(web::get().to(leave_request::leave_history)),
                )
                // /leave/approver/{id}
                .service(
                    web::resource("/approver/{id}")
                        .route(web::get().to(leave_request::approver_queue)),
                )
                // /leave/{id}
                .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                // /leave/{id}/approve
                .service(
                    web::resource("/{id}/approve")
                        .route(web::put().to(leave_request::approve_leave)),
                )
                // /leave/{id}/deny
                .service(
                    web::resource("/{id}/deny").route(web::put().to(leave_request::deny_leave)),
                ),
        ),
    );
}

// SUBMIT
//  └─ POST /leave/apply → Pending, routed to the requester's reports_to
//
// DECIDE
//  ├─ PUT /leave/{id}/approve → Approved (terminal)
//  └─ PUT /leave/{id}/deny    → Denied (terminal)
