use crate::{api::analytics, config::Config};
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

    // One limiter for all analytics routes; wide windows make them the
    // heaviest queries the service runs.
    let analytics_limiter = build_limiter(config.rate_analytics_per_min);

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                .wrap(analytics_limiter)
                .service(
                    web::resource("/summary").route(web::get().to(analytics::attendance_summary)),
                )
                .service(
                    web::resource("/organizations")
                        .route(web::get().to(analytics::attendance_per_organization)),
                )
                .service(
                    web::resource("/users").route(web::get().to(analytics::attendance_users)),
                )
                .service(
                    web::resource("/sessions").route(web::get().to(analytics::attendance_sessions)),
                )
                .service(
                    web::resource("/top-performers")
                        .route(web::get().to(analytics::top_performers)),
                ),
        ),
    );
}
