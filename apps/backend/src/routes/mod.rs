use actix_web::web;

pub mod auth;
pub mod health;
pub mod posts;

/// Configure application routes.
///
/// Registered identically by `main.rs` and by the integration-test app
/// builder, so endpoint behavior can be exercised without a real server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Post routes: /api/posts/**
    cfg.service(web::scope("/api/posts").configure(posts::configure_routes));
}
