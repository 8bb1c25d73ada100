use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::infra::db::DbKind;
use backend::infra::state::build_state;
use backend::media::{MediaStore, DEFAULT_MEDIA_ROOT};
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or sourced env files for local dev).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    // The signing secret is the one piece of config without which the
    // process must not come up.
    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    let mut security_config = SecurityConfig::new(jwt.as_bytes());
    if let Ok(ttl) = std::env::var("BACKEND_TOKEN_TTL_SECS") {
        match ttl.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                security_config = security_config.with_token_ttl(Duration::from_secs(secs));
            }
            _ => {
                eprintln!("BACKEND_TOKEN_TTL_SECS must be a positive integer");
                std::process::exit(1);
            }
        }
    }

    let media_root =
        std::env::var("BACKEND_MEDIA_ROOT").unwrap_or_else(|_| DEFAULT_MEDIA_ROOT.to_string());

    let app_state = match build_state()
        .with_db(DbKind::Postgres, DbProfile::Prod)
        .with_security(security_config)
        .with_media(MediaStore::new(media_root))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(host = %host, port, "starting backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
