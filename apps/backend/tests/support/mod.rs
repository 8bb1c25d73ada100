//! Shared helpers for integration tests: in-memory SQLite state, app
//! construction, and auth/problem-details assertions.

use std::sync::Once;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use backend::config::db::DbProfile;
use backend::infra::db::DbKind;
use backend::infra::state::build_state;
use backend::media::MediaStore;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use serde_json::json;
use tempfile::TempDir;

static INIT_LOGGING: Once = Once::new();

pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_test_writer())
            .init();
    });
}

pub fn test_security() -> SecurityConfig {
    // Cost 4 keeps bcrypt fast in the suite; production cost comes from
    // SecurityConfig::new defaults.
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
        .with_bcrypt_cost(4)
}

/// Fresh migrated in-memory database + temp media root.
/// Keep the returned TempDir alive for the duration of the test.
pub async fn test_state() -> (AppState, TempDir) {
    init_logging();

    let media_dir = tempfile::tempdir().expect("create temp media dir");
    let state = build_state()
        .with_db(DbKind::SqliteMemory, DbProfile::Test)
        .with_security(test_security())
        .with_media(MediaStore::new(media_dir.path()))
        .build()
        .await
        .expect("build test state");

    (state, media_dir)
}

pub async fn signup<S, B>(app: &S, username: &str, email: &str, password: &str)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "signup should succeed");
}

/// Sign up a fresh account and return its bearer token.
pub async fn signup_and_login<S, B>(
    app: &S,
    username: &str,
    email: &str,
    password: &str,
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    signup(app, username, email, password).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in response").to_string()
}

/// Assert an application/problem+json response with the given status and
/// code, and return the parsed body.
pub async fn assert_problem<B>(
    resp: ServiceResponse<B>,
    status: u16,
    code: &str,
) -> serde_json::Value
where
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    assert_eq!(resp.status().as_u16(), status);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], code, "unexpected problem code: {body}");
    assert_eq!(body["status"], status);
    assert!(body["trace_id"].is_string());
    body
}
