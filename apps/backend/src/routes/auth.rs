use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_EMAIL", "Email cannot be empty"));
    }
    // String-level sanity only; real validation happens in the mail client.
    if !email.contains('@') {
        return Err(AppError::bad_request(
            "INVALID_EMAIL",
            "Email must contain '@'",
        ));
    }
    Ok(())
}

/// Register a new account with a username, email, and password.
async fn signup(
    req: web::Json<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError::bad_request(
            "INVALID_USERNAME",
            "Username cannot be empty",
        ));
    }
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_PASSWORD",
            "Password cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    users::register(
        &req.username,
        &req.email,
        &req.password,
        &app_state.security,
        db,
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User created successfully"
    })))
}

/// Exchange an email/password pair for a bearer token.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_PASSWORD",
            "Password cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    let user = users::authenticate(&req.email, &req.password, db).await?;

    let token = mint_access_token(user.id, &user.email, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserSummary {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signup").route(web::post().to(signup)))
        .service(web::resource("/login").route(web::post().to(login)));
}
