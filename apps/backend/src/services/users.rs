use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;

/// Register a new account.
///
/// The email/username pre-check gives the common case a clean conflict;
/// the unique indexes catch the race where two signups for the same email
/// interleave, and `map_db_err` turns that violation into the same
/// conflict error.
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
    security: &SecurityConfig,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<User, AppError> {
    if users::find_user_by_email(conn, email).await?.is_some() {
        return Err(AppError::conflict("EMAIL_TAKEN", "Email already registered"));
    }

    let password_hash = hash_password(password, security.bcrypt_cost)?;
    let user = users::create_user(conn, username, email, &password_hash).await?;

    info!(user_id = user.id, email = %Redacted(email), "account created");
    Ok(user)
}

/// Authenticate an email/password pair.
///
/// Unknown email and wrong password return the identical error so the
/// response never reveals whether an account exists.
pub async fn authenticate(
    email: &str,
    password: &str,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<User, AppError> {
    let user = match users::find_user_by_email(conn, email).await? {
        Some(user) => user,
        None => {
            debug!(email = %Redacted(email), "login for unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(password, &user.password_hash) {
        debug!(user_id = user.id, "login with wrong password");
        return Err(AppError::invalid_credentials());
    }

    debug!(user_id = user.id, "login succeeded");
    Ok(user)
}
