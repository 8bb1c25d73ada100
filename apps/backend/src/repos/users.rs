//! User repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_email(conn, email)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(
        conn,
        users_adapter::UserCreate {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        },
    )
    .await
    .map_err(map_db_err)?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
