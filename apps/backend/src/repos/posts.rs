//! Post repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::posts_sea as posts_adapter;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

pub use posts_adapter::PostCreate;

/// Post domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub contents: Option<String>,
    pub deleted: bool,
    pub created_at: time::OffsetDateTime,
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PostCreate,
) -> Result<Post, DomainError> {
    let post = posts_adapter::create_post(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Post::from(post))
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Post>, DomainError> {
    let posts = posts_adapter::list_posts(conn).await.map_err(map_db_err)?;
    Ok(posts.into_iter().map(Post::from).collect())
}

pub async fn list_posts_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Post>, DomainError> {
    let posts = posts_adapter::list_posts_by_user(conn, user_id)
        .await
        .map_err(map_db_err)?;
    Ok(posts.into_iter().map(Post::from).collect())
}

pub async fn find_post_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, DomainError> {
    let post = posts_adapter::find_post_by_id(conn, post_id)
        .await
        .map_err(map_db_err)?;
    Ok(post.map(Post::from))
}

pub async fn soft_delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    posts_adapter::soft_delete_post(conn, post_id, user_id)
        .await
        .map_err(map_db_err)
}

pub async fn restore_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    posts_adapter::restore_post(conn, post_id, user_id)
        .await
        .map_err(map_db_err)
}

impl From<crate::entities::posts::Model> for Post {
    fn from(model: crate::entities::posts::Model) -> Self {
        let tags = model
            .tags
            .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
            .unwrap_or_default();

        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            image: model.image,
            tags,
            contents: model.contents,
            deleted: model.deleted,
            created_at: model.created_at,
        }
    }
}
