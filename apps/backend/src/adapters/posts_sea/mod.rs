//! SeaORM adapter for the post repository.
//!
//! Delete and restore fold the ownership check into the UPDATE predicate:
//! the statement matches only rows whose `user_id` equals the caller's, so
//! a non-owner's mutation affects zero rows and is indistinguishable from
//! a missing id.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::posts;

pub mod dto;

pub use dto::PostCreate;

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PostCreate,
) -> Result<posts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let post_active = posts::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        description: Set(dto.description),
        image: Set(dto.image),
        tags: Set(dto.tags.map(|t| serde_json::json!(t))),
        contents: Set(dto.contents),
        deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    post_active.insert(conn).await
}

/// All non-deleted posts, newest first.
pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find()
        .filter(posts::Column::Deleted.eq(false))
        .order_by_desc(posts::Column::CreatedAt)
        .all(conn)
        .await
}

/// One user's non-deleted posts, newest first.
pub async fn list_posts_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find()
        .filter(posts::Column::UserId.eq(user_id))
        .filter(posts::Column::Deleted.eq(false))
        .order_by_desc(posts::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn find_post_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find_by_id(post_id)
        .filter(posts::Column::Deleted.eq(false))
        .one(conn)
        .await
}

/// Owner-predicated soft delete. Returns whether a row was updated.
pub async fn soft_delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = posts::Entity::update_many()
        .col_expr(posts::Column::Deleted, Expr::value(true))
        .col_expr(
            posts::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(posts::Column::Id.eq(post_id))
        .filter(posts::Column::UserId.eq(user_id))
        .filter(posts::Column::Deleted.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Owner-predicated restore of a soft-deleted post. Returns whether a row
/// was updated.
pub async fn restore_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = posts::Entity::update_many()
        .col_expr(posts::Column::Deleted, Expr::value(false))
        .col_expr(
            posts::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(posts::Column::Id.eq(post_id))
        .filter(posts::Column::UserId.eq(user_id))
        .filter(posts::Column::Deleted.eq(true))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
