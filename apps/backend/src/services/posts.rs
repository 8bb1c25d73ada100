use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::posts::{self, Post, PostCreate};

/// Create a post owned by the authenticated caller. The image, if any,
/// has already been written by the media store; `image` is its public
/// path.
pub async fn create_post(
    identity: &CurrentUser,
    title: String,
    description: Option<String>,
    image: Option<String>,
    tags: Option<Vec<String>>,
    contents: Option<String>,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<Post, AppError> {
    let post = posts::create_post(
        conn,
        PostCreate {
            user_id: identity.user_id,
            title,
            description,
            image,
            tags,
            contents,
        },
    )
    .await?;

    info!(post_id = post.id, user_id = identity.user_id, "post created");
    Ok(post)
}

/// All non-deleted posts, public.
pub async fn list_posts(
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<Vec<Post>, AppError> {
    Ok(posts::list_posts(conn).await?)
}

/// The caller's own non-deleted posts.
pub async fn list_my_posts(
    identity: &CurrentUser,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<Vec<Post>, AppError> {
    Ok(posts::list_posts_by_user(conn, identity.user_id).await?)
}

/// Fetch one non-deleted post, public.
pub async fn get_post(
    post_id: i64,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<Post, AppError> {
    posts::find_post_by_id(conn, post_id)
        .await?
        .ok_or_else(|| AppError::not_found("POST_NOT_FOUND", "Post not found"))
}

/// Soft-delete one of the caller's posts.
///
/// Ownership is folded into the UPDATE predicate; a post that is absent,
/// already deleted, or owned by someone else all produce the same
/// not-found error, so the response can't be used to probe other users'
/// post ids.
pub async fn delete_post(
    identity: &CurrentUser,
    post_id: i64,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<(), AppError> {
    let deleted = posts::soft_delete_post(conn, post_id, identity.user_id).await?;
    if !deleted {
        return Err(AppError::not_found("POST_NOT_FOUND", "Post not found"));
    }

    info!(post_id, user_id = identity.user_id, "post soft-deleted");
    Ok(())
}

/// Restore one of the caller's soft-deleted posts. Same visibility rules
/// as delete.
pub async fn restore_post(
    identity: &CurrentUser,
    post_id: i64,
    conn: &(impl ConnectionTrait + Send + Sync),
) -> Result<(), AppError> {
    let restored = posts::restore_post(conn, post_id, identity.user_id).await?;
    if !restored {
        return Err(AppError::not_found("POST_NOT_FOUND", "Post not found"));
    }

    info!(post_id, user_id = identity.user_id, "post restored");
    Ok(())
}
