use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::posts::Post;
use crate::services::posts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub contents: Option<String>,
    /// Base64-encoded image payload
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Public path of the stored image file
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub contents: Option<String>,
    pub deleted: bool,
    pub created_at: OffsetDateTime,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            description: post.description,
            image: post.image,
            tags: post.tags,
            contents: post.contents,
            deleted: post.deleted,
            created_at: post.created_at,
        }
    }
}

/// Create a post owned by the caller. Auth required.
async fn create_post(
    identity: CurrentUser,
    req: web::Json<CreatePostRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_TITLE", "Title cannot be empty"));
    }

    let req = req.into_inner();

    // Decode + persist the image before touching the database so a bad
    // payload never leaves a half-created post behind.
    let image_path = match &req.image {
        Some(payload) => Some(app_state.media.save_image(payload).await?),
        None => None,
    };

    let db = require_db(&app_state)?;
    let post = posts::create_post(
        &identity,
        req.title,
        req.description,
        image_path,
        req.tags,
        req.contents,
        db,
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Post created successfully",
        "post_id": post.id
    })))
}

/// List all non-deleted posts, newest first. Public.
async fn list_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let posts = posts::list_posts(db).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// List the caller's non-deleted posts. Auth required.
async fn list_my_posts(
    identity: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let posts = posts::list_my_posts(&identity, db).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one post by id. Public.
async fn get_post(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let post = posts::get_post(path.into_inner(), db).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// Soft-delete one of the caller's posts. Auth required; a post that is
/// absent, already deleted, or not the caller's reports the same 404.
async fn delete_post(
    identity: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    posts::delete_post(&identity, path.into_inner(), db).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post deleted" })))
}

/// Restore one of the caller's soft-deleted posts. Auth required.
async fn restore_post(
    identity: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    posts::restore_post(&identity, path.into_inner(), db).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Post restored" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // "/my" must be registered ahead of "/{id}" so it isn't captured as
    // a path parameter.
    cfg.service(
        web::resource("")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    )
    .service(web::resource("/my").route(web::get().to(list_my_posts)))
    .service(web::resource("/{id}/restore").route(web::post().to(restore_post)))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_post))
            .route(web::delete().to(delete_post)),
    );
}
