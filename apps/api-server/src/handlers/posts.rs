//! Post CRUD handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{MediaRef, PostDraft, PostPatch};
use quill_shared::dto::{
    CreatePostRequest, CreatedResponse, DeletedResponse, MediaRefDto, UpdatePostRequest,
    UpdatedResponse,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = state.posts.create(into_draft(body.into_inner())).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        inserted_id: id.to_hex(),
    }))
}

/// GET /api/posts/{id}
pub async fn get_one(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_one(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let modified = state
        .posts
        .update(&path.into_inner(), into_patch(body.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(UpdatedResponse {
        modified_count: modified,
    }))
}

/// DELETE /api/posts/{id}
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let deleted = state.posts.remove(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        deleted_count: deleted,
    }))
}

fn into_draft(request: CreatePostRequest) -> PostDraft {
    PostDraft {
        title: request.title,
        author: request.author,
        content: request.content,
        excerpt: request.excerpt,
        cover_image: request.cover_image.map(into_media),
        cover_video: request.cover_video.map(into_media),
    }
}

fn into_patch(request: UpdatePostRequest) -> PostPatch {
    PostPatch {
        title: request.title,
        author: request.author,
        content: request.content,
        excerpt: request.excerpt,
        cover_image: request.cover_image.map(into_media),
        cover_video: request.cover_video.map(into_media),
    }
}

fn into_media(dto: MediaRefDto) -> MediaRef {
    MediaRef { url: dto.url }
}
