//! Comment and reply handlers - the discussion subtree mutations.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use verso_shared::dto::{CommentEnvelope, CommentRequest, MessageResponse, ReplyEnvelope};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/:id/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .posts
        .add_comment(path.into_inner(), &identity.actor(), &body.content)
        .await?;
    Ok(HttpResponse::Created().json(CommentEnvelope {
        comment: comment.into(),
    }))
}

/// PUT /api/posts/:id/comments/:comment_id
pub async fn edit_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .posts
        .edit_comment(post_id, comment_id, &identity.actor(), &body.content)
        .await?;
    Ok(HttpResponse::Ok().json(CommentEnvelope {
        comment: comment.into(),
    }))
}

/// DELETE /api/posts/:id/comments/:comment_id
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .posts
        .remove_comment(post_id, comment_id, &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Comment deleted".to_string(),
    }))
}

/// POST /api/posts/:id/comments/:comment_id/replies
pub async fn add_reply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let reply = state
        .posts
        .add_reply(post_id, comment_id, &identity.actor(), &body.content)
        .await?;
    Ok(HttpResponse::Created().json(ReplyEnvelope {
        reply: reply.into(),
    }))
}

/// PUT /api/posts/:id/comments/:comment_id/replies/:reply_id
pub async fn edit_reply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id, reply_id) = path.into_inner();
    let reply = state
        .posts
        .edit_reply(post_id, comment_id, reply_id, &identity.actor(), &body.content)
        .await?;
    Ok(HttpResponse::Ok().json(ReplyEnvelope {
        reply: reply.into(),
    }))
}

/// DELETE /api/posts/:id/comments/:comment_id/replies/:reply_id
pub async fn delete_reply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id, reply_id) = path.into_inner();
    state
        .posts
        .remove_reply(post_id, comment_id, reply_id, &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Reply deleted".to_string(),
    }))
}
