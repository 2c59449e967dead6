//! Post handlers - listing, retrieval, and the multipart create/update
//! and delete mutations.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use uuid::Uuid;

use verso_core::domain::{PostDraft, PostPatch};
use verso_core::ports::{AssetStore, PostFilter};
use verso_shared::dto::{
    MessageResponse, PostEnvelope, PostListQuery, PostListResponse, PostResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Default page size for the post listing.
const DEFAULT_PAGE_SIZE: u64 = 10;

/// GET /api/posts?page&limit&search&category
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter {
        title_contains: query.search.filter(|s| !s.is_empty()),
        category: query.category,
    };

    let page = state
        .posts
        .list(
            filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse::from(page)))
}

/// GET /api/posts/:id
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let view = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(view)))
}

/// POST /api/posts - multipart: title, content, category, image (required)
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = read_post_form(payload, state.assets.as_ref()).await?;

    let category = form.require_category()?;
    let image = form
        .image
        .ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;

    let draft = PostDraft {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        image,
        category,
        author: Some(identity.user_id),
        excerpt: None,
        tags: Vec::new(),
    };

    let post = state.posts.create(draft).await?;
    let view = state.posts.get(post.id).await?;
    Ok(HttpResponse::Created().json(PostEnvelope {
        post: PostResponse::from(view),
    }))
}

/// PUT /api/posts/:id - multipart: title, content, category, image (optional)
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = read_post_form(payload, state.assets.as_ref()).await?;

    let category = form.require_category()?;
    let patch = PostPatch {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        category,
        image: form.image,
    };

    let post = state.posts.update(id, &identity.actor(), patch).await?;
    let view = state.posts.get(post.id).await?;
    Ok(HttpResponse::Ok().json(PostEnvelope {
        post: PostResponse::from(view),
    }))
}

/// DELETE /api/posts/:id
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner(), &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}

/// Fields collected from the multipart post form. The uploaded image is
/// streamed into the asset store as it arrives; only the returned
/// reference is kept.
#[derive(Default)]
struct PostForm {
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    image: Option<String>,
}

impl PostForm {
    fn require_category(&self) -> Result<Uuid, AppError> {
        let raw = self
            .category
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Category is required".to_string()))?;
        Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid category id".to_string()))
    }
}

async fn read_post_form(mut payload: Multipart, assets: &dyn AssetStore) -> Result<PostForm, AppError> {
    let mut form = PostForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(ToString::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "image" => {
                // An empty file part means no upload was attached.
                if !bytes.is_empty() {
                    let original = filename.unwrap_or_else(|| "upload.bin".to_string());
                    form.image = Some(assets.store(&original, bytes).await?);
                }
            }
            "title" => form.title = Some(text_field(bytes)?),
            "content" => form.content = Some(text_field(bytes)?),
            "category" => form.category = Some(text_field(bytes)?),
            _ => {}
        }
    }

    Ok(form)
}

fn text_field(bytes: Vec<u8>) -> Result<String, AppError> {
    String::from_utf8(bytes).map_err(|_| AppError::BadRequest("Invalid form field".to_string()))
}
