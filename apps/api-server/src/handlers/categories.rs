//! Category handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use verso_shared::dto::{
    CategoriesEnvelope, CategoryEnvelope, CategoryRequest, MessageResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    Ok(HttpResponse::Ok().json(CategoriesEnvelope {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let category = state.categories.create(body.name, body.description).await?;
    Ok(HttpResponse::Created().json(CategoryEnvelope {
        category: category.into(),
    }))
}

/// DELETE /api/categories/:id - admin only
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .categories
        .delete(path.into_inner(), &identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Category deleted".to_string(),
    }))
}
