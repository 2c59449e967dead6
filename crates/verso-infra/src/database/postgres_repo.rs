//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use verso_core::domain::{Category, Post};
use verso_core::error::RepoError;
use verso_core::ports::{CategoryRepository, PostFilter, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository. One row per aggregate; every save writes
/// the whole row conditionally on the loaded version.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// PostgreSQL category repository.
pub struct PostgresCategoryRepository {
    db: DbConn,
}

impl PostgresCategoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(err: sea_orm::DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

fn decode_err(err: serde_json::Error) -> RepoError {
    RepoError::Query(format!("Malformed embedded document: {err}"))
}

/// Escape LIKE metacharacters in a user-supplied needle.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, entry: Post) -> Result<Post, RepoError> {
        let model = post::to_active_model(&entry).map_err(decode_err)?;
        PostEntity::insert(model).exec(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("A post with this slug already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;
        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        result.map(Post::try_from).transpose().map_err(decode_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        result.map(Post::try_from).transpose().map_err(decode_err)
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let mut query = PostEntity::find();
        if let Some(needle) = &filter.title_contains {
            query = query
                .filter(Expr::col(post::Column::Title).ilike(format!("%{}%", escape_like(needle))));
        }
        if let Some(category) = filter.category {
            query = query.filter(post::Column::CategoryId.eq(category));
        }

        let total = query.clone().count(&self.db).await.map_err(query_err)?;

        let rows = query
            .order_by_asc(post::Column::CreatedAt)
            .offset((page - 1) * page_size)
            .limit(page_size)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(decode_err)?;

        Ok((posts, total))
    }

    async fn save(&self, entry: Post) -> Result<Post, RepoError> {
        let loaded_version = entry.version;
        let mut next = entry;
        next.version += 1;

        let model = post::to_active_model(&next).map_err(decode_err)?;
        let result = PostEntity::update_many()
            .set(model)
            .filter(post::Column::Id.eq(next.id))
            .filter(post::Column::Version.eq(i64::try_from(loaded_version).unwrap_or(i64::MAX)))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::Stale);
        }
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, entry: Category) -> Result<Category, RepoError> {
        let model = category::ActiveModel::from(entry.clone());
        CategoryEntity::insert(model)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let rows = CategoryEntity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = CategoryEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
