use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post};
use crate::error::RepoError;

/// Constraints applied when listing posts. Absent fields impose none.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive substring match on the title.
    pub title_contains: Option<String>,
    /// Exact category match.
    pub category: Option<Uuid>,
}

/// Repository for the post-discussion aggregate.
///
/// The whole aggregate is the unit of persistence: `save` writes the
/// entire post (embedded comments included) in one conditional write
/// keyed on the version read at load time. A mismatch yields
/// [`RepoError::Stale`] and nothing is written.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a brand-new aggregate. A duplicate slug yields
    /// [`RepoError::Constraint`].
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Load an aggregate by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Load an aggregate by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Fetch one page of matching aggregates plus the total match count
    /// ignoring pagination. `page` is 1-indexed; ties are broken by
    /// creation order.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Post>, u64), RepoError>;

    /// Write the whole aggregate back, bumping its version.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Hard-delete an aggregate.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Repository for the auxiliary category collection.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: Category) -> Result<Category, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
