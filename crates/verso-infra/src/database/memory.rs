//! In-memory repositories - used as fallback when the database is
//! unavailable, and by tests.
//!
//! Aggregates are held in insertion order, which is also the tie-break
//! order for listings. Saves are compare-and-swap on the version
//! counter, matching the conditional write of the Postgres adapter.
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use verso_core::domain::{Category, Post};
use verso_core::error::RepoError;
use verso_core::ports::{CategoryRepository, PostFilter, PostRepository};

/// In-memory post repository backed by a Vec under an async RwLock.
pub struct InMemoryPostRepository {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(post: &Post, filter: &PostFilter) -> bool {
    if let Some(needle) = &filter.title_contains {
        if !post.title.to_lowercase().contains(&needle.to_lowercase()) {
            return false;
        }
    }
    if let Some(category) = filter.category {
        if post.category != category {
            return false;
        }
    }
    true
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(
                "A post with this slug already exists".to_string(),
            ));
        }
        rows.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let rows = self.rows.read().await;
        let matching: Vec<&Post> = rows.iter().filter(|p| matches(p, filter)).collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(((page.saturating_sub(1)) * page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        if slot.version != post.version {
            return Err(RepoError::Stale);
        }
        let mut next = post;
        next.version += 1;
        *slot = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    rows: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        self.rows.write().await.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.rows.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
