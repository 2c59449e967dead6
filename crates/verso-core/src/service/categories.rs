use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Actor, Category};
use crate::error::{DomainError, RepoError};
use crate::ports::CategoryRepository;

/// Service for the auxiliary category collection.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Category, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Please provide a name".into()));
        }
        let category = self.categories.insert(Category::new(name, description)).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Delete a category. Admin only.
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        if !actor.is_admin {
            return Err(DomainError::Forbidden);
        }
        match self.categories.delete(id).await {
            Ok(()) => {
                tracing::info!(category_id = %id, "Category deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::not_found("Category", id)),
            Err(err) => Err(err.into()),
        }
    }
}
