//! Application state - shared across all handlers.

use std::sync::Arc;

use verso_core::ports::{AssetStore, CategoryRepository, PostRepository, UserDirectory};
use verso_core::service::{CategoryService, PostService};
use verso_infra::{
    FsAssetStore, InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserDirectory,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
    pub assets: Arc<dyn AssetStore>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (post_repo, category_repo): (Arc<dyn PostRepository>, Arc<dyn CategoryRepository>) = {
            use verso_infra::{
                DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
            };

            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => (
                        Arc::new(PostgresPostRepository::new(connections.main.clone())),
                        Arc::new(PostgresCategoryRepository::new(connections.main.clone())),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (
                            Arc::new(InMemoryPostRepository::new()),
                            Arc::new(InMemoryCategoryRepository::new()),
                        )
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (
                    Arc::new(InMemoryPostRepository::new()),
                    Arc::new(InMemoryCategoryRepository::new()),
                )
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (post_repo, category_repo): (Arc<dyn PostRepository>, Arc<dyn CategoryRepository>) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            (
                Arc::new(InMemoryPostRepository::new()),
                Arc::new(InMemoryCategoryRepository::new()),
            )
        };

        let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let assets: Arc<dyn AssetStore> = Arc::new(FsAssetStore::new(&config.upload_dir));

        tracing::info!("Application state initialized");

        Self {
            posts: Arc::new(PostService::new(
                post_repo,
                category_repo.clone(),
                users,
            )),
            categories: Arc::new(CategoryService::new(category_repo)),
            assets,
        }
    }
}
