//! # Verso Infrastructure
//!
//! Concrete implementations of the ports defined in `verso-core`.
//! This crate contains database, asset-store, and identity integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT bearer-token validation

pub mod assets;
pub mod database;
pub mod users;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use assets::FsAssetStore;
pub use database::{DatabaseConfig, InMemoryCategoryRepository, InMemoryPostRepository};
pub use users::InMemoryUserDirectory;

#[cfg(feature = "auth")]
pub use auth::JwtTokenService;

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository};
