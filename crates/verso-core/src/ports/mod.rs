//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod assets;
mod auth;
mod repository;
mod users;

pub use assets::{AssetError, AssetStore};
pub use auth::{AuthError, TokenClaims, TokenService};
pub use repository::{CategoryRepository, PostFilter, PostRepository};
pub use users::{AuthorProfile, UserDirectory};
