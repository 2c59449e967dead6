//! User directory port.
//!
//! User records belong to the external identity service. The core only
//! holds author ids plus denormalized username snapshots, and consults
//! the directory to resolve an id into a display profile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RepoError;

/// Display profile for an author reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Read-only lookup into the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn lookup(&self, id: Uuid) -> Result<Option<AuthorProfile>, RepoError>;
}
