//! In-memory user directory.
//!
//! User records live in the external identity service; a production
//! deployment points this port at that service. The in-memory adapter
//! serves tests and single-process setups where profiles are registered
//! at startup.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use verso_core::error::RepoError;
use verso_core::ports::{AuthorProfile, UserDirectory};

/// User directory backed by a process-local map.
pub struct InMemoryUserDirectory {
    profiles: RwLock<HashMap<Uuid, AuthorProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Register or replace a profile.
    pub async fn register(&self, profile: AuthorProfile) {
        self.profiles.write().await.insert(profile.id, profile);
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn lookup(&self, id: Uuid) -> Result<Option<AuthorProfile>, RepoError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_returns_registered_profile() {
        let directory = InMemoryUserDirectory::new();
        let id = Uuid::new_v4();
        directory
            .register(AuthorProfile {
                id,
                username: "alice".into(),
                name: None,
                email: None,
            })
            .await;

        let profile = directory.lookup(id).await.unwrap().unwrap();
        assert_eq!(profile.username, "alice");
        assert!(directory.lookup(Uuid::new_v4()).await.unwrap().is_none());
    }
}
