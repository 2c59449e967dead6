//! The authenticated caller of an operation.

use uuid::Uuid;

/// Claims describing the actor behind a request.
///
/// Built from a validated bearer token; the core trusts these values
/// verbatim. `username` may be absent on older tokens, in which case
/// the user directory is consulted for the display-name snapshot.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub username: Option<String>,
    pub is_admin: bool,
}

impl Actor {
    pub fn new(id: Uuid, username: Option<String>, is_admin: bool) -> Self {
        Self {
            id,
            username,
            is_admin,
        }
    }
}
