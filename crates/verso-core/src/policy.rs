//! Ownership-based mutation policy.

use uuid::Uuid;

use crate::domain::Actor;

/// Decide whether `actor` may edit or delete a resource owned by `owner`.
///
/// Admins may mutate anything. Everyone else must own the resource.
/// A resource with no owner (a post created without an author) is
/// mutable by admins only.
pub fn can_mutate(actor: &Actor, owner: Option<Uuid>) -> bool {
    if actor.is_admin {
        return true;
    }
    owner == Some(actor.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid) -> Actor {
        Actor {
            id,
            username: None,
            is_admin: false,
        }
    }

    fn admin() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            username: None,
            is_admin: true,
        }
    }

    #[test]
    fn owner_may_mutate() {
        let id = Uuid::new_v4();
        assert!(can_mutate(&user(id), Some(id)));
    }

    #[test]
    fn stranger_may_not_mutate() {
        assert!(!can_mutate(&user(Uuid::new_v4()), Some(Uuid::new_v4())));
    }

    #[test]
    fn admin_may_mutate_anything() {
        assert!(can_mutate(&admin(), Some(Uuid::new_v4())));
        assert!(can_mutate(&admin(), None));
    }

    #[test]
    fn ownerless_resource_is_admin_only() {
        assert!(!can_mutate(&user(Uuid::new_v4()), None));
    }
}
