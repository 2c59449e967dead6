use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::policy;
use crate::slug::slugify;

use super::Actor;

/// Maximum length of a post title.
pub const TITLE_MAX_LEN: usize = 100;

/// Maximum length of a post excerpt.
pub const EXCERPT_MAX_LEN: usize = 200;

/// Post entity - the aggregate root of the post-discussion aggregate.
///
/// A post and its embedded comments/replies form one consistency unit:
/// they are loaded, mutated, and persisted as a whole. `version` is the
/// optimistic-concurrency counter checked on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Opaque reference into the binary asset store.
    pub image: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub author: Option<Uuid>,
    pub category: Uuid,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub view_count: u64,
    /// Insertion order is chronological; the tail is the latest comment.
    pub comments: Vec<Comment>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment owned by exactly one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: Uuid,
    /// Display-name snapshot taken at creation time, never re-synced.
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<Reply>,
}

/// Reply owned by exactly one comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: Uuid,
    pub author: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: String,
    pub category: Uuid,
    pub author: Option<Uuid>,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
}

/// Fields applied by a post update. `image` is optional because the
/// upload is optional on edit; the stored reference is kept otherwise.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
    pub category: Uuid,
    pub image: Option<String>,
}

impl Post {
    /// Build a new post from a validated draft, deriving the slug from
    /// the title. Field validation happens in [`PostDraft::validate`].
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&draft.title),
            title: draft.title,
            content: draft.content,
            image: draft.image,
            excerpt: draft.excerpt,
            author: draft.author,
            category: draft.category,
            tags: draft.tags,
            is_published: false,
            view_count: 0,
            comments: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The latest comment is always the tail of the sequence.
    pub fn latest_comment(&self) -> Option<&Comment> {
        self.comments.last()
    }

    /// Apply an update patch. Returns `true` when the title changed and
    /// the slug was recomputed, so the caller knows to re-check slug
    /// uniqueness before saving.
    pub fn apply(&mut self, patch: PostPatch) -> bool {
        let title_changed = patch.title != self.title;
        if title_changed {
            self.slug = slugify(&patch.title);
        }
        self.title = patch.title;
        self.content = patch.content;
        self.category = patch.category;
        if let Some(image) = patch.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
        title_changed
    }

    /// Append a comment to the tail of the discussion.
    ///
    /// `username` is the display-name snapshot for the commenting actor,
    /// resolved by the caller before the aggregate is touched.
    pub fn add_comment(
        &mut self,
        author: Uuid,
        username: String,
        content: &str,
    ) -> Result<Comment, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("Content is required".into()));
        }
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            author,
            username,
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
            replies: Vec::new(),
        };
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// Replace a comment's content, stamping a fresh `updated_at`.
    pub fn edit_comment(
        &mut self,
        comment_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<&Comment, DomainError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::not_found("Comment", comment_id))?;
        if !policy::can_mutate(actor, Some(comment.author)) {
            return Err(DomainError::Forbidden);
        }
        comment.content = content.to_owned();
        comment.updated_at = Utc::now();
        Ok(comment)
    }

    /// Remove a comment and, structurally, all of its replies.
    pub fn remove_comment(&mut self, comment_id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        let idx = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(DomainError::not_found("Comment", comment_id))?;
        if !policy::can_mutate(actor, Some(self.comments[idx].author)) {
            return Err(DomainError::Forbidden);
        }
        self.comments.remove(idx);
        Ok(())
    }

    /// Append a reply to an existing comment.
    pub fn add_reply(
        &mut self,
        comment_id: Uuid,
        author: Uuid,
        username: String,
        content: &str,
    ) -> Result<Reply, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("Content is required".into()));
        }
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::not_found("Comment", comment_id))?;
        let now = Utc::now();
        let reply = Reply {
            id: Uuid::new_v4(),
            author,
            username,
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        comment.replies.push(reply.clone());
        Ok(reply)
    }

    /// Replace a reply's content, stamping a fresh `updated_at`.
    pub fn edit_reply(
        &mut self,
        comment_id: Uuid,
        reply_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<&Reply, DomainError> {
        let reply = self.find_reply_mut(comment_id, reply_id)?;
        if !policy::can_mutate(actor, Some(reply.author)) {
            return Err(DomainError::Forbidden);
        }
        reply.content = content.to_owned();
        reply.updated_at = Utc::now();
        Ok(reply)
    }

    /// Remove a reply from its owning comment.
    pub fn remove_reply(
        &mut self,
        comment_id: Uuid,
        reply_id: Uuid,
        actor: &Actor,
    ) -> Result<(), DomainError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::not_found("Comment", comment_id))?;
        let idx = comment
            .replies
            .iter()
            .position(|r| r.id == reply_id)
            .ok_or(DomainError::not_found("Reply", reply_id))?;
        if !policy::can_mutate(actor, Some(comment.replies[idx].author)) {
            return Err(DomainError::Forbidden);
        }
        comment.replies.remove(idx);
        Ok(())
    }

    fn find_reply_mut(
        &mut self,
        comment_id: Uuid,
        reply_id: Uuid,
    ) -> Result<&mut Reply, DomainError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(DomainError::not_found("Comment", comment_id))?;
        comment
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or(DomainError::not_found("Reply", reply_id))
    }
}

impl PostDraft {
    /// Check required fields and length caps.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Please provide a title".into()));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(
                "Title cannot be more than 100 characters".into(),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("Please provide content".into()));
        }
        if self.image.is_empty() {
            return Err(DomainError::Validation("Image is required".into()));
        }
        if let Some(excerpt) = &self.excerpt {
            if excerpt.chars().count() > EXCERPT_MAX_LEN {
                return Err(DomainError::Validation(
                    "Excerpt cannot be more than 200 characters".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(category: Uuid, author: Option<Uuid>) -> PostDraft {
        PostDraft {
            title: "Hello, World!".into(),
            content: "Body".into(),
            image: "img-1.png".into(),
            category,
            author,
            excerpt: None,
            tags: vec![],
        }
    }

    fn actor(id: Uuid) -> Actor {
        Actor::new(id, Some("alice".into()), false)
    }

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Some("root".into()), true)
    }

    #[test]
    fn new_post_derives_slug() {
        let post = Post::new(draft(Uuid::new_v4(), None));
        assert_eq!(post.slug, "hello-world");
        assert!(!post.is_published);
        assert_eq!(post.view_count, 0);
        assert_eq!(post.version, 0);
    }

    #[test]
    fn apply_recomputes_slug_only_on_title_change() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let slug_before = post.slug.clone();

        let changed = post.apply(PostPatch {
            title: post.title.clone(),
            content: "New body".into(),
            category: post.category,
            image: None,
        });
        assert!(!changed);
        assert_eq!(post.slug, slug_before);

        let changed = post.apply(PostPatch {
            title: "A Different Title".into(),
            content: "New body".into(),
            category: post.category,
            image: None,
        });
        assert!(changed);
        assert_eq!(post.slug, "a-different-title");
    }

    #[test]
    fn apply_keeps_image_when_patch_has_none() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        post.apply(PostPatch {
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category,
            image: None,
        });
        assert_eq!(post.image, "img-1.png");
    }

    #[test]
    fn latest_comment_is_the_tail() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        assert!(post.latest_comment().is_none());

        let user = Uuid::new_v4();
        post.add_comment(user, "alice".into(), "first").unwrap();
        post.add_comment(user, "alice".into(), "second").unwrap();

        assert_eq!(post.latest_comment().unwrap().content, "second");
    }

    #[test]
    fn empty_comment_content_is_rejected() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let err = post
            .add_comment(Uuid::new_v4(), "alice".into(), "   ")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(post.comments.is_empty());
    }

    #[test]
    fn comment_snapshot_keeps_username_at_creation() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let user = Uuid::new_v4();
        post.add_comment(user, "old-name".into(), "hi").unwrap();
        assert_eq!(post.comments[0].username, "old-name");
    }

    #[test]
    fn edit_comment_bumps_updated_at_and_checks_owner() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let owner = Uuid::new_v4();
        let id = post
            .add_comment(owner, "alice".into(), "original")
            .unwrap()
            .id;
        let created = post.comments[0].created_at;

        let err = post
            .edit_comment(id, &actor(Uuid::new_v4()), "hacked")
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(post.comments[0].content, "original");

        post.edit_comment(id, &actor(owner), "edited").unwrap();
        assert_eq!(post.comments[0].content, "edited");
        assert_eq!(post.comments[0].created_at, created);
        assert!(post.comments[0].updated_at >= created);
    }

    #[test]
    fn removing_comment_cascades_replies() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let owner = Uuid::new_v4();
        let cid = post.add_comment(owner, "alice".into(), "root").unwrap().id;
        post.add_reply(cid, owner, "alice".into(), "r1").unwrap();
        post.add_reply(cid, owner, "alice".into(), "r2").unwrap();

        post.remove_comment(cid, &actor(owner)).unwrap();
        assert!(post.comments.is_empty());
    }

    #[test]
    fn admin_may_remove_any_comment() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let cid = post
            .add_comment(Uuid::new_v4(), "bob".into(), "hi")
            .unwrap()
            .id;
        post.remove_comment(cid, &admin()).unwrap();
        assert!(post.comments.is_empty());
    }

    #[test]
    fn reply_addressing_requires_both_ids() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let owner = Uuid::new_v4();
        let cid = post.add_comment(owner, "alice".into(), "root").unwrap().id;
        let rid = post.add_reply(cid, owner, "alice".into(), "r1").unwrap().id;

        let missing = Uuid::new_v4();
        assert!(matches!(
            post.edit_reply(missing, rid, &actor(owner), "x"),
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            post.edit_reply(cid, missing, &actor(owner), "x"),
            Err(DomainError::NotFound { .. })
        ));

        post.edit_reply(cid, rid, &actor(owner), "edited").unwrap();
        assert_eq!(post.comments[0].replies[0].content, "edited");

        post.remove_reply(cid, rid, &actor(owner)).unwrap();
        assert!(post.comments[0].replies.is_empty());
    }

    #[test]
    fn stranger_cannot_remove_reply() {
        let mut post = Post::new(draft(Uuid::new_v4(), None));
        let owner = Uuid::new_v4();
        let cid = post.add_comment(owner, "alice".into(), "root").unwrap().id;
        let rid = post.add_reply(cid, owner, "alice".into(), "r1").unwrap().id;

        let err = post
            .remove_reply(cid, rid, &actor(Uuid::new_v4()))
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(post.comments[0].replies.len(), 1);
    }

    #[test]
    fn draft_validation_enforces_required_fields() {
        let category = Uuid::new_v4();

        let mut d = draft(category, None);
        d.title = "  ".into();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft(category, None);
        d.title = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft(category, None);
        d.content = String::new();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft(category, None);
        d.image = String::new();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft(category, None);
        d.excerpt = Some("x".repeat(EXCERPT_MAX_LEN + 1));
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        assert!(draft(category, Some(Uuid::new_v4())).validate().is_ok());
    }
}
