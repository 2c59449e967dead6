use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Actor, Category, Comment, Post, PostDraft, PostPatch, Reply, TITLE_MAX_LEN};
use crate::error::DomainError;
use crate::policy;
use crate::ports::{AuthorProfile, CategoryRepository, PostFilter, PostRepository, UserDirectory};

/// A post with its category and author references resolved for display.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub category: Option<Category>,
    pub author: Option<AuthorProfile>,
}

/// One page of a post listing.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub items: Vec<PostView>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

/// Service for the post-discussion aggregate.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserDirectory>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            posts,
            categories,
            users,
        }
    }

    /// Create a new post from a draft.
    ///
    /// Validates required fields, derives the slug, and rejects slug
    /// collisions before anything is written.
    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        draft.validate()?;

        let post = Post::new(draft);
        if self.posts.find_by_slug(&post.slug).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "A post with slug '{}' already exists",
                post.slug
            )));
        }

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");
        Ok(post)
    }

    /// Load a post with resolved references. Performs no mutation.
    pub async fn get(&self, id: Uuid) -> Result<PostView, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))?;
        self.resolve(post).await
    }

    /// Apply an edit patch to a post.
    pub async fn update(
        &self,
        id: Uuid,
        actor: &Actor,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))?;

        if !policy::can_mutate(actor, post.author) {
            return Err(DomainError::Forbidden);
        }

        if patch.title.trim().is_empty() {
            return Err(DomainError::Validation("Please provide a title".into()));
        }
        if patch.title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(
                "Title cannot be more than 100 characters".into(),
            ));
        }
        if patch.content.trim().is_empty() {
            return Err(DomainError::Validation("Please provide content".into()));
        }

        let title_changed = post.apply(patch);
        if title_changed {
            if let Some(existing) = self.posts.find_by_slug(&post.slug).await? {
                if existing.id != post.id {
                    return Err(DomainError::Conflict(format!(
                        "A post with slug '{}' already exists",
                        post.slug
                    )));
                }
            }
        }

        let post = self.posts.save(post).await?;
        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Hard-delete a post.
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))?;

        if !policy::can_mutate(actor, post.author) {
            return Err(DomainError::Forbidden);
        }

        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// List posts matching `filter`, one page at a time.
    ///
    /// `page` is 1-indexed; out-of-range pages return empty items with
    /// the true total.
    pub async fn list(
        &self,
        filter: PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<PostPage, DomainError> {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let (posts, total) = self.posts.find_page(&filter, page, page_size).await?;

        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            items.push(self.resolve(post).await?);
        }

        Ok(PostPage {
            items,
            total,
            page,
            pages: total.div_ceil(page_size),
        })
    }

    /// Append a comment to a post's discussion.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let mut post = self.load(post_id).await?;
        let username = self.display_name(actor).await;
        let comment = post.add_comment(actor.id, username, content)?;
        self.posts.save(post).await?;
        Ok(comment)
    }

    /// Edit a comment's content.
    pub async fn edit_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let mut post = self.load(post_id).await?;
        let comment = post.edit_comment(comment_id, actor, content)?.clone();
        self.posts.save(post).await?;
        Ok(comment)
    }

    /// Remove a comment and all of its replies.
    pub async fn remove_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: &Actor,
    ) -> Result<(), DomainError> {
        let mut post = self.load(post_id).await?;
        post.remove_comment(comment_id, actor)?;
        self.posts.save(post).await?;
        Ok(())
    }

    /// Append a reply to a comment.
    pub async fn add_reply(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<Reply, DomainError> {
        let mut post = self.load(post_id).await?;
        let username = self.display_name(actor).await;
        let reply = post.add_reply(comment_id, actor.id, username, content)?;
        self.posts.save(post).await?;
        Ok(reply)
    }

    /// Edit a reply's content.
    pub async fn edit_reply(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        reply_id: Uuid,
        actor: &Actor,
        content: &str,
    ) -> Result<Reply, DomainError> {
        let mut post = self.load(post_id).await?;
        let reply = post.edit_reply(comment_id, reply_id, actor, content)?.clone();
        self.posts.save(post).await?;
        Ok(reply)
    }

    /// Remove a reply from its comment.
    pub async fn remove_reply(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        reply_id: Uuid,
        actor: &Actor,
    ) -> Result<(), DomainError> {
        let mut post = self.load(post_id).await?;
        post.remove_reply(comment_id, reply_id, actor)?;
        self.posts.save(post).await?;
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))
    }

    async fn resolve(&self, post: Post) -> Result<PostView, DomainError> {
        let category = self.categories.find_by_id(post.category).await?;
        let author = match post.author {
            Some(id) => self.users.lookup(id).await?,
            None => None,
        };
        Ok(PostView {
            post,
            category,
            author,
        })
    }

    /// Display-name snapshot for a commenting actor: the token claim
    /// when present, otherwise a directory lookup, otherwise "Unknown".
    async fn display_name(&self, actor: &Actor) -> String {
        if let Some(username) = &actor.username {
            return username.clone();
        }
        match self.users.lookup(actor.id).await {
            Ok(Some(profile)) => profile.username,
            Ok(None) => "Unknown".to_string(),
            Err(err) => {
                tracing::warn!(user_id = %actor.id, error = %err, "User directory lookup failed");
                "Unknown".to_string()
            }
        }
    }
}
