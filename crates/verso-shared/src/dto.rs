//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire; these are the shapes the
//! presentation layer consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verso_core::domain::{Category, Comment, Post, Reply};
use verso_core::ports::AuthorProfile;
use verso_core::service::{PostPage, PostView};

/// Request body for adding or editing a comment/reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Query parameters accepted by the post listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub category: Option<Uuid>,
}

/// Resolved author reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Category as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reply as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: Uuid,
    pub author: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<ReplyResponse>,
}

/// Post as rendered to clients, with references resolved and the latest
/// comment projected from the tail of the discussion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub author: Option<AuthorResponse>,
    pub category: Option<CategoryResponse>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub view_count: u64,
    pub comments: Vec<CommentResponse>,
    pub latest_comment: Option<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

/// `{post}` envelope returned by create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostResponse,
}

/// `{comment}` envelope returned by comment mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
}

/// `{reply}` envelope returned by reply mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    pub reply: ReplyResponse,
}

/// `{category}` envelope returned by category creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEnvelope {
    pub category: CategoryResponse,
}

/// `{categories}` envelope returned by the category listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesEnvelope {
    pub categories: Vec<CategoryResponse>,
}

/// `{message}` envelope returned by deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<AuthorProfile> for AuthorResponse {
    fn from(profile: AuthorProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            name: profile.name,
            email: profile.email,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            author: reply.author,
            username: reply.username,
            content: reply.content,
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            username: comment.username,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            replies: comment.replies.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        let latest_comment = view.post.latest_comment().cloned().map(Into::into);
        let Post {
            id,
            title,
            content,
            image,
            slug,
            excerpt,
            tags,
            is_published,
            view_count,
            comments,
            created_at,
            updated_at,
            ..
        } = view.post;

        Self {
            id,
            title,
            content,
            image,
            slug,
            excerpt,
            author: view.author.map(Into::into),
            category: view.category.map(Into::into),
            tags,
            is_published,
            view_count,
            comments: comments.into_iter().map(Into::into).collect(),
            latest_comment,
            created_at,
            updated_at,
        }
    }
}

impl From<PostPage> for PostListResponse {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            pages: page.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use verso_core::domain::PostDraft;

    #[test]
    fn post_response_uses_camel_case_and_projects_latest_comment() {
        let mut post = Post::new(PostDraft {
            title: "Hello, World!".into(),
            content: "Body".into(),
            image: "img.png".into(),
            category: Uuid::new_v4(),
            author: None,
            excerpt: None,
            tags: vec![],
        });
        post.add_comment(Uuid::new_v4(), "alice".into(), "first")
            .unwrap();
        post.add_comment(Uuid::new_v4(), "bob".into(), "second")
            .unwrap();

        let response = PostResponse::from(PostView {
            post,
            category: None,
            author: None,
        });
        assert_eq!(response.latest_comment.as_ref().unwrap().content, "second");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("latestComment").is_some());
        assert!(json.get("viewCount").is_some());
        assert!(json.get("isPublished").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
