//! Post aggregate entity for SeaORM.
//!
//! The embedded comment/reply sequences travel in a JSON column so the
//! whole aggregate is written in a single row update.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use verso_core::domain::Post;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub excerpt: Option<String>,
    pub author_id: Option<Uuid>,
    pub category_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub is_published: bool,
    pub view_count: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
    /// Optimistic-concurrency counter; saves are conditional on it.
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain aggregate. Fails only on
/// malformed JSON in the embedded sequences.
impl TryFrom<Model> for Post {
    type Error = serde_json::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            content: model.content,
            image: model.image,
            slug: model.slug,
            excerpt: model.excerpt,
            author: model.author_id,
            category: model.category_id,
            tags: serde_json::from_value(model.tags)?,
            is_published: model.is_published,
            view_count: u64::try_from(model.view_count).unwrap_or(0),
            comments: serde_json::from_value(model.comments)?,
            version: u64::try_from(model.version).unwrap_or(0),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from the domain aggregate to a SeaORM ActiveModel with
/// every column set.
pub fn to_active_model(post: &Post) -> Result<ActiveModel, serde_json::Error> {
    Ok(ActiveModel {
        id: Set(post.id),
        title: Set(post.title.clone()),
        content: Set(post.content.clone()),
        image: Set(post.image.clone()),
        slug: Set(post.slug.clone()),
        excerpt: Set(post.excerpt.clone()),
        author_id: Set(post.author),
        category_id: Set(post.category),
        tags: Set(serde_json::to_value(&post.tags)?),
        is_published: Set(post.is_published),
        view_count: Set(i64::try_from(post.view_count).unwrap_or(i64::MAX)),
        comments: Set(serde_json::to_value(&post.comments)?),
        version: Set(i64::try_from(post.version).unwrap_or(i64::MAX)),
        created_at: Set(post.created_at.into()),
        updated_at: Set(post.updated_at.into()),
    })
}
