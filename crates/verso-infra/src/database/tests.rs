#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use verso_core::domain::Post;
    use verso_core::error::RepoError;
    use verso_core::ports::PostRepository;

    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;

    fn post_model(post_id: uuid::Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            image: "img.png".to_owned(),
            slug: "test-post".to_owned(),
            excerpt: None,
            author_id: None,
            category_id: uuid::Uuid::new_v4(),
            tags: serde_json::json!(["rust"]),
            is_published: false,
            view_count: 0,
            comments: serde_json::json!([]),
            version: 3,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.title, "Test Post");
        assert_eq!(found.id, post_id);
        assert_eq!(found.version, 3);
        assert_eq!(found.tags, vec!["rust".to_string()]);
        assert!(found.comments.is_empty());
    }

    #[tokio::test]
    async fn test_save_bumps_version_when_row_matches() {
        let post_id = uuid::Uuid::new_v4();
        let loaded = Post::try_from(post_model(post_id)).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let saved = repo.save(loaded).await.unwrap();
        assert_eq!(saved.version, 4);
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let post_id = uuid::Uuid::new_v4();
        let loaded = Post::try_from(post_model(post_id)).unwrap();

        // No row matches the (id, version) condition.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let err = repo.save(loaded).await.unwrap_err();
        assert!(matches!(err, RepoError::Stale));
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
