//! HTTP handlers and route configuration.

mod categories;
mod comments;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post aggregate routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/comments", web::post().to(comments::add_comment))
                    .route(
                        "/{id}/comments/{comment_id}",
                        web::put().to(comments::edit_comment),
                    )
                    .route(
                        "/{id}/comments/{comment_id}",
                        web::delete().to(comments::delete_comment),
                    )
                    .route(
                        "/{id}/comments/{comment_id}/replies",
                        web::post().to(comments::add_reply),
                    )
                    .route(
                        "/{id}/comments/{comment_id}/replies/{reply_id}",
                        web::put().to(comments::edit_reply),
                    )
                    .route(
                        "/{id}/comments/{comment_id}/replies/{reply_id}",
                        web::delete().to(comments::delete_reply),
                    ),
            )
            // Category routes
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list_categories))
                    .route("", web::post().to(categories::create_category))
                    .route("/{id}", web::delete().to(categories::delete_category)),
            ),
    );
}
