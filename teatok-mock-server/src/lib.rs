use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod error;
pub use error::Error;

mod extractors;
mod handlers;

mod server;
pub use server::{MockHandle, MockServer};


pub fn app(server: MockHandle) -> Router {
    Router::new()
        .route("/users", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route("/users/anonymous", post(handlers::anonymous))
        .route("/users/logout", post(handlers::logout))
        .route(
            "/posts",
            get(handlers::fetch_posts).post(handlers::create_post),
        )
        .route("/posts/:post_id/comments", get(handlers::fetch_comments))
        .route("/comments", post(handlers::create_comment))
        .route("/comments/:comment_id", delete(handlers::delete_comment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}
