pub mod error;
pub mod handlers;
pub mod state;

pub use state::ApiState;

use axum::{Router, routing::get};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/news",
            get(handlers::list_news).post(handlers::create_news),
        )
        .route("/api/v1/news/search", get(handlers::search_news))
        .route(
            "/api/v1/news/{id}",
            get(handlers::get_news)
                .patch(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .with_state(state)
}
