use axum::{
    routing::get,
    Router,
};

use crate::api::handlers::{self, AppState};

pub fn create_router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Resource graph introspection
        .route("/resources", get(handlers::list_resources))
        // Query resolution
        .route(
            "/:resource",
            get(handlers::handle_collection)
                .post(handlers::handle_collection)
                .patch(handlers::handle_collection)
                .delete(handlers::handle_collection),
        )
        .route(
            "/:resource/:id",
            get(handlers::handle_single)
                .post(handlers::handle_single)
                .patch(handlers::handle_single)
                .delete(handlers::handle_single),
        )
}
