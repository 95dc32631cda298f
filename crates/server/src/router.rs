use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/majors", get(handlers::majors_handler))
        .route(
            "/majors/{major}/programs",
            get(handlers::programs_for_major_handler),
        )
        .route("/programs/{program}", get(handlers::program_details_handler))
        .route("/ask", post(handlers::ask_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
