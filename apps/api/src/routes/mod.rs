pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};

use crate::customize::handlers;
use crate::middleware::auth::protect;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let customize = Router::new()
        .route(
            "/api/customize-resume",
            get(handlers::handle_list_customizations).post(handlers::handle_customize_resume),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), protect));

    Router::new()
        .route("/", get(health::banner_handler))
        .route("/health", get(health::health_handler))
        .merge(customize)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
