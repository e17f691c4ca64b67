pub mod forms;
pub mod health;
pub mod profiles;

use crate::orchestration::ProfileService;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileService,
}

impl AppState {
    pub fn new(profiles: ProfileService) -> Self {
        Self { profiles }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles/create", post(profiles::create_profile))
        .route("/profiles/update", post(profiles::update_profiles))
        .route("/profiles/delete", post(profiles::delete_profile))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
