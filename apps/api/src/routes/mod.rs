pub mod health;

use axum::{routing::get, Router};

use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::templates::handlers as templates;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalog
        .route("/api/templates", get(templates::handle_list_templates))
        .route("/api/templates/:id", get(templates::handle_get_template))
        // Resume documents
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // Users
        .route("/api/users", axum::routing::post(users::handle_create_user))
        .route(
            "/api/users/:id",
            get(users::handle_get_user)
                .put(users::handle_update_user)
                .delete(users::handle_delete_user),
        )
        .with_state(state)
}
