use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, patch, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/users/:uid/profile", get(handlers::get_profile).put(handlers::put_profile))
        .route(
            "/api/users/:uid/skills/:skill/track",
            post(handlers::track_skill).delete(handlers::untrack_skill),
        )
        .route("/api/users/:uid/skills/:skill/promote", post(handlers::promote_skill))
        .route(
            "/api/users/:uid/skills/:skill/logs",
            get(handlers::list_skill_logs).post(handlers::add_skill_log),
        )
        .route(
            "/api/users/:uid/skills/:skill/logs/:id",
            patch(handlers::edit_skill_log).delete(handlers::delete_skill_log),
        )
        .route("/api/users/:uid/notes", get(handlers::list_notes))
        .route(
            "/api/users/:uid/notes/:date",
            put(handlers::put_note)
                .patch(handlers::patch_note)
                .delete(handlers::delete_note),
        )
        .route("/api/users/:uid/streak", get(handlers::get_streak))
        .route("/api/users/:uid/progress", get(handlers::get_progress))
        .route("/api/users/:uid/progress/:skill", post(handlers::post_progress))
        .route("/api/users/:uid/summary", get(handlers::get_summary))
        .route("/api/users/:uid/dashboard", get(handlers::get_dashboard))
        .route("/api/recruiter/:uid", get(handlers::recruiter_json))
        .route("/recruiter/:uid", get(handlers::recruiter_page))
        .with_state(state)
}
