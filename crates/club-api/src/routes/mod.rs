//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{applications, events, health, memberships, profiles, questions, terms};
use crate::state::AppState;

/// Create the main API router (health is exported separately for its own middleware)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, mounted outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(membership_routes())
        .merge(term_routes())
        .merge(question_routes())
        .merge(application_routes())
        .merge(event_routes())
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profiles/@me",
            get(profiles::get_my_profile)
                .post(profiles::create_my_profile)
                .patch(profiles::update_my_profile),
        )
        .route(
            "/profiles/@me/complete",
            get(profiles::get_my_profile_completion),
        )
}

/// Admin membership management
fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/memberships", get(memberships::list_memberships))
        .route(
            "/admin/memberships/:id",
            patch(memberships::update_membership).delete(memberships::delete_membership),
        )
        .route(
            "/admin/memberships/:id/payment",
            post(memberships::mark_membership_paid),
        )
}

fn term_routes() -> Router<AppState> {
    Router::new()
        .route("/terms", get(terms::list_terms).post(terms::create_term))
        .route("/terms/active", get(terms::get_active_term))
        .route(
            "/terms/:term_id",
            get(terms::get_term)
                .patch(terms::update_term)
                .delete(terms::delete_term),
        )
}

fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/terms/:term_id/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/terms/:term_id/questions/order",
            put(questions::reorder_questions),
        )
        .route(
            "/questions/:question_id",
            patch(questions::update_question).delete(questions::delete_question),
        )
}

fn application_routes() -> Router<AppState> {
    Router::new()
        // The caller's own application
        .route(
            "/terms/:term_id/application",
            get(applications::get_my_application)
                .post(applications::start_application)
                .patch(applications::update_my_application),
        )
        .route(
            "/terms/:term_id/application/answers",
            put(applications::save_answers),
        )
        .route(
            "/terms/:term_id/application/submit",
            post(applications::submit_application),
        )
        // Review
        .route(
            "/admin/terms/:term_id/applications",
            get(applications::list_applications),
        )
        .route(
            "/admin/terms/:term_id/applications/stats",
            get(applications::get_application_stats),
        )
        .route(
            "/admin/applications/:application_id",
            get(applications::get_application_for_review),
        )
        .route(
            "/admin/applications/:application_id/status",
            patch(applications::set_application_status),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:event_id/register", post(events::register))
        .route("/events/:event_id/check-in", post(events::check_in))
        .route("/events/:event_id/attendance", get(events::list_attendance))
        .route(
            "/events/:event_id/attendance/summary",
            get(events::get_attendance_summary),
        )
}
