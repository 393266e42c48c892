pub mod auth;
pub mod availability;
pub mod bookings;
pub mod companies;
pub mod documents;
pub mod events;
pub mod members;
pub mod session;
pub mod tasks;
pub mod timeslot;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        // Companies
        .route(
            "/api/v1/companies",
            get(companies::list).post(companies::create),
        )
        .route("/api/v1/companies/{company_id}", get(companies::get))
        // Tasks
        .route(
            "/api/v1/companies/{company_id}/tasks",
            get(tasks::list).post(tasks::create),
        )
        .route("/api/v1/companies/{company_id}/tasks/{id}", get(tasks::get))
        // Documents & folders
        .route(
            "/api/v1/companies/{company_id}/documents",
            get(documents::list).post(documents::upload),
        )
        .route(
            "/api/v1/companies/{company_id}/documents/{id}/download",
            get(documents::download),
        )
        .route(
            "/api/v1/companies/{company_id}/folders",
            get(documents::list_folders),
        )
        // Members & invitations
        .route(
            "/api/v1/companies/{company_id}/members",
            get(members::list).post(members::invite),
        )
        .route(
            "/api/v1/companies/{company_id}/members/accept",
            post(members::accept),
        )
        // Scheduling
        .route(
            "/api/v1/companies/{company_id}/bookings",
            get(bookings::list).post(bookings::create),
        )
        .route(
            "/api/v1/companies/{company_id}/events",
            get(events::list).post(events::create),
        )
        .route(
            "/api/v1/companies/{company_id}/availability",
            get(availability::lookup).post(availability::create),
        )
        // Session context
        .route(
            "/api/v1/session/company",
            get(session::get_active).put(session::switch),
        )
}
