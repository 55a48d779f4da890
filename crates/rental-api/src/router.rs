//! Route definitions for the RentBoard HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(advertisement_routes())
        .merge(my_routes())
        .merge(payment_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Public catalog and listing submission
fn advertisement_routes() -> Router<AppState> {
    use handlers::advertisement as ads;

    Router::new()
        .route("/advertisements", get(ads::list).post(ads::create))
        .route("/advertisements/most-viewed", get(ads::most_viewed))
        .route("/advertisements/recent", get(ads::recent))
        .route("/advertisements/{id}", get(ads::detail))
        .route("/advertisements/{id}/phone-number", get(ads::phone_number))
}

/// The caller's own listings
fn my_routes() -> Router<AppState> {
    use handlers::my;

    Router::new()
        .route("/my/advertisements", get(my::list))
        .route(
            "/my/advertisements/{id}",
            get(my::detail).put(my::update).delete(my::delete),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new().route(
        "/payments/subscription-fee",
        post(handlers::payment::pay_subscription_fee),
    )
}

/// Moderation, categories and user bans
fn admin_routes() -> Router<AppState> {
    use handlers::admin::{advertisements, categories, users};

    Router::new()
        .route("/admin/advertisements", get(advertisements::list))
        .route(
            "/admin/advertisements/{id}",
            get(advertisements::detail).delete(advertisements::remove),
        )
        .route(
            "/admin/advertisements/{id}/publish",
            post(advertisements::publish),
        )
        .route(
            "/admin/advertisements/{id}/unpublish",
            post(advertisements::unpublish),
        )
        .route(
            "/admin/advertisements/{id}/comment",
            post(advertisements::comment),
        )
        .route("/admin/users/{id}/ban", post(users::ban))
        .route("/admin/users/{id}/unban", post(users::unban))
        .route(
            "/admin/categories",
            get(categories::list).post(categories::create),
        )
        .route("/admin/categories/search", get(categories::search))
        .route(
            "/admin/categories/{slug}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
