//! Route table and shared HTTP layers.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use carelink_core::config::CorsConfig;

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Builds the application router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(caregiver_routes())
        .merge(family_routes())
        .merge(match_routes())
        .merge(conversation_routes())
        .merge(review_routes())
        .merge(payment_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            put(handlers::profile::update_me).delete(handlers::auth::deactivate),
        )
        .route(
            "/users/me/caregiver-profile",
            put(handlers::profile::update_caregiver_profile),
        )
        .route(
            "/users/me/family-profile",
            put(handlers::profile::update_family_profile),
        )
}

fn caregiver_routes() -> Router<AppState> {
    Router::new()
        .route("/caregivers", get(handlers::search::search_caregivers))
        .route("/caregivers/{id}", get(handlers::search::caregiver_detail))
        .route(
            "/caregivers/{id}/reviews",
            get(handlers::review::list_for_caregiver),
        )
        .route("/caregivers/me/photos", post(handlers::profile::add_photo))
        .route(
            "/caregivers/me/photos/{id}",
            delete(handlers::profile::delete_photo),
        )
        .route(
            "/caregivers/me/availability",
            post(handlers::profile::add_availability).get(handlers::profile::list_availability),
        )
        .route(
            "/caregivers/me/availability/{id}",
            put(handlers::profile::update_availability)
                .delete(handlers::profile::delete_availability),
        )
}

fn family_routes() -> Router<AppState> {
    Router::new().route("/families", get(handlers::search::search_families))
}

fn match_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/matches",
            post(handlers::matching::initiate).get(handlers::matching::list),
        )
        .route("/matches/mutual", get(handlers::matching::list_mutual))
        .route("/matches/{id}", get(handlers::matching::get))
        .route("/matches/{id}/respond", post(handlers::matching::respond))
        .route("/matches/{id}/withdraw", post(handlers::matching::withdraw))
}

fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/conversations",
            post(handlers::messaging::start_conversation).get(handlers::messaging::list_conversations),
        )
        .route(
            "/conversations/{id}/messages",
            get(handlers::messaging::list_messages).post(handlers::messaging::post_message),
        )
        .route(
            "/conversations/{id}/read",
            put(handlers::messaging::mark_read),
        )
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(handlers::review::submit))
        .route(
            "/reviews/{id}",
            put(handlers::review::update).delete(handlers::review::delete),
        )
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/payments",
            post(handlers::payment::initiate).get(handlers::payment::list),
        )
        .route(
            "/payments/by-provider/{payment_id}",
            get(handlers::payment::get_by_payment_id),
        )
        .route("/payments/{id}", get(handlers::payment::get))
        .route("/payments/{id}/execute", post(handlers::payment::execute))
        .route("/payments/{id}/cancel", post(handlers::payment::cancel))
}

/// Builds the CORS layer from configuration. `"*"` selects a permissive
/// wildcard; anything else is parsed as an explicit list.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().max_age(Duration::from_secs(config.max_age_seconds));

    layer = if config.allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    };

    layer = if config.allowed_methods.iter().any(|m| m == "*") {
        layer.allow_methods(Any)
    } else {
        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        layer.allow_methods(methods)
    };

    if config.allowed_headers.iter().any(|h| h == "*") {
        layer.allow_headers(Any)
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer.allow_headers(headers)
    }
}
