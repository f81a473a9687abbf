use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod auth;
pub mod catalog;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth + storefront routes, and
/// the protected account/catalog surface. Role checks live in the handlers,
/// composed from the auth service's resolve/require_roles.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let auth_routes = Router::new()
        .route("/signup", axum::routing::post(auth::signup))
        .route("/login", axum::routing::post(auth::login))
        .route("/logout", axum::routing::post(auth::logout))
        .route("/refresh", axum::routing::post(auth::refresh))
        .route("/me", get(auth::me));

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route(
            "/:id",
            get(users::get_user).patch(users::patch_user).delete(users::delete_user),
        )
        .route("/:id/roles", axum::routing::post(users::add_role))
        .route("/:id/roles/:role", axum::routing::delete(users::remove_role))
        .route(
            "/:id/client",
            get(users::get_client_profile).patch(users::patch_client_profile),
        )
        .route("/:id/pro", get(users::get_pro_profile).patch(users::patch_pro_profile));

    let catalog_routes = Router::new()
        .route(
            "/",
            axum::routing::post(catalog::create_offering).get(catalog::list_my_offerings),
        )
        .route("/public", get(catalog::list_public))
        .route(
            "/groups",
            axum::routing::post(catalog::create_group).get(catalog::list_my_groups),
        )
        .route(
            "/categories",
            axum::routing::post(catalog::create_category).get(catalog::list_categories),
        )
        .route(
            "/:id",
            axum::routing::patch(catalog::update_offering).delete(catalog::delete_offering),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/services", catalog_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
