use std::sync::Arc;

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod api_models;
pub mod follow_handlers;
pub mod health_handlers;
pub mod middlewares;
pub mod sleep_record_handlers;
pub mod user_handlers;

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "User registration"),
        (name = "sleep_records", description = "Sleep session clock in/out"),
        (name = "follows", description = "Follow graph and followed users' sleep history"),
        (name = "health", description = "Liveness and auth probes")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}

pub fn setup_routes() -> Router<Arc<AppState>> {
    let user_router = OpenApiRouter::new().routes(routes!(user_handlers::register_user));

    let sleep_record_router =
        OpenApiRouter::new().routes(routes!(sleep_record_handlers::toggle_sleep));

    let follow_router = OpenApiRouter::new()
        .routes(routes!(follow_handlers::follow_user))
        .routes(routes!(follow_handlers::unfollow_user))
        .routes(routes!(follow_handlers::followed_sleep_records));

    let api_router = OpenApiRouter::new()
        .nest("/users", user_router)
        .nest("/sleep_records", sleep_record_router)
        .nest("/follows", follow_router);

    let (router, api_openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", api_router)
        .routes(routes!(health_handlers::show))
        .routes(routes!(health_handlers::test_auth))
        .split_for_parts();

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(router)
}
