#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the offers-axum crate.
//! [offers_core]: https://docs.rs/offers_core/latest/offers_core/index.html
//! [offers_axum]: https://docs.rs/offers_axum/latest/offers_axum/index.html
//! [offers_sqlite]: https://docs.rs/offers_sqlite/latest/offers_sqlite/index.html
#![doc = include_str!("../README.md")]

mod offer_routes;

use aide::{
    axum::{ApiRouter, routing::get_with},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use offers_core::ports::Application;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn api_router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route("/health", get_with(health_check, |op| op.tag("health")))
        .nest("/offers", offer_routes::router())
        .nest_api_service("/docs", docs_routes())
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    api_router::<T>()
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api))) // an Arc, so each request only clones a pointer
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Generate the OpenAPI document describing the API, without serving it.
pub fn openapi<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    let _ = api_router::<T>().finish_api_with(&mut api, api_docs);
    api
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone + Send + Sync + 'static + Application<Repository: Clone + Send + Sync + 'static>
{
}

// this is the blanket implementation
impl<T> ApiApplication for T where
    T: Clone + Send + Sync + 'static + Application<Repository: Clone + Send + Sync + 'static>
{
}
