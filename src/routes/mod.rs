//! Routers and the assembled application.

mod common;
mod resources;

pub use common::common_routes;
pub use resources::{account_routes, customer_routes};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Prefix for the resource routes.
pub const API_PREFIX: &str = "/api/v1";

/// Full application: common routes at the root, resources under [`API_PREFIX`].
/// Request bodies are capped at `body_limit` bytes.
pub fn app(state: AppState, body_limit: usize) -> Router {
    let api = Router::new()
        .merge(customer_routes(state.clone()))
        .merge(account_routes(state.clone()));
    Router::new()
        .merge(common_routes(state))
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
