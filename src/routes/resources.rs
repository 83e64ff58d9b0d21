//! Customer and account routes.

use crate::handlers::{accounts, customers};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route("/customers/:username", get(customers::read))
        .with_state(state)
}

pub fn account_routes(state: AppState) -> Router {
    Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/:number",
            get(accounts::read).put(accounts::update).delete(accounts::delete),
        )
        .with_state(state)
}
