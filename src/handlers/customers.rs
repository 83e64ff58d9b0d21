//! Customer handlers: list, create, read by username.

use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::model::{Customer, CustomerDraft};
use crate::query::Criteria;
use crate::response::{created, ok};
use crate::service::CustomerService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

/// GET /customers?firstname=&lastname=&city=&username=&reference=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = Criteria::from_query::<Customer>(&params)?;
    let rows = CustomerService::list(state.customers.as_ref(), &criteria).await?;
    Ok(ok(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonPayload(draft): JsonPayload<CustomerDraft>,
) -> Result<impl IntoResponse, AppError> {
    let customer = CustomerService::create(state.customers.as_ref(), draft).await?;
    Ok(created(customer))
}

pub async fn read(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = CustomerService::read(state.customers.as_ref(), &username).await?;
    Ok(ok(customer))
}
