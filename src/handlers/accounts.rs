//! Account handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::model::{Account, AccountDraft, AccountPatch};
use crate::query::Criteria;
use crate::response::{created, no_content, ok};
use crate::service::AccountService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;

/// GET /accounts?number=&reference=&type=&amount=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = Criteria::from_query::<Account>(&params)?;
    let rows = AccountService::list(state.accounts.as_ref(), &criteria).await?;
    Ok(ok(rows))
}

/// POST /accounts
pub async fn create(
    State(state): State<AppState>,
    JsonPayload(draft): JsonPayload<AccountDraft>,
) -> Result<impl IntoResponse, AppError> {
    let account = AccountService::create(state.accounts.as_ref(), draft).await?;
    Ok(created(account))
}

/// GET /accounts/:number
pub async fn read(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = AccountService::read(state.accounts.as_ref(), &number).await?;
    Ok(ok(account))
}

/// PUT /accounts/:number
pub async fn update(
    State(state): State<AppState>,
    Path(number): Path<String>,
    JsonPayload(patch): JsonPayload<AccountPatch>,
) -> Result<impl IntoResponse, AppError> {
    let account = AccountService::update(state.accounts.as_ref(), &number, patch).await?;
    Ok(ok(account))
}

/// DELETE /accounts/:number
pub async fn delete(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AccountService::delete(state.accounts.as_ref(), &number).await?;
    Ok(no_content())
}
