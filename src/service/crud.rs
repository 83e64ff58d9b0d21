//! Customer and account operations over an injected store.

use super::validation::{classify_store_error, not_found, require_matches};
use crate::error::AppError;
use crate::model::{Account, AccountDraft, AccountPatch, Customer, CustomerDraft};
use crate::query::Criteria;
use crate::store::{AccountStore, CustomerStore};

pub struct CustomerService;

impl CustomerService {
    /// Customers matching every criterion. `NotFound` when filters match nothing.
    pub async fn list(store: &dyn CustomerStore, criteria: &Criteria) -> Result<Vec<Customer>, AppError> {
        let rows = store.find_customers(criteria).await?;
        require_matches(rows, criteria)
    }

    /// Validate required fields, then insert. Duplicates surface as `Conflict`.
    pub async fn create(store: &dyn CustomerStore, draft: CustomerDraft) -> Result<Customer, AppError> {
        let customer = draft.validate().ok_or(AppError::MissingData)?;
        let reference = customer.reference.clone();
        let created = store
            .create_customer(customer)
            .await
            .map_err(|e| classify_store_error::<Customer>(&reference, e))?;
        tracing::info!(reference = %created.reference, "customer created");
        Ok(created)
    }

    pub async fn read(store: &dyn CustomerStore, username: &str) -> Result<Customer, AppError> {
        store
            .find_customer(username)
            .await?
            .ok_or_else(|| not_found(username))
    }
}

pub struct AccountService;

impl AccountService {
    /// Accounts matching every criterion. `NotFound` when filters match nothing.
    pub async fn list(store: &dyn AccountStore, criteria: &Criteria) -> Result<Vec<Account>, AppError> {
        let rows = store.find_accounts(criteria).await?;
        require_matches(rows, criteria)
    }

    /// Validate required fields, then insert. Duplicates surface as `Conflict`.
    pub async fn create(store: &dyn AccountStore, draft: AccountDraft) -> Result<Account, AppError> {
        let account = draft.validate().ok_or(AppError::MissingData)?;
        let number = account.number.clone();
        let created = store
            .create_account(account)
            .await
            .map_err(|e| classify_store_error::<Account>(&number, e))?;
        tracing::info!(number = %created.number, "account created");
        Ok(created)
    }

    pub async fn read(store: &dyn AccountStore, number: &str) -> Result<Account, AppError> {
        store
            .find_account(number)
            .await?
            .ok_or_else(|| not_found(number))
    }

    /// Partial update. Checks, in order: the account exists, no immutable field
    /// is touched, a present `type` is non-empty.
    pub async fn update(store: &dyn AccountStore, number: &str, patch: AccountPatch) -> Result<Account, AppError> {
        let existing = Self::read(store, number).await?;
        if let Some(field) = patch.immutable_field() {
            tracing::warn!(number = %number, field, "rejected update of immutable field");
            return Err(AppError::ImmutableField(field));
        }
        let changes = patch.into_changes();
        if changes.kind.as_deref() == Some("") {
            return Err(AppError::MissingData);
        }
        if changes.is_empty() {
            return Ok(existing);
        }
        let updated = store
            .update_account(number, &changes)
            .await
            .map_err(|e| classify_store_error::<Account>(number, e))?;
        tracing::info!(number = %number, "account updated");
        Ok(updated)
    }

    pub async fn delete(store: &dyn AccountStore, number: &str) -> Result<(), AppError> {
        store
            .delete_account(number)
            .await
            .map_err(|e| classify_store_error::<Account>(number, e))?;
        tracing::info!(number = %number, "account deleted");
        Ok(())
    }
}
