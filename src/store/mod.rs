//! Record stores for customers and accounts.
//!
//! The store is the authority on uniqueness: `create` reports a duplicate key as
//! [`StoreError::UniqueViolation`] instead of the caller checking first.

mod memory;
mod postgres;

pub use crate::error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::model::{Account, AccountChanges, Customer};
use crate::query::Criteria;
use async_trait::async_trait;

/// Liveness of the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CustomerStore: StoreHealth {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Customer whose username is `username`.
    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, StoreError>;

    async fn find_customers(&self, criteria: &Criteria) -> Result<Vec<Customer>, StoreError>;
}

#[async_trait]
pub trait AccountStore: StoreHealth {
    async fn create_account(&self, account: Account) -> Result<Account, StoreError>;

    async fn find_account(&self, number: &str) -> Result<Option<Account>, StoreError>;

    async fn find_accounts(&self, criteria: &Criteria) -> Result<Vec<Account>, StoreError>;

    /// Apply `changes` and return the updated account. `NotFound` if no such number.
    async fn update_account(&self, number: &str, changes: &AccountChanges) -> Result<Account, StoreError>;

    /// `NotFound` if no such number.
    async fn delete_account(&self, number: &str) -> Result<(), StoreError>;
}
