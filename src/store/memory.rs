//! In-process store. Records keep insertion order; uniqueness is checked under
//! the same write lock as the insert.

use super::{AccountStore, CustomerStore, StoreError, StoreHealth};
use crate::model::{Account, AccountChanges, Customer};
use crate::query::{filter, Criteria};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<Vec<Customer>>,
    accounts: RwLock<Vec<Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `accounts`, in order.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        MemoryStore {
            customers: RwLock::default(),
            accounts: RwLock::new(accounts),
        }
    }
}

fn duplicate(field: &str) -> StoreError {
    StoreError::UniqueViolation {
        field: field.to_string(),
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.reference == customer.reference) {
            return Err(duplicate("reference"));
        }
        if customer.username.is_some() && customers.iter().any(|c| c.username == customer.username) {
            return Err(duplicate("username"));
        }
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .find(|c| c.username.as_deref() == Some(username))
            .cloned())
    }

    async fn find_customers(&self, criteria: &Criteria) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().await.clone();
        Ok(filter(customers, criteria))
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.number == account.number) {
            return Err(duplicate("number"));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_account(&self, number: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.number == number).cloned())
    }

    async fn find_accounts(&self, criteria: &Criteria) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().await.clone();
        Ok(filter(accounts, criteria))
    }

    async fn update_account(&self, number: &str, changes: &AccountChanges) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| a.number == number)
            .ok_or(StoreError::NotFound)?;
        changes.apply_to(account);
        Ok(account.clone())
    }

    async fn delete_account(&self, number: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let idx = accounts
            .iter()
            .position(|a| a.number == number)
            .ok_or(StoreError::NotFound)?;
        accounts.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;

    fn account(number: &str) -> Account {
        Account {
            number: number.into(),
            reference: "JD_1".into(),
            kind: "Livret A".into(),
            amount: 1.0,
        }
    }

    fn customer(reference: &str, username: Option<&str>) -> Customer {
        Customer {
            username: username.map(String::from),
            firstname: "John".into(),
            lastname: "Doe".into(),
            city: "Paris".into(),
            reference: reference.into(),
        }
    }

    #[tokio::test]
    async fn duplicate_account_number_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.create_account(account("ACC_1")).await.unwrap();
        let err = store.create_account(account("ACC_1")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "number"));
        assert_eq!(store.find_accounts(&Criteria::new()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_customer_reference_or_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_customer(customer("JD_1", Some("jdoe"))).await.unwrap();
        let err = store.create_customer(customer("JD_1", None)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "reference"));
        let err = store.create_customer(customer("JD_2", Some("jdoe"))).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "username"));
    }

    #[tokio::test]
    async fn customers_without_username_do_not_collide() {
        let store = MemoryStore::new();
        store.create_customer(customer("A_1", None)).await.unwrap();
        store.create_customer(customer("A_2", None)).await.unwrap();
        assert!(store.find_customer("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_numbers() {
        let store = MemoryStore::with_accounts(vec![account("ACC_1")]);
        let changes = AccountChanges { kind: None, amount: Some(9.0) };
        assert!(matches!(store.update_account("nope", &changes).await, Err(StoreError::NotFound)));
        assert_eq!(store.update_account("ACC_1", &changes).await.unwrap().amount, 9.0);
        store.delete_account("ACC_1").await.unwrap();
        assert!(matches!(store.delete_account("ACC_1").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn find_accounts_applies_criteria() {
        let store = MemoryStore::with_accounts(vec![account("ACC_1"), account("ACC_2")]);
        let criteria = Criteria::new().and("number", FieldValue::Text("ACC_2".into()));
        let out = store.find_accounts(&criteria).await.unwrap();
        assert_eq!(out, vec![account("ACC_2")]);
    }
}
