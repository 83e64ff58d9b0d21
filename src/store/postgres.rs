//! PostgreSQL store on a shared `PgPool`.

use super::{AccountStore, CustomerStore, StoreError, StoreHealth};
use crate::model::{Account, AccountChanges, Customer};
use crate::query::Criteria;
use crate::sql::{self, PgBindValue, QueryBuf, TableDef, ACCOUNTS, CUSTOMERS};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_all<R>(&self, table: &TableDef, q: QueryBuf) -> Result<Vec<R>, StoreError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, R>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        query.fetch_all(&self.pool).await.map_err(|e| classify(table, e))
    }

    async fn fetch_optional<R>(&self, table: &TableDef, q: QueryBuf) -> Result<Option<R>, StoreError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, R>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        query.fetch_optional(&self.pool).await.map_err(|e| classify(table, e))
    }

    async fn execute(&self, table: &TableDef, q: QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        let done = query.execute(&self.pool).await.map_err(|e| classify(table, e))?;
        Ok(done.rows_affected())
    }
}

/// Turn a unique violation into [`StoreError::UniqueViolation`], naming the
/// column from the constraint when it is one of `table`'s.
fn classify(table: &TableDef, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = db
                .constraint()
                .and_then(|c| table.unique_field(c))
                .unwrap_or(table.key);
            return StoreError::UniqueViolation {
                field: field.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for PgStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        let q = sql::insert(
            &CUSTOMERS,
            vec![
                customer.username.into(),
                customer.firstname.into(),
                customer.lastname.into(),
                customer.city.into(),
                customer.reference.into(),
            ],
        );
        self.fetch_optional(&CUSTOMERS, q)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, StoreError> {
        self.fetch_optional(&CUSTOMERS, sql::select_by_key(&CUSTOMERS, username))
            .await
    }

    async fn find_customers(&self, criteria: &Criteria) -> Result<Vec<Customer>, StoreError> {
        self.fetch_all(&CUSTOMERS, sql::select_list(&CUSTOMERS, criteria))
            .await
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn create_account(&self, account: Account) -> Result<Account, StoreError> {
        let q = sql::insert(
            &ACCOUNTS,
            vec![
                account.number.into(),
                account.reference.into(),
                account.kind.into(),
                account.amount.into(),
            ],
        );
        self.fetch_optional(&ACCOUNTS, q)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_account(&self, number: &str) -> Result<Option<Account>, StoreError> {
        self.fetch_optional(&ACCOUNTS, sql::select_by_key(&ACCOUNTS, number))
            .await
    }

    async fn find_accounts(&self, criteria: &Criteria) -> Result<Vec<Account>, StoreError> {
        self.fetch_all(&ACCOUNTS, sql::select_list(&ACCOUNTS, criteria))
            .await
    }

    async fn update_account(&self, number: &str, changes: &AccountChanges) -> Result<Account, StoreError> {
        let mut sets: Vec<(&'static str, PgBindValue)> = Vec::new();
        if let Some(kind) = &changes.kind {
            sets.push(("type", kind.clone().into()));
        }
        if let Some(amount) = changes.amount {
            sets.push(("amount", amount.into()));
        }
        let q = if sets.is_empty() {
            sql::select_by_key(&ACCOUNTS, number)
        } else {
            sql::update(&ACCOUNTS, number, sets)
        };
        self.fetch_optional(&ACCOUNTS, q)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_account(&self, number: &str) -> Result<(), StoreError> {
        match self.execute(&ACCOUNTS, sql::delete(&ACCOUNTS, number)).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin_url, db_name)) = parse_db_name_from_url(database_url) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres`, `db`).
fn parse_db_name_from_url(url: &str) -> Option<(String, String)> {
    let scheme_end = url.find("://")? + 3;
    let path_start = scheme_end + url.get(scheme_end..)?.find('/')? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Some((format!("{}postgres", base), db_name.to_string()))
}
