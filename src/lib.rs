//! Accounts API: REST backend for customers and bank accounts.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use model::{Account, AccountDraft, AccountPatch, Customer, CustomerDraft};
pub use query::{filter, Criteria, FieldValue};
pub use routes::{account_routes, app, common_routes, customer_routes, API_PREFIX};
pub use service::{AccountService, CustomerService};
pub use state::AppState;
pub use store::{ensure_database_exists, AccountStore, CustomerStore, MemoryStore, PgStore};
