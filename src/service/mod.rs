//! Request-level rules: required fields, immutable fields, filter outcomes.

mod crud;
mod validation;
pub use crud::{AccountService, CustomerService};
pub use validation::{classify_store_error, not_found, require_matches};
