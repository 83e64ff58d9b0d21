//! HTTP handlers for customers and accounts.

pub mod accounts;
pub mod customers;
