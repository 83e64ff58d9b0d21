//! Field-equality filtering over records.

mod criteria;
mod filter;
pub use criteria::*;
pub use filter::filter;
