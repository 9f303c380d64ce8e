//! Infrastructure Layer
//!
//! Database implementations.

pub mod executor;
pub mod postgres;

pub use executor::{check_single_row, execute_one};
pub use postgres::PgEntityStore;
