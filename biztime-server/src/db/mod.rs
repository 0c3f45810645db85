//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool owned by the caller and passed in explicitly
//! - One parameterized statement per repository method
//! - Rely on DB constraints, translate violations - no check-then-insert

pub mod error;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, PoolSettings};
pub use repos::*;
