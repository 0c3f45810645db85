//! biztime-server: REST API for companies, invoices, and industries
//!
//! Handlers validate input, run one parameterized statement against
//! PostgreSQL, and shape the rows into JSON. Referential integrity lives in
//! the schema; constraint violations are translated into 404/409/400
//! responses.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError, PoolSettings};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};

/// Embedded schema migrations (`migrations/` at the workspace root)
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");
