//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool, never owns a connection
//! - Issues a single parameterized statement per call
//! - Maps "no row" to `DbError::NotFound` and constraint violations
//!   through `DbError::from_write`

pub mod companies;
pub mod invoices;
pub mod industries;

pub use companies::CompanyRepo;
pub use invoices::{InvoiceRepo, InvoiceUpdate, NewInvoice};
pub use industries::IndustryRepo;
