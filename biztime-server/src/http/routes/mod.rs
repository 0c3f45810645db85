//! Route handlers organized by resource

use serde::Serialize;

pub mod health;
pub mod companies;
pub mod invoices;
pub mod industries;

/// Deletion acknowledgement: `{"status": "deleted"}`
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub status: &'static str,
}

impl Default for Deleted {
    fn default() -> Self {
        Self { status: "deleted" }
    }
}
