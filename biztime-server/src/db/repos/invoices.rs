//! Invoice repository
//!
//! `paid_date` follows `paid` inside the UPDATE statement itself:
//! - `paid = true` keeps an existing `paid_date` or stamps `CURRENT_DATE`
//! - `paid = false` clears it
//! - omitting `paid` leaves both untouched

use sqlx::PgPool;

use crate::db::error::ForeignKey;
use crate::db::DbError;
use crate::models::{Amount, Invoice};

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

/// Validated input for a new invoice
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: Amount,
    pub paid: bool,
}

/// Partial invoice update; `None` fields are left unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceUpdate {
    pub amt: Option<Amount>,
    pub paid: Option<bool>,
}

/// Invoice repository
pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all invoices ordered by id.
    pub async fn list(&self) -> Result<Vec<Invoice>, DbError> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(invoices)
    }

    /// Get a single invoice by id.
    pub async fn get(&self, id: i32) -> Result<Invoice, DbError> {
        sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("invoice", id))
    }

    /// Insert an invoice. A missing company surfaces as `NotFound` on the
    /// company, via the foreign key.
    pub async fn create(&self, invoice: &NewInvoice) -> Result<Invoice, DbError> {
        tracing::debug!(comp_code = %invoice.comp_code, "Creating invoice");

        sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (comp_code, amt, paid, paid_date)
            VALUES ($1, $2, $3, CASE WHEN $3 THEN CURRENT_DATE END)
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(&invoice.comp_code)
        .bind(invoice.amt.value())
        .bind(invoice.paid)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            DbError::from_write(
                e,
                "invoice",
                &invoice.comp_code,
                &[ForeignKey {
                    constraint: "invoices_comp_code_fkey",
                    resource: "company",
                    id: &invoice.comp_code,
                }],
            )
        })
    }

    /// Apply a partial update.
    pub async fn update(&self, id: i32, update: InvoiceUpdate) -> Result<Invoice, DbError> {
        tracing::debug!(id, ?update, "Updating invoice");

        sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices
            SET amt = COALESCE($2, amt),
                paid = COALESCE($3, paid),
                paid_date = CASE
                    WHEN $3::BOOLEAN IS NULL THEN paid_date
                    WHEN $3::BOOLEAN THEN COALESCE(paid_date, CURRENT_DATE)
                    ELSE NULL
                END
            WHERE id = $1
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.amt.map(Amount::value))
        .bind(update.paid)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "invoice", &id.to_string(), &[]))?
        .ok_or_else(|| DbError::not_found("invoice", id))
    }

    /// Delete an invoice by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        tracing::debug!(id, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("invoice", id));
        }
        Ok(())
    }
}
