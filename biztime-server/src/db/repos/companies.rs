//! Company repository
//!
//! Deleting a company cascades to its invoices and industry associations
//! (enforced by the schema).

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Company, CompanyCode, CompanyName};

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all companies ordered by code.
    pub async fn list(&self) -> Result<Vec<Company>, DbError> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies ORDER BY code",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(companies)
    }

    /// Get a single company by exact code.
    pub async fn get(&self, code: &str) -> Result<Company, DbError> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("company", code))
    }

    /// Insert a company; an existing code is a conflict, never overwritten.
    pub async fn create(
        &self,
        code: &CompanyCode,
        name: &CompanyName,
        description: Option<&str>,
    ) -> Result<Company, DbError> {
        tracing::debug!(code = code.as_str(), "Creating company");

        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(code.as_str())
        .bind(name.as_str())
        .bind(description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "company", code.as_str(), &[]))
    }

    /// Replace the supplied fields of a company. The code never changes.
    pub async fn update(
        &self,
        code: &str,
        name: Option<&CompanyName>,
        description: Option<&str>,
    ) -> Result<Company, DbError> {
        tracing::debug!(code, "Updating company");

        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE code = $1
            RETURNING code, name, description
            "#,
        )
        .bind(code)
        .bind(name.map(CompanyName::as_str))
        .bind(description)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "company", code, &[]))?
        .ok_or_else(|| DbError::not_found("company", code))
    }

    /// Delete a company by code.
    pub async fn delete(&self, code: &str) -> Result<(), DbError> {
        tracing::debug!(code, "Deleting company");

        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("company", code));
        }
        Ok(())
    }
}
