//! Industry repository
//!
//! - list: LEFT JOIN + array_agg so every industry carries its company codes
//! - associate: foreign keys decide which side is missing, primary key
//!   rejects duplicates

use sqlx::PgPool;

use crate::db::error::ForeignKey;
use crate::db::DbError;
use crate::models::{Association, Industry, IndustryCode, IndustryLabel, IndustryWithCompanies};

/// Industry repository
pub struct IndustryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> IndustryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List industries with associated company codes.
    ///
    /// Industries without associations get an empty array, never NULL.
    pub async fn list(&self) -> Result<Vec<IndustryWithCompanies>, DbError> {
        let industries = sqlx::query_as::<_, IndustryWithCompanies>(
            r#"
            SELECT
                i.code,
                i.industry,
                COALESCE(
                    array_agg(ic.comp_code ORDER BY ic.comp_code)
                        FILTER (WHERE ic.comp_code IS NOT NULL),
                    ARRAY[]::TEXT[]
                ) AS companies
            FROM industries i
            LEFT JOIN industry_companies ic ON ic.industry_code = i.code
            GROUP BY i.code, i.industry
            ORDER BY i.code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(industries)
    }

    /// Insert an industry; an existing code is a conflict.
    pub async fn create(
        &self,
        code: &IndustryCode,
        label: &IndustryLabel,
    ) -> Result<Industry, DbError> {
        tracing::debug!(code = code.as_str(), "Creating industry");

        sqlx::query_as::<_, Industry>(
            r#"
            INSERT INTO industries (code, industry)
            VALUES ($1, $2)
            RETURNING code, industry
            "#,
        )
        .bind(code.as_str())
        .bind(label.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, "industry", code.as_str(), &[]))
    }

    /// Replace the label of an industry. The code never changes.
    pub async fn update(&self, code: &str, label: &IndustryLabel) -> Result<Industry, DbError> {
        tracing::debug!(code, "Updating industry");

        sqlx::query_as::<_, Industry>(
            r#"
            UPDATE industries
            SET industry = $2
            WHERE code = $1
            RETURNING code, industry
            "#,
        )
        .bind(code)
        .bind(label.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("industry", code))
    }

    /// Delete an industry by code. Its associations go with it.
    pub async fn delete(&self, code: &str) -> Result<(), DbError> {
        tracing::debug!(code, "Deleting industry");

        let result = sqlx::query("DELETE FROM industries WHERE code = $1")
            .bind(code)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("industry", code));
        }
        Ok(())
    }

    /// Associate a company with an industry.
    ///
    /// A missing industry or company is `NotFound`; an existing pair is
    /// `Conflict`. Nothing is written in either case.
    pub async fn associate(
        &self,
        industry_code: &str,
        comp_code: &str,
    ) -> Result<Association, DbError> {
        tracing::debug!(industry_code, comp_code, "Associating company with industry");

        sqlx::query_as::<_, Association>(
            r#"
            INSERT INTO industry_companies (industry_code, comp_code)
            VALUES ($1, $2)
            RETURNING industry_code, comp_code
            "#,
        )
        .bind(industry_code)
        .bind(comp_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            DbError::from_write(
                e,
                "association",
                &format!("{industry_code}/{comp_code}"),
                &[
                    ForeignKey {
                        constraint: "industry_companies_industry_code_fkey",
                        resource: "industry",
                        id: industry_code,
                    },
                    ForeignKey {
                        constraint: "industry_companies_comp_code_fkey",
                        resource: "company",
                        id: comp_code,
                    },
                ],
            )
        })
    }
}
