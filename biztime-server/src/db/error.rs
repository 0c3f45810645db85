//! Database error type and constraint-violation translation

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },

    #[error("constraint violated: {constraint}")]
    Constraint { constraint: String },
}

/// A foreign key a write may violate, and the row it was meant to reference.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForeignKey<'a> {
    pub constraint: &'static str,
    pub resource: &'static str,
    pub id: &'a str,
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Translate a failed INSERT/UPDATE into a typed error.
    ///
    /// Unique violations become `Conflict` on the written resource, known
    /// foreign-key violations become `NotFound` on the referenced resource,
    /// check violations become `Constraint`. Anything else stays `Sqlx`.
    pub(crate) fn from_write(
        err: sqlx::Error,
        resource: &'static str,
        id: &str,
        foreign_keys: &[ForeignKey<'_>],
    ) -> Self {
        let Some(db_err) = err.as_database_error() else {
            return Self::Sqlx(err);
        };

        if db_err.is_unique_violation() {
            return Self::Conflict {
                resource,
                id: id.to_owned(),
            };
        }

        if db_err.is_foreign_key_violation() {
            let violated = db_err.constraint();
            if let Some(fk) = foreign_keys
                .iter()
                .find(|fk| violated == Some(fk.constraint))
            {
                return Self::not_found(fk.resource, fk.id);
            }
        }

        if db_err.is_check_violation() {
            return Self::Constraint {
                constraint: db_err.constraint().unwrap_or("check").to_owned(),
            };
        }

        Self::Sqlx(err)
    }
}
