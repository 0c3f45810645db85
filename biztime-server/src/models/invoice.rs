//! Invoice models

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Invoice amount, always finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount(f64);

impl Amount {
    /// Validate an amount before it is sent to the database.
    ///
    /// # Example
    /// ```
    /// use biztime_server::models::Amount;
    ///
    /// assert!(Amount::new(Some(400.0)).is_ok());
    /// assert!(Amount::new(Some(0.0)).is_err());
    /// assert!(Amount::new(None).is_err());
    /// ```
    pub fn new(value: Option<f64>) -> Result<Self, ValidationError> {
        let value = value.ok_or(ValidationError::Missing { field: "amt" })?;
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "amt",
                reason: "must be a finite number",
            });
        }
        if value <= 0.0 {
            return Err(ValidationError::NotPositive { field: "amt" });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Invoice record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}
