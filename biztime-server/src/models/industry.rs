//! Industry models
//!
//! Industry codes appear in URL paths, so they share the slug alphabet of
//! derived company codes: lowercase alphanumeric with hyphens/underscores.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::validation::{max_len, required};
use super::ValidationError;

/// Maximum length for industry labels
const MAX_LABEL_LEN: usize = 255;

/// Code pattern: starts with alphanumeric, allows hyphens/underscores, max 64
static CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("invalid code regex")
});

/// Validated industry code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndustryCode(String);

impl IndustryCode {
    /// # Example
    /// ```
    /// use biztime_server::models::IndustryCode;
    ///
    /// assert!(IndustryCode::new(Some("tech")).is_ok());
    /// assert!(IndustryCode::new(Some("Tech")).is_err());
    /// assert!(IndustryCode::new(None).is_err());
    /// ```
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let code = required(s, "code")?;
        max_len(code, "code", 64)?;
        if !CODE_RE.is_match(code) {
            return Err(ValidationError::InvalidFormat {
                field: "code",
                reason: "must be lowercase alphanumeric with hyphens/underscores, starting with alphanumeric",
            });
        }
        Ok(Self(code.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated industry label (e.g. "Technology")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryLabel(String);

impl IndustryLabel {
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let label = required(s, "industry")?;
        max_len(label, "industry", MAX_LABEL_LEN)?;
        Ok(Self(label.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Industry record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// Industry with the codes of its associated companies
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IndustryWithCompanies {
    pub code: String,
    pub industry: String,
    pub companies: Vec<String>,
}

/// Industry <-> company association record
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Association {
    pub industry_code: String,
    pub comp_code: String,
}
