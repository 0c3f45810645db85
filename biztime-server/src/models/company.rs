//! Company models and code derivation
//!
//! A company's code is never supplied by the client: it is the slug of the
//! company name, computed by [`slugify`].

use serde::Serialize;
use sqlx::FromRow;

use super::validation::{max_len, required};
use super::ValidationError;

/// Maximum length for derived company codes
const MAX_CODE_LEN: usize = 64;

/// Maximum length for company names
const MAX_NAME_LEN: usize = 255;

/// Derive a URL-safe slug from free text.
///
/// ASCII letters and digits are lower-cased and kept, every run of other
/// ASCII characters becomes a single `-`, and non-ASCII characters are
/// dropped. The result never starts or ends with a dash.
///
/// # Example
/// ```
/// use biztime_server::models::slugify;
///
/// assert_eq!(slugify("Google"), "google");
/// assert_eq!(slugify("Apple Inc."), "apple-inc");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if ch.is_ascii() && !slug.is_empty() && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    if slug.len() > MAX_CODE_LEN {
        slug.truncate(MAX_CODE_LEN);
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Validated company name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn new(s: Option<&str>) -> Result<Self, ValidationError> {
        let name = required(s, "name")?;
        max_len(name, "name", MAX_NAME_LEN)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Company primary key, derived from the name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Derive the code for a company name.
    ///
    /// Fails when the name has no ASCII letters or digits to build a slug from.
    pub fn from_name(name: &CompanyName) -> Result<Self, ValidationError> {
        let slug = slugify(name.as_str());
        if slug.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "name",
                reason: "must contain at least one ASCII letter or digit",
            });
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Company record from database
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}
