//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod company;
pub mod invoice;
pub mod industry;

pub use validation::ValidationError;
pub use company::{slugify, Company, CompanyCode, CompanyName};
pub use invoice::{Amount, Invoice};
pub use industry::{Association, Industry, IndustryCode, IndustryLabel, IndustryWithCompanies};
