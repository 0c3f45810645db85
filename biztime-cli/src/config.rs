//! Database connection settings
//!
//! `DATABASE_URL` wins when set. Otherwise the URL is assembled from the
//! discrete variables `DATABASE_USER`, `DATABASE_PASSWORD`, `DATABASE_HOST`,
//! `DATABASE_PORT`, and `DATABASE_NAME`.

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_NAME: &str = "biztime";

/// Discrete connection parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseParts {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
}

impl DatabaseParts {
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            user: var("DATABASE_USER"),
            password: var("DATABASE_PASSWORD"),
            host: var("DATABASE_HOST"),
            port: var("DATABASE_PORT"),
            name: var("DATABASE_NAME"),
        }
    }

    /// Build a `postgres://` URL, percent-encoding credentials.
    pub fn to_url(&self) -> Result<String> {
        let port = match &self.port {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("DATABASE_PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let credentials = match (&self.user, &self.password) {
            (Some(user), Some(password)) => format!(
                "{}:{}@",
                urlencoding::encode(user),
                urlencoding::encode(password)
            ),
            (Some(user), None) => format!("{}@", urlencoding::encode(user)),
            (None, _) => String::new(),
        };

        Ok(format!(
            "postgres://{}{}:{}/{}",
            credentials,
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            port,
            self.name.as_deref().unwrap_or(DEFAULT_NAME),
        ))
    }
}

/// Resolve the database URL from an explicit value or the environment.
pub fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    match explicit.filter(|url| !url.is_empty()) {
        Some(url) => Ok(url),
        None => DatabaseParts::from_env().to_url(),
    }
}
