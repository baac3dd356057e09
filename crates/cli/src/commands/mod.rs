//! CLI subcommand implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;

/// Primary database URL variable, shared with the API server.
pub const DATABASE_URL_VAR: &str = "FAVORITES_DATABASE_URL";

/// Read the database URL, falling back to the generic `DATABASE_URL`.
///
/// Returns `None` if neither variable is set.
pub fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();

    std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
