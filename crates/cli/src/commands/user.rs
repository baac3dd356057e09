//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Register a user and print its bearer token
//! fav-cli user create -n "Jane Doe" -e jane@example.com
//! ```

use secrecy::SecretString;
use thiserror::Error;

use favorites_api::db::{PgStore, RepositoryError, UserStore};
use favorites_api::models::NewUser;
use favorites_api::services::identity::{
    AuthError, REMEMBER_TOKEN_LENGTH, hash_password, random_alphanumeric,
};
use favorites_core::{BearerToken, Email, EmailError, UserId};

use super::{DATABASE_URL_VAR, database_url};

/// Length of the generated password for CLI-created users.
const GENERATED_PASSWORD_LENGTH: usize = 32;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Display name is blank.
    #[error("Name cannot be empty")]
    EmptyName,

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(RepositoryError),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Auth(#[from] AuthError),
}

/// Create a registered user.
///
/// The user gets a random password and a remember token, so it can use both
/// the bearer token and the identity cookie.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError` if the input is invalid, the email is taken, or the
/// database operation fails.
pub async fn create(name: &str, email: &str) -> Result<UserId, UserError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::EmptyName);
    }
    let email = Email::parse(email)?;

    let url = database_url().ok_or(UserError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to database...");
    let pool = favorites_api::db::create_pool(&url).await?;
    let store = PgStore::new(pool);

    tracing::info!("Creating user: {}", email);
    let user = store
        .create_user(NewUser {
            name: name.to_owned(),
            email: email.clone(),
            password_hash: hash_password(&random_alphanumeric(GENERATED_PASSWORD_LENGTH))?,
            remember_token: Some(SecretString::from(random_alphanumeric(
                REMEMBER_TOKEN_LENGTH,
            ))),
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UserExists(email.to_string()),
            other => UserError::Repository(other),
        })?;

    tracing::info!("Created user {} ({})", user.id, user.email);

    print_credentials(user.id);

    Ok(user.id)
}

#[allow(clippy::print_stdout)]
fn print_credentials(user_id: UserId) {
    println!("User ID:      {user_id}");
    println!("Bearer token: {}", BearerToken::for_user(user_id));
}
