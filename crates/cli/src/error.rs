//! CLI error type.

use thiserror::Error;
use vitrine_storefront::db::RepositoryError;
use vitrine_storefront::error::AppError;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        Self::App(err.into())
    }
}

impl CliError {
    /// Capture to Sentry where appropriate and return a printable message.
    pub fn report(&self) -> String {
        match self {
            Self::App(err) => err.report(),
            Self::Migration(err) => {
                let event_id = sentry::capture_error(err);
                tracing::error!(error = %err, sentry_event_id = %event_id, "Migration failed");
                self.to_string()
            }
        }
    }
}

/// Shopper-facing "not found" error.
pub fn not_found(what: impl Into<String>) -> CliError {
    CliError::App(AppError::NotFound(what.into()))
}

/// Shopper-facing "bad request" error.
pub fn bad_request(what: impl Into<String>) -> CliError {
    CliError::App(AppError::BadRequest(what.into()))
}
