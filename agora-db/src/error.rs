use agora_common::model::{ModelValidationError, thread::ThreadId, user::UserId};
use sqlx::error::{DatabaseError as _, ErrorKind};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ModelValidationError),
    #[error("User with id {0} was not found.")]
    UserNotFound(UserId),
    #[error("Thread with id {0} was not found.")]
    ThreadNotFound(ThreadId),
    #[error("A referenced row does not exist: {0}")]
    Dependency(sqlx::Error),
    #[error("A constraint was violated: {0}")]
    Conflict(sqlx::Error),
    #[error("An object in the database was invalid: {0}")]
    Data(ModelValidationError),
    #[error("Running migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Store(sqlx::Error),
}

impl DbError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::UserNotFound(_) | DbError::ThreadNotFound(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error().map(|db_err| db_err.kind()) {
            Some(ErrorKind::ForeignKeyViolation) => DbError::Dependency(err),
            Some(
                ErrorKind::UniqueViolation | ErrorKind::CheckViolation | ErrorKind::NotNullViolation,
            ) => DbError::Conflict(err),
            _ => DbError::Store(err),
        }
    }
}
