use sea_orm::{DbErr, RuntimeErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // entity errors
    #[error("invalid {kind}, {message}")]
    ValidationError { kind: String, message: String },

    #[error("{kind} with the same '{field}' already exists")]
    DuplicateKey { kind: String, field: String },

    #[error("{kind} '{name}' was not found")]
    NotFound { kind: String, name: String },

    // storage errors
    #[error("storage is unavailable, {message}")]
    StorageUnavailable {
        message: String,

        #[source]
        source: anyhow::Error,
    },

    #[error("failed to perform storage operation, {message}")]
    StorageOperationFailed {
        message: String,

        #[source]
        source: anyhow::Error,
    },

    // job errors
    #[error("roster strategy '{strategy}' failed, {message}")]
    StrategyFailure { strategy: String, message: String },

    #[error("job '{handle}' cannot move from '{from}' to '{to}'")]
    InvalidStateTransition {
        handle: String,
        from: String,
        to: String,
    },

    // access errors
    #[error("actor '{subject}' is not allowed to {action}")]
    Unauthorized { subject: String, action: String },
}

impl Error {
    /// Whether the caller may retry the same operation later with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }

    /// Maps a uniqueness or foreign key violation raised by the database onto the
    /// entity that caused it. Everything else is classified by `From<DbErr>`.
    pub fn from_constraint(
        err: DbErr,
        kind: &str,
        unique_field: &str,
        foreign_name: impl FnOnce() -> String,
    ) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                crate::metric::constraint_violation_count_metric()
                    .with_label_values(&[kind])
                    .inc();

                Self::DuplicateKey {
                    kind: kind.to_string(),
                    field: unique_field.to_string(),
                }
            }
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                tracing::debug!("foreign key violation on {}: {}", kind, message);

                Self::NotFound {
                    kind: "Reference".to_string(),
                    name: foreign_name(),
                }
            }
            _ => err.into(),
        }
    }
}

/// Whether the database could not be reached, as opposed to rejecting the statement.
fn is_connectivity_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => {
            matches!(
                e,
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            )
        }
        _ => false,
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        if is_connectivity_error(&value) {
            return Self::StorageUnavailable {
                message: "could not reach the database".to_string(),
                source: anyhow::anyhow!(value),
            };
        }

        Self::StorageOperationFailed {
            message: value.to_string(),
            source: anyhow::anyhow!(value),
        }
    }
}

#[macro_export]
macro_rules! err_validation {
    ($kind:expr, $($arg:tt)*) => {
        $crate::errors::Error::ValidationError {
            kind: $kind.to_string(),
            message: format!($($arg)*),
        }
    };
}

#[macro_export]
macro_rules! err_not_found {
    ($kind:expr, $name:expr) => {
        $crate::errors::Error::NotFound {
            kind: $kind.to_string(),
            name: $name.to_string(),
        }
    };
}
