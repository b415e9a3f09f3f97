//! Shared Diesel error classification for the repository adapters.
//!
//! Uniqueness and foreign-key violations are meaningful to the domain
//! (conflict and not-found respectively), so they are pulled out of the raw
//! Diesel error before each repository maps the remainder to its own
//! connection/query variants.

use tracing::debug;

use super::pool::PoolError;

/// Database failure classified into the categories repositories care about.
#[derive(Debug)]
pub(crate) enum DieselFailure {
    /// A unique constraint was violated.
    UniqueViolation {
        /// Constraint name reported by PostgreSQL, when available.
        constraint: Option<String>,
    },
    /// A foreign-key constraint was violated.
    ForeignKeyViolation,
    /// The connection dropped mid-operation.
    Connection {
        /// Failure rendered as text.
        message: String,
    },
    /// Any other query failure.
    Query {
        /// Failure rendered as text.
        message: String,
    },
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Classify a Diesel error into a [`DieselFailure`].
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    } else {
        debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        );
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(ToOwned::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DieselFailure::Connection {
                message: info.message().to_owned(),
            }
        }
        DieselError::DatabaseError(_, info) => DieselFailure::Query {
            message: info.message().to_owned(),
        },
        other => DieselFailure::Query {
            message: other.to_string(),
        },
    }
}
