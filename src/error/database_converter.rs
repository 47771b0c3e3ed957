use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts diesel errors into `AppError` values.
///
/// Constraint violations map to `AppError::Database`. The constraint details
/// stay in the error source and are only logged.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let label = match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::SerializationFailure => "Serialization failure",
            DatabaseErrorKind::ReadOnlyTransaction => "Write attempted in read-only transaction",
            _ => "Database error",
        };

        let mut message = format!("{}: {}", label, info.message());
        if let Some(constraint) = info.constraint_name() {
            message.push_str(&format!(" (constraint: {})", constraint));
        }
        if let Some(details) = info.details() {
            message.push_str(&format!(" [{}]", details));
        }

        tracing::warn!(operation = %operation, error = %message, "Database operation rejected");

        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(message),
        }
    }
}
