//! Error taxonomy shared by every library repository.


use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Classified failure of a repository call.
    ///
    /// Ownership failures surface as `NotFound`, exactly like missing rows,
    /// so callers cannot probe for other users' data.
    pub enum RepositoryError {
        /// No row matched, or the matching row belongs to someone else.
        NotFound { entity: &'static str } => "{entity} not found",
        /// A uniqueness rule was violated or the row is still referenced.
        Conflict { message: String } => "conflict: {message}",
        /// A single-row statement touched several rows.
        TooManyRowsAffected { affected: usize } =>
            "expected to affect one row but affected {affected}",
        /// Any other database or connection failure.
        Unexpected { message: String } => "unexpected repository failure: {message}",
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::not_found(err.to_string()),
            RepositoryError::Conflict { message } => Self::conflict(message),
            RepositoryError::TooManyRowsAffected { .. } | RepositoryError::Unexpected { .. } => {
                Self::internal(err.to_string())
            }
        }
    }
}
