use thiserror::Error;

use crate::backend::BackendError;

/// Failure modes surfaced by the repository and session layers. Expected
/// failures are always returned as values; nothing here is thrown past the
/// crate boundary.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RepoError {
    /// An operation requiring a session was attempted with none present.
    /// Detected locally, never sent to the backend.
    #[error("not signed in")]
    Unauthenticated,

    /// Zero rows matched a by-id operation. Deliberately indistinguishable
    /// from "forbidden": the backend's authorization layer answers both the
    /// same way.
    #[error("note not found")]
    NotFound,

    /// Local input validation failed before any backend call was made.
    #[error("{0}")]
    Validation(String),

    /// Backend-reported failure, passed through verbatim.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
