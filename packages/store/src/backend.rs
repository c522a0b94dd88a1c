//! # Backend capability traits
//!
//! The application never talks to the managed backend directly; every data and
//! identity operation goes through the two traits defined here. Implementations
//! live in sibling modules: [`crate::MemoryBackend`] for tests and local
//! fallback, and the `rest`-gated [`crate::RestBackend`] for the hosted
//! service. Swapping one for the other changes nothing above this layer.

use futures::channel::mpsc::UnboundedReceiver;
use thiserror::Error;

use crate::models::{NewNote, Note, NotePatch, UserInfo};

/// Opaque backend-reported failure. Carries the backend's own message
/// verbatim; callers display it, they do not interpret or retry it.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A change to the backend's notion of the current session, delivered on the
/// subscription channel. Covers sign-in/out triggered anywhere, including the
/// external-redirect flow.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthEvent {
    SignedIn(UserInfo),
    SignedOut,
}

/// Row operations on the notes table. All reads and writes are scoped to the
/// backend's current session by its authorization layer: rows owned by other
/// users behave exactly like rows that do not exist.
pub trait NoteTable {
    /// All non-archived notes visible to the caller, ordered pinned-first and
    /// most-recently-updated within each pin group.
    fn list_active(&self) -> impl std::future::Future<Output = Result<Vec<Note>, BackendError>>;

    /// Single row by id, or `None` when zero rows match.
    fn find(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Note>, BackendError>>;

    /// Insert a row and return it as persisted. The backend assigns `id`,
    /// `user_id` (from its session) and `updated_at`.
    fn insert(
        &self,
        new: NewNote,
    ) -> impl std::future::Future<Output = Result<Note, BackendError>>;

    /// Apply a patch to a row and return the updated row, or `None` when zero
    /// rows match. Refreshes `updated_at` on success.
    fn update(
        &self,
        id: &str,
        patch: NotePatch,
    ) -> impl std::future::Future<Output = Result<Option<Note>, BackendError>>;

    /// Hard-remove a row. Matching zero rows is not an error.
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<(), BackendError>>;
}

/// Identity operations and the session-change notification channel.
pub trait Identity {
    /// The identity attached to any persisted session, or `None`.
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<UserInfo>, BackendError>>;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<UserInfo, BackendError>>;

    /// Create an account. The returned identity may be unconfirmed, in which
    /// case no session is established until confirmation completes.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<UserInfo, BackendError>>;

    /// Clear the session. Idempotent.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), BackendError>>;

    /// URL of the external provider's redirect-based sign-in flow. The
    /// eventual session result arrives on the subscription channel, not here.
    fn provider_sign_in_url(
        &self,
        provider: &str,
    ) -> impl std::future::Future<Output = Result<String, BackendError>>;

    /// Subscribe to session changes for the life of the receiver.
    fn subscribe(&self) -> UnboundedReceiver<AuthEvent>;
}
