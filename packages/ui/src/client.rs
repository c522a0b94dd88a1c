//! Shared backend constructor and hooks.
//!
//! The concrete backend is picked at compile time: the REST client against the
//! hosted service when the `rest` feature is on, otherwise the in-memory
//! fallback. [`AuthProvider`](crate::AuthProvider) constructs it exactly once
//! and provides it through context, so every view observes the same session.

use dioxus::prelude::*;
use store::{NoteRepository, Session};

#[cfg(feature = "rest")]
pub type AppBackend = store::RestBackend;
#[cfg(not(feature = "rest"))]
pub type AppBackend = store::MemoryBackend;

/// Build the process-wide backend.
#[cfg(feature = "rest")]
pub fn make_backend() -> AppBackend {
    let base_url = option_env!("NOTED_BACKEND_URL").unwrap_or("http://127.0.0.1:54321");
    let anon_key = option_env!("NOTED_ANON_KEY").unwrap_or("local-anon-key");
    store::RestBackend::new(base_url, anon_key)
}

/// Build the process-wide backend.
///
/// The in-memory fallback has no confirmation mail, so it ships with a ready
/// demo account; notes live only as long as the page.
#[cfg(not(feature = "rest"))]
pub fn make_backend() -> AppBackend {
    let backend = store::MemoryBackend::new();
    backend.register_user("demo@noted.app", "notednoted");
    backend
}

/// The backend provided by [`AuthProvider`](crate::AuthProvider).
pub fn use_backend() -> AppBackend {
    use_context::<AppBackend>()
}

/// A note repository over the shared backend.
pub fn use_notes() -> NoteRepository<AppBackend> {
    NoteRepository::new(use_backend())
}

/// A session handle over the shared backend.
pub fn use_session() -> Session<AppBackend> {
    Session::new(use_backend())
}
