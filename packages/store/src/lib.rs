//! # Core data-access and session layer for NOTED
//!
//! Everything the views need and nothing they render: the note data model,
//! the backend capability traits, the note repository, and the auth session
//! state machine. The backend is injected, so the whole crate is testable
//! against [`MemoryBackend`] with no network in sight.

pub mod backend;
pub mod error;
pub mod models;
pub mod notes;
pub mod session;

mod memory;
pub use memory::MemoryBackend;

#[cfg(feature = "rest")]
mod rest;
#[cfg(feature = "rest")]
pub use rest::RestBackend;

pub use backend::{AuthEvent, BackendError, Identity, NoteTable};
pub use error::RepoError;
pub use models::{NewNote, Note, NotePatch, UserInfo};
pub use notes::NoteRepository;
pub use session::{AuthState, Gate, Session};
