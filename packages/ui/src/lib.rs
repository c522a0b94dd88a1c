//! This crate contains the shared UI plumbing for the workspace: backend
//! construction and injection, the authentication provider, and the note card.

mod client;
pub use client::{make_backend, use_backend, use_notes, use_session, AppBackend};

mod auth;
pub use auth::{use_auth, AuthProvider};

mod card;
pub use card::NoteCard;
