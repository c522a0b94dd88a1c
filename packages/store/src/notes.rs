//! # Note repository
//!
//! [`NoteRepository`] translates note operations into backend queries and
//! normalizes the results into `Result<_, RepoError>`. It holds no cache and
//! no locks; each call is independently consistent only with the backend's own
//! single-row guarantee. Creation defaults, the local unauthenticated check,
//! and the mapping of zero-row results to [`RepoError::NotFound`] live here
//! rather than in the backend.

use crate::backend::{Identity, NoteTable};
use crate::error::RepoError;
use crate::models::{NewNote, Note, NotePatch};

/// Title applied when a note is created with an empty one.
pub const UNTITLED: &str = "Untitled";

/// Note operations over an injected backend capability.
#[derive(Clone)]
pub struct NoteRepository<B> {
    backend: B,
}

impl<B: NoteTable + Identity> NoteRepository<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// All active (non-archived) notes, pinned first, most recently updated
    /// first within each pin group. On failure the caller gets the backend's
    /// error and no partial data.
    pub async fn list(&self) -> Result<Vec<Note>, RepoError> {
        Ok(self.backend.list_active().await?)
    }

    /// A single note by id. Zero rows is [`RepoError::NotFound`], whether the
    /// note is missing or owned by someone else.
    pub async fn fetch(&self, id: &str) -> Result<Note, RepoError> {
        self.backend
            .find(id)
            .await?
            .ok_or(RepoError::NotFound)
    }

    /// Create a note for the signed-in user. Fails with
    /// [`RepoError::Unauthenticated`] before issuing any backend call when no
    /// session is present. Empty title becomes [`UNTITLED`].
    pub async fn create(&self, title: &str, content: &str) -> Result<Note, RepoError> {
        if self.backend.current_user().await?.is_none() {
            return Err(RepoError::Unauthenticated);
        }

        let new = NewNote {
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            content: content.to_string(),
        };

        Ok(self.backend.insert(new).await?)
    }

    /// Overwrite both text fields unconditionally and refresh `updated_at`.
    pub async fn update(&self, id: &str, title: &str, content: &str) -> Result<Note, RepoError> {
        self.backend
            .update(id, NotePatch::text(title, content))
            .await?
            .ok_or(RepoError::NotFound)
    }

    /// Hard-delete a note. Irreversible; there is no trash state.
    pub async fn delete(&self, id: &str) -> Result<(), RepoError> {
        Ok(self.backend.delete(id).await?)
    }

    /// Set `is_pinned` to the negation of `currently_pinned`, which comes from
    /// the caller's view of the note rather than a transactional re-read: two
    /// concurrent toggles from stale views can converge on the same value.
    /// A server-side atomic negate would close that window; this layer cannot.
    pub async fn toggle_pin(&self, id: &str, currently_pinned: bool) -> Result<Note, RepoError> {
        self.backend
            .update(id, NotePatch::pinned(!currently_pinned))
            .await?
            .ok_or(RepoError::NotFound)
    }
}
