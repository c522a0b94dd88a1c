//! # Domain models for notes and users
//!
//! Defines the data structures exchanged with the backend service. These types
//! are `Serialize + Deserialize` so they map directly onto the backend's row
//! representation and can cross the HTTP boundary unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-owned note row as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique identifier, assigned by the backend at creation.
    pub id: String,
    /// Owner identifier. Set by the backend from the authenticated caller;
    /// immutable after creation.
    pub user_id: String,
    /// Note title. "Untitled" when created with an empty title.
    pub title: String,
    /// Note body, possibly empty.
    pub content: String,
    /// Pinned notes sort ahead of unpinned ones in listings.
    pub is_pinned: bool,
    /// Archived notes are excluded from listings.
    pub is_archived: bool,
    /// Refreshed by the backend on every successful mutation.
    pub updated_at: DateTime<Utc>,
}

/// Fields the client supplies when inserting a note. Everything else
/// (`id`, `user_id`, flags, `updated_at`) is assigned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Partial update payload for a note row. Absent fields are left untouched;
/// the backend refreshes `updated_at` whenever at least one row matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NotePatch {
    /// Full overwrite of both text fields, as the editor's save does.
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            is_pinned: None,
        }
    }

    /// Set only the pinned flag.
    pub fn pinned(value: bool) -> Self {
        Self {
            is_pinned: Some(value),
            ..Self::default()
        }
    }
}

/// The authenticated identity as reported by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    /// Whether the account has completed confirmation. A successful sign-up
    /// may return an unconfirmed identity that cannot sign in yet.
    pub confirmed: bool,
}
