use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::backend::{AuthEvent, BackendError, Identity, NoteTable};
use crate::models::{NewNote, Note, NotePatch, UserInfo};

/// In-memory backend for testing and local fallback.
///
/// Implements both capability traits with the hosted service's observable
/// behavior. Rows are scoped to the session user, so missing and forbidden
/// both read as zero rows. Sign-up creates an unconfirmed account with no
/// session, and every mutation refreshes `updated_at` strictly monotonically.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    notes: HashMap<String, Note>,
    accounts: HashMap<String, Account>,
    session: Option<UserInfo>,
    listeners: Vec<UnboundedSender<AuthEvent>>,
    next_note: u64,
    next_user: u64,
    insert_calls: u64,
    last_touch: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Account {
    password: String,
    user: UserInfo,
}

impl Inner {
    /// Next mutation timestamp: wall clock, bumped by 1ms whenever the clock
    /// has not advanced, so successive mutations always compare strictly.
    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_touch {
            Some(prev) if now <= prev => prev + Duration::milliseconds(1),
            _ => now,
        };
        self.last_touch = Some(stamp);
        stamp
    }

    fn emit(&mut self, event: AuthEvent) {
        self.listeners
            .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account, as if email confirmation had already
    /// completed out of band. Does not sign the user in.
    pub fn register_user(&self, email: &str, password: &str) -> UserInfo {
        let mut inner = self.inner.lock().unwrap();
        inner.next_user += 1;
        let user = UserInfo {
            id: format!("user-{}", inner.next_user),
            email: email.to_string(),
            confirmed: true,
        };
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// Flip a note to archived, as an external actor would. No client
    /// operation sets this flag.
    pub fn archive(&self, id: &str) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.notes.contains_key(id) {
            return;
        }
        let stamp = inner.touch();
        if let Some(note) = inner.notes.get_mut(id) {
            note.is_archived = true;
            note.updated_at = stamp;
        }
    }

    /// Stand-in for the external provider's redirect round-trip: establishes
    /// the session and notifies subscribers, exactly as the real flow would.
    pub fn complete_provider_sign_in(&self, user: UserInfo) {
        let mut inner = self.inner.lock().unwrap();
        inner.session = Some(user.clone());
        inner.emit(AuthEvent::SignedIn(user));
    }

    /// How many insert calls reached this backend.
    pub fn insert_count(&self) -> u64 {
        self.inner.lock().unwrap().insert_calls
    }
}

impl NoteTable for MemoryBackend {
    async fn list_active(&self) -> Result<Vec<Note>, BackendError> {
        let inner = self.inner.lock().unwrap();
        let Some(ref user) = inner.session else {
            return Ok(Vec::new());
        };
        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|n| !n.is_archived && n.user_id == user.id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(b.updated_at.cmp(&a.updated_at))
        });
        Ok(notes)
    }

    async fn find(&self, id: &str) -> Result<Option<Note>, BackendError> {
        let inner = self.inner.lock().unwrap();
        let Some(ref user) = inner.session else {
            return Ok(None);
        };
        Ok(inner
            .notes
            .get(id)
            .filter(|n| n.user_id == user.id)
            .cloned())
    }

    async fn insert(&self, new: NewNote) -> Result<Note, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        inner.insert_calls += 1;
        let Some(user_id) = inner.session.as_ref().map(|u| u.id.clone()) else {
            return Err(BackendError::new(
                "new row violates row-level security policy for table \"notes\"",
            ));
        };
        inner.next_note += 1;
        let stamp = inner.touch();
        let note = Note {
            id: format!("note-{}", inner.next_note),
            user_id,
            title: new.title,
            content: new.content,
            is_pinned: false,
            is_archived: false,
            updated_at: stamp,
        };
        inner.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user_id) = inner.session.as_ref().map(|u| u.id.clone()) else {
            return Ok(None);
        };
        if !inner.notes.get(id).is_some_and(|n| n.user_id == user_id) {
            return Ok(None);
        }
        // Matching zero rows must not consume a mutation timestamp.
        let stamp = inner.touch();
        let Some(note) = inner.notes.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(is_pinned) = patch.is_pinned {
            note.is_pinned = is_pinned;
        }
        note.updated_at = stamp;
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(user_id) = inner.session.as_ref().map(|u| u.id.clone()) else {
            return Ok(());
        };
        if inner
            .notes
            .get(id)
            .is_some_and(|n| n.user_id == user_id)
        {
            inner.notes.remove(id);
        }
        Ok(())
    }
}

impl Identity for MemoryBackend {
    async fn current_user(&self) -> Result<Option<UserInfo>, BackendError> {
        Ok(self.inner.lock().unwrap().session.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        let user = match inner.accounts.get(email) {
            Some(account) if account.password == password => account.user.clone(),
            _ => return Err(BackendError::new("Invalid login credentials")),
        };
        if !user.confirmed {
            return Err(BackendError::new("Email not confirmed"));
        }
        inner.session = Some(user.clone());
        inner.emit(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.accounts.contains_key(email) {
            return Err(BackendError::new("User already registered"));
        }
        inner.next_user += 1;
        let user = UserInfo {
            id: format!("user-{}", inner.next_user),
            email: email.to_string(),
            confirmed: false,
        };
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        // Confirmation is pending, so no session is established yet.
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.session.take().is_some() {
            inner.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    async fn provider_sign_in_url(&self, provider: &str) -> Result<String, BackendError> {
        Ok(format!(
            "https://auth.example/authorize?provider={provider}"
        ))
    }

    fn subscribe(&self) -> UnboundedReceiver<AuthEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::notes::NoteRepository;

    async fn signed_in_repo() -> (MemoryBackend, NoteRepository<MemoryBackend>) {
        let backend = MemoryBackend::new();
        backend.register_user("ada@example.com", "hunter22");
        Identity::sign_in(&backend, "ada@example.com", "hunter22")
            .await
            .unwrap();
        (backend.clone(), NoteRepository::new(backend))
    }

    #[tokio::test]
    async fn list_excludes_archived_notes() {
        let (backend, repo) = signed_in_repo().await;

        let keep = repo.create("Keep", "visible").await.unwrap();
        let gone = repo.create("Gone", "archived away").await.unwrap();
        backend.archive(&gone.id);

        let notes = repo.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, keep.id);
    }

    #[tokio::test]
    async fn list_orders_pinned_first_then_most_recent() {
        let (_backend, repo) = signed_in_repo().await;

        let a = repo.create("a", "").await.unwrap();
        let b = repo.create("b", "").await.unwrap();
        let c = repo.create("c", "").await.unwrap();
        // Pin the oldest note; it must still lead the list.
        repo.toggle_pin(&a.id, false).await.unwrap();
        // Touch b so it outranks c within the unpinned group.
        repo.update(&b.id, "b", "edited").await.unwrap();

        let notes = repo.list().await.unwrap();
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);

        for pair in notes.windows(2) {
            assert!(pair[0].is_pinned >= pair[1].is_pinned);
            if pair[0].is_pinned == pair[1].is_pinned {
                assert!(pair[0].updated_at >= pair[1].updated_at);
            }
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let (_backend, repo) = signed_in_repo().await;

        let note = repo.create("", "").await.unwrap();
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.content, "");
        assert!(!note.is_pinned);
        assert!(!note.is_archived);

        // Round-trips through the backend as persisted.
        assert_eq!(repo.fetch(&note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn create_without_session_fails_before_any_backend_call() {
        let backend = MemoryBackend::new();
        let repo = NoteRepository::new(backend.clone());

        let err = repo.create("Draft", "body").await.unwrap_err();
        assert_eq!(err, RepoError::Unauthenticated);
        assert_eq!(backend.insert_count(), 0);
    }

    #[tokio::test]
    async fn toggle_pin_flips_flag_and_advances_updated_at() {
        let (_backend, repo) = signed_in_repo().await;

        let note = repo.create("Pin me", "").await.unwrap();
        assert!(!note.is_pinned);

        let pinned = repo.toggle_pin(&note.id, note.is_pinned).await.unwrap();
        assert_eq!(pinned.id, note.id);
        assert!(pinned.is_pinned);
        assert!(pinned.updated_at > note.updated_at);

        let unpinned = repo.toggle_pin(&note.id, pinned.is_pinned).await.unwrap();
        assert!(!unpinned.is_pinned);
        assert!(unpinned.updated_at > pinned.updated_at);
    }

    #[tokio::test]
    async fn update_overwrites_both_fields() {
        let (_backend, repo) = signed_in_repo().await;

        let note = repo.create("Old title", "old content").await.unwrap();
        let updated = repo.update(&note.id, "New title", "").await.unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "");
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn delete_then_fetch_returns_not_found() {
        let (_backend, repo) = signed_in_repo().await;

        let note = repo.create("Doomed", "").await.unwrap();
        repo.delete(&note.id).await.unwrap();

        assert_eq!(repo.fetch(&note.id).await.unwrap_err(), RepoError::NotFound);
        // A second delete of the same id still succeeds.
        repo.delete(&note.id).await.unwrap();
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let (_backend, repo) = signed_in_repo().await;
        let err = repo.update("note-999", "t", "c").await.unwrap_err();
        assert_eq!(err, RepoError::NotFound);
    }

    #[tokio::test]
    async fn zero_row_update_does_not_advance_the_mutation_clock() {
        let (_backend, repo) = signed_in_repo().await;

        // Each rejected update used to bump the clock 1ms past the wall
        // clock; enough of them would push later stamps visibly into the
        // future.
        for _ in 0..250 {
            let err = repo.update("note-999", "t", "c").await.unwrap_err();
            assert_eq!(err, RepoError::NotFound);
        }

        let note = repo.create("After", "").await.unwrap();
        assert!(note.updated_at <= Utc::now() + Duration::milliseconds(50));
    }

    #[tokio::test]
    async fn other_users_notes_are_indistinguishable_from_missing() {
        let (backend, repo) = signed_in_repo().await;
        let secret = repo.create("Ada's note", "private").await.unwrap();

        backend.register_user("brian@example.com", "pw");
        Identity::sign_out(&backend).await.unwrap();
        Identity::sign_in(&backend, "brian@example.com", "pw")
            .await
            .unwrap();

        assert_eq!(repo.fetch(&secret.id).await.unwrap_err(), RepoError::NotFound);
        assert!(repo.list().await.unwrap().is_empty());
        // Brian's delete of Ada's note matches zero rows and succeeds quietly,
        // leaving the note in place.
        repo.delete(&secret.id).await.unwrap();

        Identity::sign_out(&backend).await.unwrap();
        Identity::sign_in(&backend, "ada@example.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(repo.fetch(&secret.id).await.unwrap(), secret);
    }

    #[tokio::test]
    async fn sign_out_then_create_fails_unauthenticated() {
        let (backend, repo) = signed_in_repo().await;
        Identity::sign_out(&backend).await.unwrap();

        let err = repo.create("Late", "").await.unwrap_err();
        assert_eq!(err, RepoError::Unauthenticated);
    }

    #[tokio::test]
    async fn create_pin_list_scenario() {
        let (_backend, repo) = signed_in_repo().await;

        let groceries = repo.create("Groceries", "Milk, eggs").await.unwrap();
        assert!(!groceries.id.is_empty());
        assert_eq!(groceries.title, "Groceries");
        assert!(!groceries.is_pinned);

        // A later note would normally outrank it by recency.
        repo.create("Scratch", "newer").await.unwrap();

        let pinned = repo.toggle_pin(&groceries.id, false).await.unwrap();
        assert_eq!(pinned.id, groceries.id);
        assert!(pinned.is_pinned);

        let notes = repo.list().await.unwrap();
        assert_eq!(notes[0].id, groceries.id);
    }
}
