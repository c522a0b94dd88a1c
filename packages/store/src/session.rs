//! # Auth session state and operations
//!
//! [`AuthState`] is the process-wide source of truth for "who is logged in".
//! It is constructed once at startup (in the UI's provider), written only by
//! [`Session`] operations and the backend's change notifications, and read by
//! everything else. [`Session`] wraps the injected [`Identity`] capability
//! with local validation and error normalization.

use futures::channel::mpsc::UnboundedReceiver;

use crate::backend::{AuthEvent, Identity};
use crate::error::RepoError;
use crate::models::UserInfo;

/// Current authentication state.
///
/// Three shapes: initializing (`loading=true`), authenticated
/// (`loading=false`, `user` present), anonymous (`loading=false`, `user`
/// absent). Only the initial session resolution sets `loading`; later
/// sign-in/out transitions never re-enter it.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn authenticated(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Whether a user is attached, regardless of `loading`.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Fold a backend session-change notification into the state.
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(user) => *self = Self::authenticated(user),
            AuthEvent::SignedOut => *self = Self::anonymous(),
        }
    }

    /// Route-guard decision for a protected region.
    pub fn gate(&self) -> Gate {
        if self.loading {
            Gate::Wait
        } else if self.user.is_none() {
            Gate::Redirect
        } else {
            Gate::Allow
        }
    }
}

/// What a protected region should do for the current [`AuthState`]: show a
/// placeholder, redirect to the auth entry point (replacing history), or
/// render its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Wait,
    Redirect,
    Allow,
}

/// Session operations over an injected identity capability.
#[derive(Clone)]
pub struct Session<I> {
    backend: I,
}

impl<I: Identity> Session<I> {
    pub fn new(backend: I) -> Self {
        Self { backend }
    }

    /// Resolve any persisted session at startup. A backend failure here
    /// resolves to anonymous rather than blocking the app.
    pub async fn resolve(&self) -> AuthState {
        match self.backend.current_user().await {
            Ok(user) => AuthState {
                user,
                loading: false,
            },
            Err(err) => {
                tracing::warn!("session resolution failed: {err}");
                AuthState::anonymous()
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, RepoError> {
        let email = email.trim().to_lowercase();
        Ok(self.backend.sign_in(&email, password).await?)
    }

    /// Create an account. The confirmation mismatch is caught locally, before
    /// any backend call. A success may return an unconfirmed identity; the
    /// caller must check [`UserInfo::confirmed`] before treating the user as
    /// signed in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserInfo, RepoError> {
        if password != confirm_password {
            return Err(RepoError::Validation("Passwords do not match".to_string()));
        }
        let email = email.trim().to_lowercase();
        Ok(self.backend.sign_up(&email, password).await?)
    }

    /// Clear the session. Idempotent; signing out while anonymous succeeds.
    pub async fn sign_out(&self) -> Result<(), RepoError> {
        Ok(self.backend.sign_out().await?)
    }

    /// Start the external-provider flow: returns the redirect URL. The
    /// session itself arrives later on [`Session::changes`].
    pub async fn provider_sign_in(&self, provider: &str) -> Result<String, RepoError> {
        Ok(self.backend.provider_sign_in_url(provider).await?)
    }

    /// Session-change notifications for the process lifetime.
    pub fn changes(&self) -> UnboundedReceiver<AuthEvent> {
        self.backend.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::memory::MemoryBackend;

    fn session_with_account() -> (MemoryBackend, Session<MemoryBackend>, UserInfo) {
        let backend = MemoryBackend::new();
        let user = backend.register_user("ada@example.com", "hunter22");
        (backend.clone(), Session::new(backend), user)
    }

    #[test]
    fn gate_follows_the_state_machine() {
        assert_eq!(AuthState::default().gate(), Gate::Wait);
        assert_eq!(AuthState::anonymous().gate(), Gate::Redirect);
        let user = UserInfo {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            confirmed: true,
        };
        assert_eq!(AuthState::authenticated(user).gate(), Gate::Allow);
    }

    #[test]
    fn is_authenticated_tracks_the_attached_user() {
        assert!(!AuthState::default().is_authenticated());
        assert!(!AuthState::anonymous().is_authenticated());
        let user = UserInfo {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            confirmed: true,
        };
        assert!(AuthState::authenticated(user).is_authenticated());
    }

    #[tokio::test]
    async fn resolve_without_persisted_session_is_anonymous() {
        let (_backend, session, _user) = session_with_account();
        let state = session.resolve().await;
        assert_eq!(state, AuthState::anonymous());
    }

    #[tokio::test]
    async fn sign_in_establishes_the_session_and_notifies() {
        let (_backend, session, user) = session_with_account();
        let mut changes = session.changes();

        let signed_in = session.sign_in("  Ada@Example.com ", "hunter22").await.unwrap();
        assert_eq!(signed_in, user);
        assert_eq!(session.resolve().await, AuthState::authenticated(user.clone()));

        let mut state = AuthState::default();
        state.apply(changes.next().await.unwrap());
        assert_eq!(state, AuthState::authenticated(user));
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_state_unchanged() {
        let (_backend, session, _user) = session_with_account();

        let err = session.sign_in("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(
            err,
            RepoError::Backend(crate::BackendError::new("Invalid login credentials"))
        );
        assert_eq!(session.resolve().await, AuthState::anonymous());
    }

    #[tokio::test]
    async fn sign_up_mismatch_is_caught_before_the_backend() {
        let (backend, session, _user) = session_with_account();

        let err = session
            .sign_up("new@example.com", "secret12", "secret21")
            .await
            .unwrap_err();
        assert_eq!(err, RepoError::Validation("Passwords do not match".to_string()));

        // No account was created.
        let err = Identity::sign_in(&backend, "new@example.com", "secret12")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid login credentials");
    }

    #[tokio::test]
    async fn sign_up_returns_a_pending_identity() {
        let (_backend, session, _user) = session_with_account();

        let pending = session
            .sign_up("new@example.com", "secret12", "secret12")
            .await
            .unwrap();
        assert!(!pending.confirmed);

        // Until confirmation completes, there is no session and no sign-in.
        assert_eq!(session.resolve().await, AuthState::anonymous());
        let err = session.sign_in("new@example.com", "secret12").await.unwrap_err();
        assert_eq!(
            err,
            RepoError::Backend(crate::BackendError::new("Email not confirmed"))
        );
    }

    #[tokio::test]
    async fn sign_out_is_idempotent_and_notifies_once() {
        let (_backend, session, _user) = session_with_account();
        session.sign_in("ada@example.com", "hunter22").await.unwrap();

        let mut changes = session.changes();
        session.sign_out().await.unwrap();
        session.sign_out().await.unwrap();
        assert_eq!(session.resolve().await, AuthState::anonymous());

        assert_eq!(changes.next().await.unwrap(), AuthEvent::SignedOut);
    }

    #[tokio::test]
    async fn provider_sign_in_arrives_on_the_change_stream() {
        let (backend, session, user) = session_with_account();
        let mut changes = session.changes();

        let url = session.provider_sign_in("github").await.unwrap();
        assert!(url.contains("provider=github"));

        // The redirect flow completes out of band; only the subscription
        // observes the resulting session.
        backend.complete_provider_sign_in(user.clone());
        let mut state = AuthState::anonymous();
        state.apply(changes.next().await.unwrap());
        assert_eq!(state, AuthState::authenticated(user));
    }
}
