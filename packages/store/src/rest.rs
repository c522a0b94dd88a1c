//! HTTP backend speaking the hosted service's REST dialect: PostgREST for the
//! `notes` table, GoTrue for identity. One logical operation per request; no
//! retries, no timeouts beyond transport defaults, no client-side cache.
//!
//! Session-change notifications cover what this client can observe locally
//! (its own sign-in/out). Server-driven expiry would need the realtime
//! channel, which this layer does not open.

use std::sync::{Arc, Mutex};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use serde::Deserialize;

use crate::backend::{AuthEvent, BackendError, Identity, NoteTable};
use crate::models::{NewNote, Note, NotePatch, UserInfo};

/// REST client for the managed backend. Cloning shares the session.
#[derive(Clone, Debug)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    access_token: Option<String>,
    user: Option<UserInfo>,
    listeners: Vec<UnboundedSender<AuthEvent>>,
}

impl State {
    fn emit(&mut self, event: AuthEvent) {
        self.listeners
            .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }
}

/// Identity payload as GoTrue returns it.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    confirmed_at: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
}

impl WireUser {
    fn into_info(self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.unwrap_or_default(),
            confirmed: self.confirmed_at.is_some() || self.email_confirmed_at.is_some(),
        }
    }
}

/// Token-endpoint and signup responses share this loose shape: signup without
/// a session returns the bare user object, sign-in wraps it with a token.
#[derive(Debug, Deserialize)]
struct WireAuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<WireUser>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    confirmed_at: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
}

impl WireAuthResponse {
    fn into_parts(self) -> (Option<String>, Option<UserInfo>) {
        let user = match (self.user, self.id) {
            (Some(user), _) => Some(user.into_info()),
            (None, Some(id)) => Some(
                WireUser {
                    id,
                    email: self.email,
                    confirmed_at: self.confirmed_at,
                    email_confirmed_at: self.email_confirmed_at,
                }
                .into_info(),
            ),
            (None, None) => None,
        };
        (self.access_token, user)
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

fn transport_err(err: reqwest::Error) -> BackendError {
    BackendError::new(err.to_string())
}

fn decode_err(err: reqwest::Error) -> BackendError {
    tracing::error!("malformed backend response: {err}");
    BackendError::new("unexpected response from backend")
}

/// Non-2xx responses carry the backend's own message when one is present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<WireError>(&body)
        .ok()
        .and_then(|e| e.message.or(e.msg).or(e.error_description))
        .unwrap_or_else(|| format!("backend returned {status}"));
    Err(BackendError::new(message))
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/rest/v1/notes", self.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// The bearer for data requests: the session token when signed in,
    /// otherwise the anonymous key (the backend then sees zero rows).
    fn bearer(&self) -> String {
        self.state
            .lock()
            .unwrap()
            .access_token
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    fn session_user_id(&self) -> Option<String> {
        self.state.lock().unwrap().user.as_ref().map(|u| u.id.clone())
    }
}

impl NoteTable for RestBackend {
    async fn list_active(&self) -> Result<Vec<Note>, BackendError> {
        let resp = self
            .authed(self.http.get(self.notes_url()))
            .query(&[
                ("select", "*"),
                ("is_archived", "eq.false"),
                ("order", "is_pinned.desc,updated_at.desc"),
            ])
            .send()
            .await
            .map_err(transport_err)?;
        check(resp).await?.json().await.map_err(decode_err)
    }

    async fn find(&self, id: &str) -> Result<Option<Note>, BackendError> {
        let id_filter = format!("eq.{id}");
        let resp = self
            .authed(self.http.get(self.notes_url()))
            .query(&[
                ("select", "*"),
                ("id", id_filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(transport_err)?;
        let rows: Vec<Note> = check(resp).await?.json().await.map_err(decode_err)?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, new: NewNote) -> Result<Note, BackendError> {
        let Some(user_id) = self.session_user_id() else {
            return Err(BackendError::new("not authenticated"));
        };
        let resp = self
            .authed(self.http.post(self.notes_url()))
            .header("Prefer", "return=representation")
            .json(&serde_json::json!([{
                "user_id": user_id,
                "title": new.title,
                "content": new.content,
            }]))
            .send()
            .await
            .map_err(transport_err)?;
        let rows: Vec<Note> = check(resp).await?.json().await.map_err(decode_err)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::new("insert returned no row"))
    }

    async fn update(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, BackendError> {
        let resp = self
            .authed(self.http.patch(self.notes_url()))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(transport_err)?;
        let rows: Vec<Note> = check(resp).await?.json().await.map_err(decode_err)?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let resp = self
            .authed(self.http.delete(self.notes_url()))
            .query(&[("id", &format!("eq.{id}"))])
            .send()
            .await
            .map_err(transport_err)?;
        check(resp).await?;
        Ok(())
    }
}

impl Identity for RestBackend {
    async fn current_user(&self) -> Result<Option<UserInfo>, BackendError> {
        if self.state.lock().unwrap().access_token.is_none() {
            return Ok(None);
        }
        let resp = self
            .authed(self.http.get(self.auth_url("user")))
            .send()
            .await
            .map_err(transport_err)?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Stale token: the persisted session is gone.
            let mut state = self.state.lock().unwrap();
            state.access_token = None;
            state.user = None;
            return Ok(None);
        }
        let user: WireUser = check(resp).await?.json().await.map_err(decode_err)?;
        let info = user.into_info();
        self.state.lock().unwrap().user = Some(info.clone());
        Ok(Some(info))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, BackendError> {
        let resp = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_err)?;
        let auth: WireAuthResponse = check(resp).await?.json().await.map_err(decode_err)?;
        let (token, user) = auth.into_parts();
        let user = user.ok_or_else(|| BackendError::new("unexpected response from backend"))?;

        let mut state = self.state.lock().unwrap();
        state.access_token = token;
        state.user = Some(user.clone());
        state.emit(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, BackendError> {
        let resp = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_err)?;
        let auth: WireAuthResponse = check(resp).await?.json().await.map_err(decode_err)?;
        let (token, user) = auth.into_parts();
        let user = user.ok_or_else(|| BackendError::new("unexpected response from backend"))?;

        // Projects without required confirmation return a session right away.
        if token.is_some() && user.confirmed {
            let mut state = self.state.lock().unwrap();
            state.access_token = token;
            state.user = Some(user.clone());
            state.emit(AuthEvent::SignedIn(user.clone()));
        }
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let token = self.state.lock().unwrap().access_token.clone();
        if let Some(_token) = token {
            // Best effort: the local session clears regardless.
            if let Err(err) = self
                .authed(self.http.post(self.auth_url("logout")))
                .send()
                .await
            {
                tracing::warn!("logout request failed: {err}");
            }
            let mut state = self.state.lock().unwrap();
            state.access_token = None;
            state.user = None;
            state.emit(AuthEvent::SignedOut);
        }
        Ok(())
    }

    async fn provider_sign_in_url(&self, provider: &str) -> Result<String, BackendError> {
        Ok(format!(
            "{}?provider={provider}",
            self.auth_url("authorize")
        ))
    }

    fn subscribe(&self) -> UnboundedReceiver<AuthEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.state.lock().unwrap().listeners.push(tx);
        rx
    }
}
