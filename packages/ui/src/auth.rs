//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use futures::StreamExt;
use store::{AuthState, Session};

use crate::client::make_backend;

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that owns the backend and the authentication state.
/// Wrap the app with this component; everything below it shares one backend
/// and one observable session.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_context_provider(make_backend);
    let mut auth_state = use_signal(AuthState::default);

    // Resolve any persisted session on mount. Only this first check holds
    // `loading`; later transitions go straight between the settled states.
    let resolve_backend = backend.clone();
    let _ = use_resource(move || {
        let backend = resolve_backend.clone();
        async move {
            auth_state.set(Session::new(backend).resolve().await);
        }
    });

    // Session-change subscription for the process lifetime: sign-in/out
    // triggered anywhere (including the external-provider flow) lands here.
    use_effect(move || {
        let backend = backend.clone();
        spawn(async move {
            let mut changes = Session::new(backend).changes();
            while let Some(event) = changes.next().await {
                let mut state = auth_state();
                state.apply(event);
                auth_state.set(state);
            }
            // The sender lives as long as the backend; reaching here means
            // the backend handle itself is gone.
            tracing::warn!("session change stream closed");
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}
