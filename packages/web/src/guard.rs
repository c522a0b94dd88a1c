use dioxus::prelude::*;
use store::Gate;
use ui::use_auth;

use crate::Route;

/// Gates a protected region on the session state, re-evaluated on every
/// render: a spinner while the initial session check runs, a redirect to the
/// auth page for anonymous visitors, otherwise the content itself.
#[component]
pub fn ProtectedRoute(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    match auth().gate() {
        Gate::Wait => rsx! {
            div {
                class: "flex items-center justify-center min-h-screen",
                div { class: "spinner" }
            }
        },
        Gate::Redirect => {
            // Replace history so back navigation cannot return here.
            nav.replace(Route::Auth {});
            rsx! {}
        }
        Gate::Allow => rsx! {
            {children}
        },
    }
}
