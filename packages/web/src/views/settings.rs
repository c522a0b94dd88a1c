use dioxus::prelude::*;
use ui::use_auth;

use crate::guard::ProtectedRoute;
use crate::Route;

#[component]
pub fn Settings() -> Element {
    rsx! {
        ProtectedRoute {
            SettingsContent {}
        }
    }
}

#[component]
fn SettingsContent() -> Element {
    let nav = use_navigator();
    let auth_state = use_auth();
    let session = ui::use_session();

    let email = auth_state()
        .user
        .map(|user| user.email)
        .unwrap_or_default();

    let handle_sign_out = move |_| {
        let session = session.clone();
        spawn(async move {
            // The state transition arrives through the provider's change
            // subscription; this handler only navigates.
            match session.sign_out().await {
                Ok(()) => {
                    nav.replace(Route::Hero {});
                }
                Err(err) => tracing::error!("sign out failed: {err}"),
            }
        });
    };

    rsx! {
        div {
            class: "max-w-2xl mx-auto px-4 sm:px-6 lg:px-8 py-12",
            h1 { class: "text-3xl font-bold text-white mb-8", "Settings" }

            div {
                class: "bg-green-900/20 border border-green-700/30 rounded-xl p-6 mb-6",
                h2 { class: "text-lg font-semibold text-green-200 mb-2", "Account" }
                p { class: "text-gray-300", "Signed in as " span { class: "text-white font-medium", "{email}" } }
            }

            div {
                class: "bg-green-900/20 border border-green-700/30 rounded-xl p-6",
                h2 { class: "text-lg font-semibold text-green-200 mb-4", "Session" }
                button {
                    class: "px-5 py-2 rounded-md bg-red-800/60 text-red-100 font-semibold hover:bg-red-700 transition-colors",
                    onclick: handle_sign_out,
                    "Log Out"
                }
            }
        }
    }
}
