use dioxus::prelude::*;
use store::Session;

use crate::Route;

/// Top navigation: brand, section links, and the auth button. The button
/// flips between Log In and Log Out with the session state; sign-out itself
/// propagates back through the session-change subscription.
#[component]
pub fn Navbar() -> Element {
    let auth = ui::use_auth();
    let backend = ui::use_backend();

    let handle_sign_out = move |_| {
        let backend = backend.clone();
        spawn(async move {
            if let Err(err) = Session::new(backend).sign_out().await {
                tracing::warn!("sign out failed: {err}");
            }
        });
    };

    rsx! {
        nav {
            class: "w-full mx-8 mt-8 flex items-center rounded-lg justify-between px-4 py-2 bg-black/30 backdrop-blur-sm border border-gray-100/50 sticky top-0 z-30",
            Link {
                class: "flex items-center space-x-2.5 group",
                to: Route::Hero {},
                span { class: "text-white font-semibold text-xl tracking-tight group-hover:text-green-400 transition-colors", "NOTED" }
            }

            div {
                class: "hidden md:flex items-center space-x-3 md:space-x-4",
                Link { class: "px-4 py-2 rounded-lg hover:bg-green-700/20 text-gray-300 hover:text-white transition-colors", to: Route::Home {}, "Home" }
                Link { class: "px-4 py-2 rounded-lg hover:bg-green-700/20 text-gray-300 hover:text-white transition-colors", to: Route::CreateNote {}, "Create" }
                Link { class: "px-4 py-2 rounded-lg hover:bg-green-700/20 text-gray-300 hover:text-white transition-colors", to: Route::Settings {}, "Settings" }
            }

            div {
                class: "flex items-center",
                if auth().is_authenticated() {
                    button {
                        class: "px-5 py-2.5 rounded-lg bg-green-900 text-white font-semibold hover:bg-green-700 transition-colors",
                        onclick: handle_sign_out,
                        "Log Out"
                    }
                } else {
                    Link {
                        class: "px-5 py-2.5 rounded-lg bg-green-900 text-white font-semibold hover:bg-green-700 transition-colors",
                        to: Route::Auth {},
                        "Log In"
                    }
                }
            }
        }
    }
}
