use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

/// Combined login / signup page.
#[component]
pub fn Auth() -> Element {
    let nav = use_navigator();
    let auth_state = use_auth();
    let session = ui::use_session();

    // Signed-in visitors have no business here. This also completes both
    // sign-in paths below: once the change stream flips the state, the
    // effect reruns and navigates away.
    use_effect(move || {
        if auth_state().is_authenticated() {
            nav.replace(Route::Home {});
        }
    });

    let mut signup = use_signal(|| false);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);

    let submit_session = session.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = submit_session.clone();
        spawn(async move {
            busy.set(true);
            error.set(None);
            notice.set(None);
            if signup() {
                match session.sign_up(&email(), &password(), &confirm()).await {
                    Ok(user) if user.confirmed => {
                        // The backend emitted the sign-in; the provider's
                        // subscription updates the state.
                    }
                    Ok(_) => {
                        notice.set(Some(
                            "Account created. Check your inbox to confirm your email, then log in."
                                .to_string(),
                        ));
                        signup.set(false);
                        password.set(String::new());
                        confirm.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            } else {
                match session.sign_in(&email(), &password()).await {
                    Ok(_user) => {}
                    Err(err) => error.set(Some(err.to_string())),
                }
            }
            busy.set(false);
        });
    };

    let social_session = session.clone();
    let handle_google = move |_| {
        let session = social_session.clone();
        spawn(async move {
            error.set(None);
            match session.provider_sign_in("google").await {
                Ok(url) => {
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&url);
                        }
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    tracing::info!("provider sign-in url: {url}");
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "flex items-center justify-center min-h-[calc(100vh-80px)] px-4",
            div {
                class: "w-full max-w-md bg-green-900/20 border border-green-700/30 rounded-xl shadow-2xl p-8",

                div {
                    class: "flex mb-6 rounded-lg overflow-hidden border border-green-700/40",
                    button {
                        class: if !signup() {
                            "flex-1 py-2 bg-green-600 text-white font-semibold"
                        } else {
                            "flex-1 py-2 bg-transparent text-green-300 hover:bg-green-800/30"
                        },
                        onclick: move |_| {
                            signup.set(false);
                            error.set(None);
                        },
                        "Log In"
                    }
                    button {
                        class: if signup() {
                            "flex-1 py-2 bg-green-600 text-white font-semibold"
                        } else {
                            "flex-1 py-2 bg-transparent text-green-300 hover:bg-green-800/30"
                        },
                        onclick: move |_| {
                            signup.set(true);
                            error.set(None);
                            notice.set(None);
                        },
                        "Sign Up"
                    }
                }

                if let Some(err) = error() {
                    div {
                        class: "mb-4 bg-red-500/20 border border-red-500/50 rounded-lg p-3 text-red-200 text-sm",
                        "{err}"
                    }
                }
                if let Some(msg) = notice() {
                    div {
                        class: "mb-4 bg-green-500/20 border border-green-500/50 rounded-lg p-3 text-green-200 text-sm",
                        "{msg}"
                    }
                }

                form {
                    onsubmit: handle_submit,
                    label { class: "block text-sm text-green-200 mb-1", "Email" }
                    input {
                        r#type: "email",
                        class: "w-full mb-4 px-3 py-2 rounded-md bg-black/30 border border-green-700/40 text-white focus:outline-none focus:border-green-500",
                        placeholder: "you@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    label { class: "block text-sm text-green-200 mb-1", "Password" }
                    input {
                        r#type: "password",
                        class: "w-full mb-4 px-3 py-2 rounded-md bg-black/30 border border-green-700/40 text-white focus:outline-none focus:border-green-500",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    if signup() {
                        label { class: "block text-sm text-green-200 mb-1", "Confirm Password" }
                        input {
                            r#type: "password",
                            class: "w-full mb-4 px-3 py-2 rounded-md bg-black/30 border border-green-700/40 text-white focus:outline-none focus:border-green-500",
                            value: confirm(),
                            oninput: move |evt: FormEvent| confirm.set(evt.value()),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full py-2 rounded-md bg-green-600 text-white font-semibold hover:bg-green-700 transition-colors disabled:opacity-50",
                        disabled: busy(),
                        if busy() {
                            "Please wait..."
                        } else if signup() {
                            "Create Account"
                        } else {
                            "Log In"
                        }
                    }
                }

                div { class: "my-4 text-center text-gray-500 text-sm", "or" }

                button {
                    class: "w-full py-2 rounded-md bg-white text-gray-800 font-semibold hover:bg-gray-200 transition-colors",
                    onclick: handle_google,
                    "Continue with Google"
                }
            }
        }
    }
}
