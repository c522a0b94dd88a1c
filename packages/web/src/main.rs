use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Auth, CreateNote, Hero, Home, NoteDetail, Settings};

mod guard;
mod navbar;
mod views;

use navbar::Navbar;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Hero {},
        #[route("/user")]
        Home {},
        #[route("/user/note/:id")]
        NoteDetail { id: String },
        #[route("/create")]
        CreateNote {},
        #[route("/auth")]
        Auth {},
        #[route("/settings")]
        Settings {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Common chrome around every route: dark page background and the navbar.
#[component]
fn Shell() -> Element {
    rsx! {
        div {
            class: "relative min-h-screen bg-black text-white overflow-hidden",
            div {
                class: "relative z-10 flex flex-col min-h-screen",
                div { class: "flex justify-center", Navbar {} }
                main {
                    class: "flex-grow",
                    Outlet::<Route> {}
                }
            }
        }
    }
}
