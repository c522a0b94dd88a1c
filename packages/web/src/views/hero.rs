use dioxus::prelude::*;

use crate::Route;

/// Landing page.
#[component]
pub fn Hero() -> Element {
    rsx! {
        section {
            class: "flex flex-col lg:flex-row items-center justify-center min-h-[calc(100vh-80px)] px-6 md:px-10 py-10",
            div {
                class: "flex-1 flex flex-col items-center lg:items-start text-center lg:text-left",
                h1 { class: "text-4xl sm:text-5xl md:text-6xl font-bold text-white mb-6 leading-tight", "NOTED" }
                h3 { class: "text-2xl md:text-3xl font-bold text-white mb-6 leading-tight", "Every Great Idea, Starts with a Note!" }
                p {
                    class: "text-base md:text-xl text-gray-300 mb-8 max-w-xl",
                    "Capture inspiration the moment it strikes. Your ideas deserve a beautiful home."
                }
                div {
                    class: "flex flex-col sm:flex-row items-center space-y-4 sm:space-y-0 sm:space-x-4",
                    Link {
                        class: "w-full sm:w-auto px-8 py-3 rounded-lg bg-green-900 text-white font-semibold hover:bg-green-700 transition-colors text-center",
                        to: Route::CreateNote {},
                        "Create Note"
                    }
                    Link {
                        class: "w-full sm:w-auto px-8 py-3 rounded-lg border-2 border-gray-600 text-gray-200 hover:bg-green-700/20 hover:text-white transition-all text-center",
                        to: Route::Auth {},
                        "Sign Up"
                    }
                }
            }
        }
    }
}
