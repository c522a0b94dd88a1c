use dioxus::prelude::*;
use store::Note;
use ui::NoteCard;

use crate::guard::ProtectedRoute;
use crate::Route;

/// The notes listing at `/user`, behind the auth gate.
#[component]
pub fn Home() -> Element {
    rsx! {
        ProtectedRoute {
            NotesGrid {}
        }
    }
}

#[component]
fn NotesGrid() -> Element {
    let nav = use_navigator();
    let repo = ui::use_notes();

    let mut notes = use_signal(Vec::<Note>::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || {
        let repo = repo.clone();
        async move {
            match repo.list().await {
                Ok(rows) => {
                    notes.set(rows);
                    error.set(None);
                }
                Err(err) => {
                    tracing::error!("loading notes: {err}");
                    // No partial data: keep whatever was shown before.
                    error.set(Some(format!("Failed to load notes: {err}")));
                }
            }
            loading.set(false);
        }
    });

    rsx! {
        div {
            class: "px-4 sm:px-6 lg:px-8 py-8 min-h-[calc(100vh-80px)]",

            if let Some(err) = error() {
                div {
                    class: "max-w-3xl mx-auto mb-6 bg-red-500/20 border border-red-500/50 rounded-lg p-3 text-red-200 text-sm",
                    "{err}"
                }
            }

            if loading() {
                div {
                    class: "flex items-center justify-center mt-20",
                    div { class: "spinner" }
                }
            } else if notes().is_empty() {
                div {
                    class: "text-center text-gray-400 mt-20",
                    p { class: "text-xl", "No notes yet. Start creating!" }
                    Link {
                        class: "inline-block mt-4 px-6 py-3 rounded-lg bg-green-900 text-white font-semibold hover:bg-green-700 transition-colors",
                        to: Route::CreateNote {},
                        "Create Note"
                    }
                }
            } else {
                div {
                    class: "grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 xl:grid-cols-5 gap-6",
                    for note in notes() {
                        NoteCard {
                            key: "{note.id}",
                            note: note.clone(),
                            on_open: move |id: String| {
                                nav.push(Route::NoteDetail { id });
                            },
                        }
                    }
                }
            }
        }
    }
}
