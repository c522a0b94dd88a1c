use dioxus::prelude::*;

use crate::guard::ProtectedRoute;
use crate::Route;

#[component]
pub fn CreateNote() -> Element {
    rsx! {
        ProtectedRoute {
            CreateNoteForm {}
        }
    }
}

#[component]
fn CreateNoteForm() -> Element {
    let nav = use_navigator();
    let repo = ui::use_notes();

    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_create = move |_| {
        let repo = repo.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            match repo.create(&title(), &content()).await {
                Ok(note) => {
                    nav.push(Route::NoteDetail { id: note.id });
                }
                Err(err) => {
                    tracing::error!("creating note: {err}");
                    error.set(Some(format!("Failed to create note: {err}")));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "w-full mx-auto px-4 sm:px-6 lg:px-8 py-8 flex justify-center items-start min-h-[calc(100vh-80px)]",
            div {
                class: "bg-green-900/20 rounded-xl shadow-2xl w-full lg:max-w-4xl flex flex-col overflow-hidden border border-green-700/30 min-h-[70vh]",

                if let Some(err) = error() {
                    div {
                        class: "mx-5 mt-5 bg-red-500/20 border border-red-500/50 rounded-lg p-3 text-red-200 text-sm",
                        "{err}"
                    }
                }

                div {
                    class: "p-5 border-b border-green-700/30 flex justify-between items-center",
                    input {
                        r#type: "text",
                        class: "flex-grow mr-4 bg-transparent text-2xl md:text-3xl font-semibold text-white focus:outline-none pb-1",
                        placeholder: "Note Title",
                        value: title(),
                        oninput: move |evt: FormEvent| title.set(evt.value()),
                    }
                    div {
                        class: "flex-shrink-0 flex space-x-3",
                        button {
                            class: "px-5 py-2 rounded-md bg-green-600 text-white font-semibold hover:bg-green-700 transition-colors text-sm disabled:opacity-50",
                            disabled: saving(),
                            onclick: handle_create,
                            if saving() { "Saving..." } else { "Save" }
                        }
                        Link {
                            class: "px-5 py-2 rounded-md bg-gray-600 text-white font-semibold hover:bg-gray-700 transition-colors text-sm",
                            to: Route::Home {},
                            "Cancel"
                        }
                    }
                }

                textarea {
                    class: "p-5 flex-grow w-full min-h-[300px] bg-transparent text-gray-200 text-base leading-relaxed focus:outline-none resize-none",
                    placeholder: "Start typing your note...",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
            }
        }
    }
}
