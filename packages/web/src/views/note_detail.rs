use dioxus::prelude::*;
use store::{Note, RepoError};

use crate::guard::ProtectedRoute;
use crate::Route;

/// Read/edit view for a single note at `/user/note/:id`.
#[component]
pub fn NoteDetail(id: String) -> Element {
    rsx! {
        ProtectedRoute {
            NoteDetailContent { id }
        }
    }
}

#[component]
fn NoteDetailContent(id: String) -> Element {
    let nav = use_navigator();
    let repo = ui::use_notes();

    // Track the id in a signal so the loader re-runs on route param change.
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let mut current_note = use_signal(|| Option::<Note>::None);
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut editing = use_signal(|| false);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let loader_repo = repo.clone();
    let _loader = use_resource(move || {
        let repo = loader_repo.clone();
        let id = id_signal();
        async move {
            loading.set(true);
            match repo.fetch(&id).await {
                Ok(note) => {
                    title.set(note.title.clone());
                    content.set(note.content.clone());
                    current_note.set(Some(note));
                    error.set(None);
                }
                Err(RepoError::NotFound) => {
                    error.set(Some("Note not found".to_string()));
                }
                Err(err) => {
                    tracing::error!("loading note: {err}");
                    error.set(Some(format!("Failed to load note: {err}")));
                }
            }
            loading.set(false);
        }
    });

    let save_repo = repo.clone();
    let handle_save = move |_| {
        let repo = save_repo.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            match repo.update(&id_signal(), &title(), &content()).await {
                Ok(note) => {
                    title.set(note.title.clone());
                    content.set(note.content.clone());
                    current_note.set(Some(note));
                    editing.set(false);
                }
                Err(err) => {
                    error.set(Some(format!("Failed to save note: {err}")));
                }
            }
            saving.set(false);
        });
    };

    let pin_repo = repo.clone();
    let handle_pin = move |_| {
        let repo = pin_repo.clone();
        spawn(async move {
            let Some(note) = current_note() else { return };
            // Previous pin state comes from this view, not a re-read.
            match repo.toggle_pin(&note.id, note.is_pinned).await {
                Ok(updated) => current_note.set(Some(updated)),
                Err(err) => error.set(Some(format!("Failed to update pin: {err}"))),
            }
        });
    };

    let delete_repo = repo.clone();
    let handle_delete = move |_| {
        let repo = delete_repo.clone();
        spawn(async move {
            match repo.delete(&id_signal()).await {
                Ok(()) => {
                    nav.replace(Route::Home {});
                }
                Err(err) => error.set(Some(format!("Failed to delete note: {err}"))),
            }
        });
    };

    let handle_edit_toggle = move |_| {
        if editing() {
            // Leaving edit mode without saving resets the fields.
            if let Some(note) = current_note() {
                title.set(note.title);
                content.set(note.content);
            }
        }
        editing.set(!editing());
    };

    if loading() {
        return rsx! {
            div {
                class: "flex items-center justify-center h-[calc(100vh-150px)]",
                div { class: "spinner" }
            }
        };
    }

    let Some(note) = current_note() else {
        // Load failed: nothing to render but the error and a way back.
        return rsx! {
            div {
                class: "flex items-center justify-center h-[calc(100vh-150px)] text-white text-2xl",
                div {
                    class: "text-center",
                    p { class: "text-red-400 mb-4", {error().unwrap_or_else(|| "Note not found".to_string())} }
                    Link {
                        class: "px-6 py-3 bg-green-600 text-white rounded-lg hover:bg-green-700 transition-colors",
                        to: Route::Home {},
                        "Back to Notes"
                    }
                }
            }
        };
    };

    let last_edit = note.updated_at.format("%d/%m/%Y").to_string();

    rsx! {
        div {
            class: "w-full mx-auto px-4 sm:px-6 lg:px-8 py-8 flex justify-center items-start min-h-[calc(100vh-80px)]",
            div {
                class: "bg-green-900/20 rounded-xl shadow-2xl w-full lg:max-w-4xl flex flex-col overflow-hidden border border-green-700/30 min-h-[70vh]",

                div {
                    class: "p-5 pb-0",
                    Link {
                        class: "inline-flex items-center px-3 py-2 rounded-md bg-green-800/30 text-green-300 hover:bg-green-700/40 transition-colors text-sm border border-green-700/50",
                        to: Route::Home {},
                        "Back to Notes"
                    }
                }

                if let Some(err) = error() {
                    div {
                        class: "mx-5 mt-3 bg-red-500/20 border border-red-500/50 rounded-lg p-3 text-red-200 text-sm",
                        "{err}"
                    }
                }

                div {
                    class: "p-5 border-b border-green-700/30 flex justify-between items-center",
                    div {
                        class: "flex-grow mr-4",
                        if editing() {
                            input {
                                r#type: "text",
                                class: "w-full bg-transparent text-2xl md:text-3xl font-semibold text-white focus:outline-none pb-1",
                                placeholder: "Note Title",
                                value: title(),
                                oninput: move |evt: FormEvent| title.set(evt.value()),
                            }
                        } else {
                            h2 { class: "text-2xl md:text-3xl font-semibold text-white break-words", "{note.title}" }
                        }
                    }

                    div {
                        class: "flex-shrink-0 flex space-x-3",
                        if editing() {
                            button {
                                class: "px-5 py-2 rounded-md bg-green-600 text-white font-semibold hover:bg-green-700 transition-colors text-sm disabled:opacity-50",
                                disabled: saving(),
                                onclick: handle_save,
                                if saving() { "Saving..." } else { "Save" }
                            }
                            button {
                                class: "px-5 py-2 rounded-md bg-gray-600 text-white font-semibold hover:bg-gray-700 transition-colors text-sm disabled:opacity-50",
                                disabled: saving(),
                                onclick: handle_edit_toggle,
                                "Read"
                            }
                        } else {
                            button {
                                class: "px-5 py-2 rounded-md bg-green-600 text-white font-semibold hover:bg-green-700 transition-colors text-sm",
                                onclick: handle_edit_toggle,
                                "Edit"
                            }
                            button {
                                class: "px-5 py-2 rounded-md bg-green-800/40 text-green-200 font-semibold hover:bg-green-700/50 transition-colors text-sm",
                                onclick: handle_pin,
                                if note.is_pinned { "Unpin" } else { "Pin" }
                            }
                            button {
                                class: "px-5 py-2 rounded-md bg-red-800/60 text-red-100 font-semibold hover:bg-red-700 transition-colors text-sm",
                                onclick: handle_delete,
                                "Delete"
                            }
                        }
                    }
                }

                div {
                    class: "p-5 flex-grow overflow-y-auto",
                    if editing() {
                        textarea {
                            class: "w-full h-full min-h-[300px] bg-transparent text-gray-200 text-base leading-relaxed focus:outline-none resize-none",
                            placeholder: "Start typing your note...",
                            value: content(),
                            oninput: move |evt: FormEvent| content.set(evt.value()),
                        }
                    } else if note.content.is_empty() {
                        p { class: "text-gray-500 text-base leading-relaxed", "No content yet." }
                    } else {
                        p { class: "text-gray-200 text-base leading-relaxed whitespace-pre-wrap break-words", "{note.content}" }
                    }
                }

                if !editing() {
                    div {
                        class: "p-3 border-t border-green-700/30 text-right text-xs text-gray-400",
                        "Last Edited: {last_edit}"
                    }
                }
            }
        }
    }
}
