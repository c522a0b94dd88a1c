use dioxus::prelude::*;
use store::Note;

/// Characters of content shown in the preview.
const MAX_PREVIEW: usize = 150;

/// A single note in the listing grid: title, truncated preview, pin marker,
/// last-edit date. Clicking anywhere opens the note.
#[component]
pub fn NoteCard(note: Note, on_open: EventHandler<String>) -> Element {
    let preview = if note.content.chars().count() > MAX_PREVIEW {
        let truncated: String = note.content.chars().take(MAX_PREVIEW).collect();
        format!("{truncated}...")
    } else {
        note.content.clone()
    };
    let last_edit = note.updated_at.format("%d/%m/%Y").to_string();
    let id = note.id.clone();

    rsx! {
        div {
            class: "bg-green-900/30 hover:bg-green-800/40 transition-colors duration-200 rounded-xl p-5 text-gray-100 flex flex-col justify-between shadow-lg h-full min-h-[200px] cursor-pointer",
            onclick: move |_| on_open.call(id.clone()),
            div {
                div {
                    class: "flex items-start justify-between",
                    h3 { class: "text-xl font-semibold text-white mb-2 break-words", "{note.title}" }
                    if note.is_pinned {
                        span {
                            class: "text-xs text-green-300 border border-green-500/50 rounded px-2 py-0.5 ml-2 flex-shrink-0",
                            "Pinned"
                        }
                    }
                }
                p { class: "text-sm text-gray-200 leading-relaxed break-words", "{preview}" }
            }
            p { class: "text-xs text-gray-500 mt-4 text-right", "Last Edit: {last_edit}" }
        }
    }
}
