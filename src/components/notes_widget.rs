//! The collapsible notes widget: an always-visible tab toggling a panel
//! with a heading and a persistent textarea.

use gloo_timers::future::TimeoutFuture;
use leptos::html::Textarea;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::config::WidgetOptions;
use crate::storage;

/// Id of the panel element, for host styling and tests.
pub const PANEL_ID: &str = "simple-notes-panel";

#[component]
pub fn NotesWidget(options: WidgetOptions) -> impl IntoView {
    // Persisted state wins over the configured initial state; absent
    // entries fall back to it. The note always seeds from storage or empty.
    let is_open = RwSignal::new(storage::load_open().unwrap_or(options.open));
    let note_text = RwSignal::new(storage::load_note().unwrap_or_default());
    let textarea_ref = NodeRef::<Textarea>::new();

    let toggle = move |_| {
        let now_open = !is_open.get_untracked();
        is_open.set(now_open);
        storage::save_open(now_open);
        if now_open {
            // Focus once the open class has taken effect, so the user can
            // type immediately. Best-effort: focus refusal is not an error.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                if let Some(textarea) = textarea_ref.get_untracked() {
                    let _ = textarea.focus();
                }
            });
        }
    };

    let on_input = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let textarea: web_sys::HtmlTextAreaElement = target.unchecked_into();
        let value = textarea.value();
        note_text.set(value.clone());
        storage::save_note(&value);
    };

    let heading = options.heading.clone();
    let tab_label = options.heading.clone();

    view! {
        <div
            class="notes-container"
            class:open=move || is_open.get()
            class:closed=move || !is_open.get()
            data-position=options.position.as_str()
        >
            <button
                class="notes-tab"
                on:click=toggle
                title=move || if is_open.get() { "Close notes" } else { "Open notes" }
            >
                {tab_label}
            </button>
            <div id=PANEL_ID class="notes-panel">
                <div class="notes-header">
                    <h1>{heading}</h1>
                </div>
                <textarea
                    node_ref=textarea_ref
                    placeholder="Jot something down"
                    prop:value=move || note_text.get()
                    on:input=on_input
                />
            </div>
        </div>
    }
}
