//! Centralized storage module for localStorage persistence.
//!
//! Two independent entries, written on every state change and read once at
//! widget mount. Persistence is fire-and-forget: a page with storage
//! disabled or over quota keeps a fully working (just non-durable) widget.

use gloo_storage::{LocalStorage, Storage};

/// localStorage key for the panel's open/closed state, stored in canonical
/// boolean text form (`true`/`false`).
///
/// Both key names are a compatibility contract: renaming either silently
/// discards every user's saved state.
pub const STORAGE_OPEN: &str = "simple-notes.open";

/// localStorage key for the note text, stored as the raw string.
pub const STORAGE_NOTE: &str = "simple-notes.note";

/// True when the browser exposes a usable localStorage. Some embeddings
/// (sandboxed iframes, hardened privacy modes) expose none at all.
fn storage_available() -> bool {
    web_sys::window()
        .map(|window| matches!(window.local_storage(), Ok(Some(_))))
        .unwrap_or(false)
}

/// Load the persisted open state. Absent or undecodable entries read as
/// "no prior state found".
pub fn load_open() -> Option<bool> {
    if !storage_available() {
        return None;
    }
    LocalStorage::get(STORAGE_OPEN).ok()
}

/// Persist the open state.
pub fn save_open(open: bool) {
    if !storage_available() {
        return;
    }
    let _ = LocalStorage::set(STORAGE_OPEN, open);
}

/// Load the persisted note text.
///
/// The note goes through the raw storage API so the stored value is
/// byte-for-byte the textarea content: blank lines, tens-of-kilobyte texts
/// and JSON-hostile characters all round-trip unchanged.
pub fn load_note() -> Option<String> {
    if !storage_available() {
        return None;
    }
    LocalStorage::raw().get_item(STORAGE_NOTE).ok().flatten()
}

/// Persist the note text.
pub fn save_note(text: &str) {
    if !storage_available() {
        return;
    }
    let _ = LocalStorage::raw().set_item(STORAGE_NOTE, text);
}
