//! simple-notes: an embeddable notes widget for the browser.
//!
//! A collapsible panel injected into a host web page: an always-visible tab
//! toggles a panel holding a heading and a textarea whose content and
//! open/closed state survive page reloads via localStorage.
//!
//! Configuration flows through three layers, lowest to highest precedence:
//! built-in defaults, `data-*` attributes on a markup marker element (the
//! loading `<script>` or any element carrying `data-simple-notes`), and an
//! overrides object passed to `init`. The resolved API is published as
//! `window.SimpleNotes` at load time:
//!
//! ```text
//! <script type="module" data-simple-notes data-heading="Scratchpad" src="...">
//! </script>
//! <script>
//!   // or imperatively, after load:
//!   SimpleNotes.init(document.body, { heading: "Scratchpad", open: true });
//! </script>
//! ```

pub mod bindings;
pub mod components;
pub mod config;
pub mod error;
pub mod init;
pub mod storage;

pub use config::{ConfigMap, ConfigValue, Position, WidgetOptions};
pub use error::InitError;
pub use init::{default_config, init};

use wasm_bindgen::prelude::*;

/// Module entry point: wires up logging, resolves the load-time default
/// configuration, publishes the window global, and auto-initializes when
/// the defaults say so.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let defaults = init::default_config();
    if let Err(error) = bindings::expose_global(&defaults) {
        log::warn!(
            "failed to expose window.{}: {:?}",
            bindings::GLOBAL_NAME,
            error
        );
    }

    if WidgetOptions::from_map(&defaults).auto_init {
        if let Err(error) = init::init(None, ConfigMap::new()) {
            log::error!("auto-init failed: {}", error);
        }
    }
}
