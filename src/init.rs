//! Widget initialization: resolves the process-wide default configuration
//! and mounts widget instances into the host page.

use std::cell::OnceCell;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::components::NotesWidget;
use crate::config::{self, ConfigMap, WidgetOptions};
use crate::error::InitError;

/// Id of the root element each [`init`] call creates under its target.
pub const ROOT_ID: &str = "simple-notes-root";

/// Selector locating the markup marker element when `document.currentScript`
/// is unset (module scripts and the wasm start hook run with it null).
const MARKER_SELECTOR: &str = "[data-simple-notes]";

thread_local! {
    static DEFAULT_CONFIG: OnceCell<ConfigMap> = OnceCell::new();
}

/// The process-wide default configuration: built-in defaults overlaid with
/// the marker element's parsed `data-*` attributes.
///
/// Computed once at load time (or on first use) and never reset. Callers
/// wanting different settings pass overrides to [`init`] rather than
/// mutating shared state.
pub fn default_config() -> ConfigMap {
    DEFAULT_CONFIG.with(|cell| {
        cell.get_or_init(|| {
            web_sys::window()
                .and_then(|window| window.document())
                .map(|document| resolve_config(&document))
                .unwrap_or_else(config::builtin_defaults)
        })
        .clone()
    })
}

/// Resolves the configuration a document declares: built-in defaults
/// overlaid with the marker element's parsed `data-*` attributes, the
/// attributes winning key by key. Uncached; [`default_config`] snapshots
/// this once per load.
pub fn resolve_config(document: &Document) -> ConfigMap {
    let mut resolved = config::builtin_defaults();
    if let Some(marker) = marker_element(document) {
        let parsed = config::parse_data_attributes(data_attributes(&marker));
        resolved = config::merge(&resolved, &parsed);
    }
    log::debug!("resolved default config: {:?}", resolved);
    resolved
}

/// The script/marker element whose `data-*` attributes declare the default
/// configuration, if the page has one: `document.currentScript` when set,
/// else the first match of the marker selector.
pub fn marker_element(document: &Document) -> Option<Element> {
    if let Some(script) = document.current_script() {
        return Some(script.into());
    }
    document.query_selector(MARKER_SELECTOR).ok().flatten()
}

/// Extracts an element's `data-*` attributes under their dataset-convention
/// names, ready for [`config::parse_data_attributes`].
pub fn data_attributes(element: &Element) -> Vec<(String, String)> {
    let attributes = element.attributes();
    let mut out = Vec::new();
    for index in 0..attributes.length() {
        let Some(attribute) = attributes.item(index) else {
            continue;
        };
        if let Some(key) = config::dataset_key(&attribute.name()) {
            out.push((key, attribute.value()));
        }
    }
    out
}

/// Mounts one widget instance.
///
/// `target` defaults to the document body. `overrides` merge onto the
/// process-wide defaults, winning key by key. Every call creates an
/// independent instance under a fresh root element; a caller
/// re-initializing is responsible for removing the previous root first.
/// Returns the created root element as the instance handle.
pub fn init(target: Option<HtmlElement>, overrides: ConfigMap) -> Result<HtmlElement, InitError> {
    let document = web_sys::window()
        .ok_or(InitError::NoWindow)?
        .document()
        .ok_or(InitError::NoDocument)?;
    let target = match target {
        Some(element) => element,
        None => document.body().ok_or(InitError::NoBody)?,
    };

    let merged = config::merge(&default_config(), &overrides);
    let options = WidgetOptions::from_map(&merged);

    let root: HtmlElement = document
        .create_element("div")
        .map_err(InitError::from_js)?
        .unchecked_into();
    root.set_id(ROOT_ID);
    target.append_child(&root).map_err(InitError::from_js)?;

    // The widget lives for the rest of the page: the mount handle is
    // forgotten rather than unmounting on drop.
    mount_to(root.clone(), move || view! { <NotesWidget options=options/> }).forget();

    Ok(root)
}
