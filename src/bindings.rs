//! JS interop surface: the window global and the module exports.
//!
//! Values cross the boundary through JSON (`js_sys::JSON` + `serde_json`),
//! which is what makes the untagged [`ConfigValue`] the wire shape: plain
//! JS objects of booleans, numbers and strings on one side, a [`ConfigMap`]
//! on the other. Entries of any other type are dropped rather than erroring.

use js_sys::{Object, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::{self, ConfigMap, ConfigValue};
use crate::init;

/// Name of the host-page-visible global object.
pub const GLOBAL_NAME: &str = "SimpleNotes";

/// Mounts a widget into `target` (the document body when absent), merging
/// `overrides` onto the process-wide defaults. Returns the widget's root
/// element as the instance handle.
#[wasm_bindgen(js_name = init)]
pub fn init_js(target: Option<HtmlElement>, overrides: JsValue) -> Result<HtmlElement, JsValue> {
    let overrides = js_to_config(&overrides);
    init::init(target, overrides).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Type-coerces a mapping of raw attribute strings, per the dataset
/// coercion rules. Boolean and number entries pass through unchanged;
/// empty or undefined input yields an empty object. Never throws.
#[wasm_bindgen(js_name = parseDataAttributes)]
pub fn parse_data_attributes_js(attributes: JsValue) -> JsValue {
    let parsed: ConfigMap = js_to_json_map(&attributes)
        .into_iter()
        .filter_map(|(key, value)| {
            let coerced = match value {
                serde_json::Value::String(raw) => config::coerce_attribute(&raw),
                serde_json::Value::Bool(value) => ConfigValue::Bool(value),
                serde_json::Value::Number(value) => ConfigValue::Number(value.as_f64()?),
                _ => return None,
            };
            Some((key, coerced))
        })
        .collect();
    config_to_js(&parsed)
}

/// The resolved process-wide default configuration, as a plain JS object.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config_js() -> JsValue {
    config_to_js(&init::default_config())
}

/// Publishes `window.SimpleNotes = { init, parseDataAttributes, config }`.
///
/// Written once at load time; the closures are leaked so the API lives for
/// the page. `config` is a snapshot of the resolved defaults; host code
/// passes fresh overrides to `init` instead of mutating it.
pub fn expose_global(defaults: &ConfigMap) -> Result<(), JsValue> {
    let api = Object::new();

    let init_fn = Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(
        |target: JsValue, overrides: JsValue| {
            let target = target.dyn_into::<HtmlElement>().ok();
            match init_js(target, overrides) {
                Ok(root) => root.into(),
                Err(error) => {
                    log::warn!("widget init failed: {:?}", error);
                    JsValue::NULL
                }
            }
        },
    )
    .into_js_value();
    Reflect::set(&api, &"init".into(), &init_fn)?;

    let parse_fn = Closure::<dyn Fn(JsValue) -> JsValue>::new(parse_data_attributes_js)
        .into_js_value();
    Reflect::set(&api, &"parseDataAttributes".into(), &parse_fn)?;

    Reflect::set(&api, &"config".into(), &config_to_js(defaults))?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    Reflect::set(&window, &GLOBAL_NAME.into(), &api)?;
    Ok(())
}

/// Reads a JS object into a [`ConfigMap`], keeping boolean, number and
/// string entries.
fn js_to_config(value: &JsValue) -> ConfigMap {
    js_to_json_map(value)
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                serde_json::Value::Bool(value) => ConfigValue::Bool(value),
                serde_json::Value::Number(value) => ConfigValue::Number(value.as_f64()?),
                serde_json::Value::String(value) => ConfigValue::Text(value),
                _ => return None,
            };
            Some((key, value))
        })
        .collect()
}

fn js_to_json_map(value: &JsValue) -> serde_json::Map<String, serde_json::Value> {
    if value.is_undefined() || value.is_null() {
        return serde_json::Map::new();
    }
    let Ok(json) = JSON::stringify(value) else {
        return serde_json::Map::new();
    };
    let Some(json) = json.as_string() else {
        return serde_json::Map::new();
    };
    match serde_json::from_str(&json) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

fn config_to_js(config: &ConfigMap) -> JsValue {
    let json = match serde_json::to_string(config) {
        Ok(json) => json,
        Err(_) => return Object::new().into(),
    };
    JSON::parse(&json).unwrap_or_else(|_| Object::new().into())
}
