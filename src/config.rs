//! Configuration model for the notes widget.
//!
//! Configuration flows through three layers, lowest to highest precedence:
//! built-in defaults, `data-*` attributes parsed off the markup marker
//! element, and overrides passed to `init`. Everything in this module is
//! pure (no DOM access) so the coercion and merge rules can be unit-tested
//! natively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option names, in the camelCase form the DOM dataset convention produces.
pub const OPT_OPEN: &str = "open";
pub const OPT_POSITION: &str = "position";
pub const OPT_AUTO_INIT: &str = "autoInit";
pub const OPT_HEADING: &str = "heading";

/// Panel title used when no `heading` option is configured.
pub const DEFAULT_HEADING: &str = "Notes";

/// A single configuration value.
///
/// `untagged` so a `ConfigMap` serializes to the natural JSON/JS shape:
/// bare booleans, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// A flat option-name-to-value mapping. Unrecognized keys are carried but
/// never interpreted.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Screen edge the tab attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Left,
    #[default]
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Position::Left),
            "right" => Some(Position::Right),
            _ => None,
        }
    }
}

/// Resolved, typed options the widget consumes at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetOptions {
    pub open: bool,
    pub position: Position,
    pub auto_init: bool,
    pub heading: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            open: false,
            position: Position::default(),
            auto_init: false,
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}

impl WidgetOptions {
    /// Resolves typed options from a merged configuration map.
    ///
    /// Wrong-typed or unrecognized values fall back to the defaults rather
    /// than erroring: a malformed host page gets a working widget.
    pub fn from_map(config: &ConfigMap) -> Self {
        let defaults = Self::default();
        Self {
            open: config
                .get(OPT_OPEN)
                .and_then(ConfigValue::as_bool)
                .unwrap_or(defaults.open),
            position: config
                .get(OPT_POSITION)
                .and_then(ConfigValue::as_text)
                .and_then(Position::from_str)
                .unwrap_or(defaults.position),
            auto_init: config
                .get(OPT_AUTO_INIT)
                .and_then(ConfigValue::as_bool)
                .unwrap_or(defaults.auto_init),
            heading: config
                .get(OPT_HEADING)
                .and_then(ConfigValue::as_text)
                .map(str::to_string)
                .unwrap_or(defaults.heading),
        }
    }
}

/// Built-in defaults, the lowest precedence layer.
///
/// The heading default is intentionally absent here: it resolves in
/// [`WidgetOptions::from_map`], so `heading` only appears in the shared
/// config when a marker attribute or override actually set it.
pub fn builtin_defaults() -> ConfigMap {
    let mut config = ConfigMap::new();
    config.insert(OPT_OPEN.to_string(), ConfigValue::Bool(false));
    config.insert(
        OPT_POSITION.to_string(),
        ConfigValue::Text(Position::Right.as_str().to_string()),
    );
    config.insert(OPT_AUTO_INIT.to_string(), ConfigValue::Bool(false));
    config
}

/// Coerces one raw attribute string to a typed value.
///
/// The literal `"true"`/`"false"` become booleans. Any other string that is
/// non-empty after trimming and parses as a finite `f64` becomes a number;
/// the trim happens before the parse so `" 42 "` coerces, and the
/// finiteness guard keeps `"NaN"` and the `"Infinity"` family strings (JSON
/// carries no non-finite numbers, so every coerced number crosses the JS
/// boundary unchanged). Everything else is preserved verbatim. Host pages
/// depend on these exact rules.
pub fn coerce_attribute(raw: &str) -> ConfigValue {
    match raw {
        "true" => return ConfigValue::Bool(true),
        "false" => return ConfigValue::Bool(false),
        _ => {}
    }
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        if let Ok(number) = trimmed.parse::<f64>() {
            if number.is_finite() {
                return ConfigValue::Number(number);
            }
        }
    }
    ConfigValue::Text(raw.to_string())
}

/// Coerces a set of raw attribute strings, keeping the keys.
///
/// Pure: the caller supplies already-normalized option names (see
/// [`dataset_key`]). Empty input yields an empty map.
pub fn parse_data_attributes<I>(attributes: I) -> ConfigMap
where
    I: IntoIterator<Item = (String, String)>,
{
    attributes
        .into_iter()
        .map(|(name, raw)| (name, coerce_attribute(&raw)))
        .collect()
}

/// Converts a `data-*` attribute name to its dataset-convention option name:
/// the `data-` prefix is stripped and each `-` followed by a lowercase
/// letter is collapsed into the uppercased letter (`data-auto-init` ->
/// `autoInit`). Returns `None` for non-data attributes.
pub fn dataset_key(attribute: &str) -> Option<String> {
    let suffix = attribute.strip_prefix("data-")?;
    if suffix.is_empty() {
        return None;
    }
    let mut key = String::with_capacity(suffix.len());
    let mut chars = suffix.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    key.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => key.push(ch),
            }
        } else {
            key.push(ch);
        }
    }
    Some(key)
}

/// Merges `overrides` onto `base`, key by key. Overrides win.
pub fn merge(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ConfigValue {
        ConfigValue::Text(s.to_string())
    }

    #[test]
    fn test_bool_literals_coerce() {
        assert_eq!(coerce_attribute("true"), ConfigValue::Bool(true));
        assert_eq!(coerce_attribute("false"), ConfigValue::Bool(false));
        // Only the exact literals: padded or cased variants stay strings.
        assert_eq!(coerce_attribute(" true "), text(" true "));
        assert_eq!(coerce_attribute("True"), text("True"));
        assert_eq!(coerce_attribute("TRUE"), text("TRUE"));
    }

    #[test]
    fn test_numeric_strings_coerce() {
        assert_eq!(coerce_attribute("42"), ConfigValue::Number(42.0));
        assert_eq!(coerce_attribute("-7"), ConfigValue::Number(-7.0));
        assert_eq!(coerce_attribute("+5"), ConfigValue::Number(5.0));
        assert_eq!(coerce_attribute("3.25"), ConfigValue::Number(3.25));
        assert_eq!(coerce_attribute("1e3"), ConfigValue::Number(1000.0));
        assert_eq!(coerce_attribute(".5"), ConfigValue::Number(0.5));
        assert_eq!(coerce_attribute("0"), ConfigValue::Number(0.0));
    }

    #[test]
    fn test_padded_numerics_trim_before_parse() {
        assert_eq!(coerce_attribute(" 42 "), ConfigValue::Number(42.0));
        assert_eq!(coerce_attribute("\t12.5\n"), ConfigValue::Number(12.5));
    }

    #[test]
    fn test_empty_and_whitespace_stay_text() {
        assert_eq!(coerce_attribute(""), text(""));
        assert_eq!(coerce_attribute("   "), text("   "));
        assert_eq!(coerce_attribute("\t\n"), text("\t\n"));
    }

    #[test]
    fn test_non_numeric_strings_preserved() {
        assert_eq!(coerce_attribute("left"), text("left"));
        assert_eq!(coerce_attribute("12abc"), text("12abc"));
        assert_eq!(coerce_attribute("1,000"), text("1,000"));
        // Hex literals are not part of the f64 grammar; they stay strings.
        assert_eq!(coerce_attribute("0x10"), text("0x10"));
    }

    #[test]
    fn test_non_finite_literals_stay_text() {
        // f64 parses every one of these; the finiteness guard keeps them
        // strings.
        assert_eq!(coerce_attribute("NaN"), text("NaN"));
        assert_eq!(coerce_attribute("nan"), text("nan"));
        assert_eq!(coerce_attribute("Infinity"), text("Infinity"));
        assert_eq!(coerce_attribute("-Infinity"), text("-Infinity"));
        assert_eq!(coerce_attribute("inf"), text("inf"));
        assert_eq!(coerce_attribute("infinity"), text("infinity"));
        // Overflowing parses saturate to infinity and stay strings too.
        assert_eq!(coerce_attribute("1e400"), text("1e400"));
    }

    #[test]
    fn test_parse_data_attributes_keeps_keys() {
        let parsed = parse_data_attributes(vec![
            ("open".to_string(), "true".to_string()),
            ("position".to_string(), "left".to_string()),
            ("delay".to_string(), "250".to_string()),
        ]);
        assert_eq!(parsed.get("open"), Some(&ConfigValue::Bool(true)));
        assert_eq!(parsed.get("position"), Some(&text("left")));
        assert_eq!(parsed.get("delay"), Some(&ConfigValue::Number(250.0)));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_parse_data_attributes_empty_input() {
        let parsed = parse_data_attributes(Vec::new());
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_dataset_key_normalization() {
        assert_eq!(dataset_key("data-open"), Some("open".to_string()));
        assert_eq!(dataset_key("data-auto-init"), Some("autoInit".to_string()));
        assert_eq!(dataset_key("data-heading"), Some("heading".to_string()));
        // A dash not followed by a lowercase letter survives as-is.
        assert_eq!(dataset_key("data-x-2"), Some("x-2".to_string()));
        assert_eq!(dataset_key("data-foo--bar"), Some("foo-Bar".to_string()));
    }

    #[test]
    fn test_dataset_key_rejects_non_data_attributes() {
        assert_eq!(dataset_key("id"), None);
        assert_eq!(dataset_key("class"), None);
        assert_eq!(dataset_key("data-"), None);
    }

    #[test]
    fn test_builtin_defaults() {
        let defaults = builtin_defaults();
        assert_eq!(defaults.get(OPT_OPEN), Some(&ConfigValue::Bool(false)));
        assert_eq!(defaults.get(OPT_POSITION), Some(&text("right")));
        assert_eq!(defaults.get(OPT_AUTO_INIT), Some(&ConfigValue::Bool(false)));
        assert_eq!(defaults.get(OPT_HEADING), None);
    }

    #[test]
    fn test_merge_overrides_win_key_by_key() {
        let base = builtin_defaults();
        let mut overrides = ConfigMap::new();
        overrides.insert(OPT_OPEN.to_string(), ConfigValue::Bool(true));
        overrides.insert(OPT_HEADING.to_string(), text("Custom Notes Title"));

        let merged = merge(&base, &overrides);
        // Overridden keys take the override value...
        assert_eq!(merged.get(OPT_OPEN), Some(&ConfigValue::Bool(true)));
        assert_eq!(merged.get(OPT_HEADING), Some(&text("Custom Notes Title")));
        // ...while untouched base keys survive.
        assert_eq!(merged.get(OPT_POSITION), Some(&text("right")));
        assert_eq!(merged.get(OPT_AUTO_INIT), Some(&ConfigValue::Bool(false)));
        // Inputs are not mutated.
        assert_eq!(base.get(OPT_OPEN), Some(&ConfigValue::Bool(false)));
    }

    #[test]
    fn test_merge_layers_compose() {
        // defaults -> markup attributes -> caller overrides, each layer
        // winning key by key over the previous.
        let defaults = builtin_defaults();
        let markup = parse_data_attributes(vec![
            ("open".to_string(), "true".to_string()),
            ("heading".to_string(), "From Markup".to_string()),
        ]);
        let mut caller = ConfigMap::new();
        caller.insert(OPT_HEADING.to_string(), text("From Caller"));

        let resolved = merge(&merge(&defaults, &markup), &caller);
        assert_eq!(resolved.get(OPT_OPEN), Some(&ConfigValue::Bool(true)));
        assert_eq!(resolved.get(OPT_HEADING), Some(&text("From Caller")));
        assert_eq!(resolved.get(OPT_POSITION), Some(&text("right")));
    }

    #[test]
    fn test_options_from_empty_map_are_defaults() {
        let options = WidgetOptions::from_map(&ConfigMap::new());
        assert_eq!(options, WidgetOptions::default());
        assert!(!options.open);
        assert_eq!(options.position, Position::Right);
        assert_eq!(options.heading, "Notes");
    }

    #[test]
    fn test_options_from_map_reads_typed_values() {
        let mut config = ConfigMap::new();
        config.insert(OPT_OPEN.to_string(), ConfigValue::Bool(true));
        config.insert(OPT_POSITION.to_string(), text("left"));
        config.insert(OPT_HEADING.to_string(), text("Scratchpad"));
        let options = WidgetOptions::from_map(&config);
        assert!(options.open);
        assert_eq!(options.position, Position::Left);
        assert_eq!(options.heading, "Scratchpad");
        assert!(!options.auto_init);
    }

    #[test]
    fn test_options_from_map_degrades_malformed_values() {
        let mut config = ConfigMap::new();
        // Wrong types and unknown positions fall back, never error.
        config.insert(OPT_OPEN.to_string(), text("yes"));
        config.insert(OPT_POSITION.to_string(), text("top"));
        config.insert(OPT_HEADING.to_string(), ConfigValue::Number(7.0));
        let options = WidgetOptions::from_map(&config);
        assert_eq!(options, WidgetOptions::default());
    }

    #[test]
    fn test_position_round_trip() {
        assert_eq!(Position::from_str("left"), Some(Position::Left));
        assert_eq!(Position::from_str("right"), Some(Position::Right));
        assert_eq!(Position::from_str("middle"), None);
        assert_eq!(Position::Left.as_str(), "left");
        assert_eq!(Position::default(), Position::Right);
    }

    #[test]
    fn test_config_value_json_shape() {
        // The untagged representation is the JS-facing wire shape.
        assert_eq!(
            serde_json::to_string(&ConfigValue::Bool(true)).unwrap(),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&ConfigValue::Number(2.5)).unwrap(),
            "2.5"
        );
        assert_eq!(
            serde_json::to_string(&text("right")).unwrap(),
            "\"right\""
        );
        let value: ConfigValue = serde_json::from_str("42").unwrap();
        assert_eq!(value, ConfigValue::Number(42.0));
    }
}
