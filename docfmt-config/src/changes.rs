//! Unsaved-change detection

use serde_json::{Map, Number, Value};
use docfmt_core::CanonicalConfig;
use docfmt_units::{parse_points, round_to, UnitEngine};

use crate::converter::ConfigConverter;
use crate::form::FormModel;
use crate::strategy::DisplayUnitStrategy;

/// Keys whose values are point strings
const POINT_KEYS: [&str; 9] = [
    "top",
    "bottom",
    "left",
    "right",
    "font_size",
    "line_spacing",
    "space_before",
    "space_after",
    "first_line_indent",
];

/// Points are compared at this precision
const COMPARE_DECIMALS: i32 = 2;

/// Structural form of a config used for comparison.
///
/// Decode defaults are filled in, so an absent field and its default compare
/// equal. Point strings become numbers rounded to two decimals. Map keys are
/// ordered.
pub fn normalize(config: &CanonicalConfig) -> Value {
    let engine = UnitEngine::new();
    let converter = ConfigConverter::new(&engine);
    let complete = converter.encode(&converter.decode(config));
    // Plain string-keyed structs always serialize
    let mut value = serde_json::to_value(&complete).unwrap_or_default();
    round_points(&mut value);
    value
}

fn round_points(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if POINT_KEYS.contains(&key.as_str()) {
                    if let Some(points) = child.as_str().and_then(parse_points) {
                        if let Some(n) = Number::from_f64(round_to(points, COMPARE_DECIMALS)) {
                            *child = Value::Number(n);
                        }
                        continue;
                    }
                }
                round_points(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(round_points),
        _ => {}
    }
}

/// Remembers the last saved config and compares the live form against it
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    original: Value,
}

impl ChangeDetector {
    pub fn new(original: &CanonicalConfig) -> Self {
        ChangeDetector { original: normalize(original) }
    }

    /// Replace the baseline, typically after a successful save
    pub fn rebase(&mut self, saved: &CanonicalConfig) {
        self.original = normalize(saved);
    }

    pub fn has_changes<S: DisplayUnitStrategy>(
        &self,
        form: &FormModel,
        converter: &ConfigConverter<'_, S>,
    ) -> bool {
        normalize(&converter.encode(form)) != self.original
    }

    /// Dotted paths of every leaf that differs from the baseline
    pub fn changed_fields<S: DisplayUnitStrategy>(
        &self,
        form: &FormModel,
        converter: &ConfigConverter<'_, S>,
    ) -> Vec<String> {
        let current = normalize(&converter.encode(form));
        let mut paths = Vec::new();
        diff("", &self.original, &current, &mut paths);
        paths
    }
}

fn diff(path: &str, a: &Value, b: &Value, out: &mut Vec<String>) {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => {
            let empty = Map::new();
            let mut keys: Vec<&String> = left.keys().chain(right.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child = if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
                match (left.get(key), right.get(key)) {
                    (Some(x), Some(y)) => diff(&child, x, y, out),
                    (Some(x), None) => diff(&child, x, &Value::Object(empty.clone()), out),
                    (None, Some(y)) => diff(&child, &Value::Object(empty.clone()), y, out),
                    (None, None) => {}
                }
            }
        }
        _ if a != b => out.push(path.to_string()),
        _ => {}
    }
}
