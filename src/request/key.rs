//! Cache key derivation for read requests.

use serde::Serialize;
use serde_json::{Map, Value};

// == Cache Key ==
/// Derives the cache key for a read of `endpoint` with `params`.
///
/// Parameter objects are canonicalized before folding them into the key:
/// names are sorted at every nesting level and `null` fields are dropped, so
/// two calls with the same logical parameters always collide on one key.
/// No parameters (unit, `null` or an empty object) yields the bare endpoint.
pub fn cache_key<P: Serialize + ?Sized>(endpoint: &str, params: &P) -> String {
    let canonical = serde_json::to_value(params)
        .map(canonicalize)
        .unwrap_or(Value::Null);

    match canonical {
        Value::Null => endpoint.to_string(),
        Value::Object(ref map) if map.is_empty() => endpoint.to_string(),
        other => format!("{}_{}", endpoint, other),
    }
}

/// Sorts object fields and strips nulls recursively.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::new();
            for (k, v) in fields {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Flattens top-level parameters into query string pairs, skipping nulls.
pub(crate) fn query_pairs<P: Serialize + ?Sized>(params: &P) -> serde_json::Result<Vec<(String, String)>> {
    let pairs = match canonicalize(serde_json::to_value(params)?) {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(pairs)
}
