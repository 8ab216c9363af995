//! serde_json interop
//!
//! Hosts often hold dynamic data as `serde_json::Value`. These conversions
//! let that data cross into Lua without an intermediate hand-written walk.

use crate::value::NativeValue;
use serde_json::{Map, Number};

/// Integers up to 2^53 are exact in f64 and are written back as JSON integers
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl From<serde_json::Value> for NativeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => NativeValue::Null,
            serde_json::Value::Bool(b) => NativeValue::Bool(b),
            // JSON numbers are always floats on the native side
            serde_json::Value::Number(n) => NativeValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => NativeValue::String(s),
            serde_json::Value::Array(items) => {
                NativeValue::Sequence(items.into_iter().map(NativeValue::from).collect())
            }
            serde_json::Value::Object(obj) => NativeValue::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (k, NativeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<NativeValue> for serde_json::Value {
    fn from(value: NativeValue) -> Self {
        match value {
            NativeValue::Null => serde_json::Value::Null,
            NativeValue::Bool(b) => serde_json::Value::Bool(b),
            NativeValue::Number(n) => number_to_json(n),
            NativeValue::String(s) => serde_json::Value::String(s),
            NativeValue::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            NativeValue::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect::<Map<String, serde_json::Value>>(),
            ),
            NativeValue::Opaque(opaque) => serde_json::Value::String(opaque.render()),
        }
    }
}

/// NaN and infinities have no JSON form and become `null`
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
