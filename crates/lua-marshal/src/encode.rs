//! Native → Lua conversion
//!
//! Every `NativeValue` variant maps to exactly one Lua value:
//! - `Null` → `nil`, `Bool` → boolean, `Number` → float, `String` → string
//! - `Mapping` → fresh table keyed by the mapping's strings
//! - `Sequence` → fresh table with element `i` stored at key `i + 1`
//! - `Opaque` → string holding the value's rendering
//!
//! The only failures are allocation errors raised by the runtime.

use crate::config::ConvertConfig;
use crate::convert::Converter;
use crate::error::ConvertResult;
use crate::value::NativeValue;
use mlua::{Lua, Value};
use tracing::{debug, warn};

/// Encode a native value into a Lua value using the default configuration
///
/// # Examples
///
/// ```
/// use lua_marshal::{encode, NativeValue};
/// use mlua::{Lua, Value};
///
/// let lua = Lua::new();
/// let value = encode(&lua, &NativeValue::from(vec!["a", "b"])).unwrap();
///
/// let Value::Table(table) = value else { panic!("expected a table") };
/// assert_eq!(table.raw_get::<String>(1).unwrap(), "a");
/// assert_eq!(table.raw_len(), 2);
/// ```
pub fn encode(lua: &Lua, value: &NativeValue) -> ConvertResult<Value> {
    Converter::default().encode(lua, value)
}

/// Recursive walker holding the runtime handle for allocations
pub(crate) struct Encoder<'a> {
    lua: &'a Lua,
    config: &'a ConvertConfig,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(lua: &'a Lua, config: &'a ConvertConfig) -> Self {
        Self { lua, config }
    }

    pub(crate) fn encode_value(&self, value: &NativeValue, depth: usize) -> ConvertResult<Value> {
        match value {
            NativeValue::Null => Ok(Value::Nil),
            NativeValue::Bool(b) => Ok(Value::Boolean(*b)),
            NativeValue::Number(n) => Ok(Value::Number(*n)),
            NativeValue::String(s) => Ok(Value::String(self.lua.create_string(s)?)),
            NativeValue::Mapping(map) => {
                if depth >= self.config.max_depth {
                    return self.flatten(value, depth);
                }
                let table = self.lua.create_table()?;
                for (key, item) in map {
                    table.raw_set(key.as_str(), self.encode_value(item, depth + 1)?)?;
                }
                Ok(Value::Table(table))
            }
            NativeValue::Sequence(items) => {
                if depth >= self.config.max_depth {
                    return self.flatten(value, depth);
                }
                let table = self.lua.create_table()?;
                for (index, item) in items.iter().enumerate() {
                    // Lua sequences are 1-based
                    table.raw_set(index + 1, self.encode_value(item, depth + 1)?)?;
                }
                Ok(Value::Table(table))
            }
            NativeValue::Opaque(opaque) => {
                let text = opaque.render();
                debug!(rendering = %text, "encoding opaque host value as string");
                Ok(Value::String(self.lua.create_string(&text)?))
            }
        }
    }

    /// Render a composite past the depth limit as a Lua string
    fn flatten(&self, value: &NativeValue, depth: usize) -> ConvertResult<Value> {
        warn!(
            depth,
            max_depth = self.config.max_depth,
            kind = value.type_name(),
            "nesting limit reached during encode; rendering composite as text"
        );
        Ok(Value::String(self.lua.create_string(value.to_string())?))
    }
}
