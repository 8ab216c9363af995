//! Lua → native conversion
//!
//! Scalars map one to one. Tables are ambiguous: Lua has a single composite
//! type, so each table is classified on read. A table is a sequence when its
//! keys are exactly the integers `1..=n`; anything else (a gap, a string key,
//! a zero or negative index, a fractional number) makes it a mapping whose
//! keys are rendered as text. The empty table is the empty sequence.
//!
//! Classification looks at the whole key set, so it does not depend on the
//! order in which the runtime yields entries.

use crate::config::ConvertConfig;
use crate::convert::Converter;
use crate::error::ConvertResult;
use crate::value::{format_number, NativeValue, Opaque};
use mlua::{Table, Value};
use std::collections::{HashMap, HashSet};
use std::ffi::c_void;
use tracing::{debug, trace, warn};

/// Largest float that still names an exact integer position
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

/// Decode a Lua value into a native value using the default configuration
///
/// # Examples
///
/// ```
/// use lua_marshal::{decode, NativeValue};
/// use mlua::Lua;
///
/// let lua = Lua::new();
/// let value = lua.load("{ 'developer', 'golang' }").eval().unwrap();
///
/// assert_eq!(
///     decode(&value).unwrap(),
///     NativeValue::from(vec!["developer", "golang"])
/// );
/// ```
pub fn decode(value: &Value) -> ConvertResult<NativeValue> {
    Converter::default().decode(value)
}

/// Decode a table, choosing between sequence and mapping
pub fn table_to_native(table: &Table) -> ConvertResult<NativeValue> {
    Converter::default().decode_table(table)
}

/// Textual rendering of a Lua value, in the shape `tostring` produces
/// for values without a `__tostring` metamethod
pub fn render(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.to_string_lossy().into(),
        Value::Error(err) => err.to_string(),
        other => format!("{}: {:p}", other.type_name(), other.to_pointer()),
    }
}

/// Recursive walker tracking the tables on the current descent path
pub(crate) struct Decoder<'a> {
    config: &'a ConvertConfig,
    path: HashSet<*const c_void>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(config: &'a ConvertConfig) -> Self {
        Self {
            config,
            path: HashSet::new(),
        }
    }

    pub(crate) fn decode_value(
        &mut self,
        value: &Value,
        depth: usize,
    ) -> ConvertResult<NativeValue> {
        match value {
            Value::Nil => Ok(NativeValue::Null),
            Value::Boolean(b) => Ok(NativeValue::Bool(*b)),
            Value::Integer(i) => Ok(NativeValue::Number(*i as f64)),
            Value::Number(n) => Ok(NativeValue::Number(*n)),
            Value::String(s) => Ok(NativeValue::String(s.to_string_lossy().into())),
            Value::Table(table) => self.decode_table(table, depth),
            other => {
                let text = render(other);
                debug!(
                    kind = other.type_name(),
                    rendering = %text,
                    "decoding runtime value as opaque"
                );
                Ok(NativeValue::Opaque(Opaque::from_rendering(text)))
            }
        }
    }

    pub(crate) fn decode_table(
        &mut self,
        table: &Table,
        depth: usize,
    ) -> ConvertResult<NativeValue> {
        let pointer = table.to_pointer();

        if depth >= self.config.max_depth {
            warn!(
                depth,
                max_depth = self.config.max_depth,
                "nesting limit reached during decode; rendering table as opaque"
            );
            return Ok(opaque_table(pointer));
        }

        if self.config.detect_cycles && !self.path.insert(pointer) {
            warn!(table = ?pointer, "table contains itself; rendering back-reference as opaque");
            return Ok(opaque_table(pointer));
        }

        let result = self.decode_entries(table, depth);

        if self.config.detect_cycles {
            self.path.remove(&pointer);
        }
        result
    }

    fn decode_entries(&mut self, table: &Table, depth: usize) -> ConvertResult<NativeValue> {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        table.for_each(|key: Value, value: Value| {
            entries.push((key, value));
            Ok(())
        })?;

        match sequence_positions(&entries) {
            Some(positions) => {
                trace!(entries = entries.len(), sequence = true, "classified table");
                let mut items = vec![NativeValue::Null; entries.len()];
                for ((_, value), position) in entries.iter().zip(positions) {
                    items[position - 1] = self.decode_value(value, depth + 1)?;
                }
                Ok(NativeValue::Sequence(items))
            }
            None => {
                trace!(entries = entries.len(), sequence = false, "classified table");
                let mut map = HashMap::with_capacity(entries.len());
                for (key, value) in &entries {
                    // Later entries win when two keys render alike
                    map.insert(render(key), self.decode_value(value, depth + 1)?);
                }
                Ok(NativeValue::Mapping(map))
            }
        }
    }
}

fn opaque_table(pointer: *const c_void) -> NativeValue {
    NativeValue::Opaque(Opaque::from_rendering(format!("table: {:p}", pointer)))
}

/// 1-based position named by a key, if the key is a positive integer
fn array_index(key: &Value) -> Option<usize> {
    match *key {
        Value::Integer(i) if i > 0 => usize::try_from(i).ok(),
        Value::Number(n) if n > 0.0 && n.fract() == 0.0 && n <= MAX_EXACT_INDEX => Some(n as usize),
        _ => None,
    }
}

/// Positions for every entry when the keys are exactly `1..=n`
///
/// Table keys are distinct, so `n` positive integer keys whose maximum is `n`
/// cover the run without gaps.
fn sequence_positions(entries: &[(Value, Value)]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(entries.len());
    let mut max_key = 0;
    for (key, _) in entries {
        let position = array_index(key)?;
        max_key = max_key.max(position);
        positions.push(position);
    }
    (max_key == entries.len()).then_some(positions)
}
