//! Shared test utilities
//!
//! Helpers for building Lua tables with explicit key sets and for
//! evaluating small Lua snippets into values.

#![allow(dead_code)]

use lua_marshal::NativeValue;
use mlua::{IntoLua, Lua, Table, Value};
use std::collections::HashMap;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (`RUST_LOG` filters it)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Fresh runtime with test logging enabled
pub fn lua() -> Lua {
    init_tracing();
    Lua::new()
}

/// Evaluate a Lua expression or chunk into a value
///
/// # Example
/// ```
/// let value = eval(&lua, "{ 1, 2, 3 }");
/// ```
pub fn eval(lua: &Lua, source: &str) -> Value {
    lua.load(source)
        .eval()
        .unwrap_or_else(|e| panic!("Lua evaluation failed for {:?}: {}", source, e))
}

/// Build a table by raw-setting entries in the given order
pub fn table_with<K, V>(lua: &Lua, entries: Vec<(K, V)>) -> Table
where
    K: IntoLua,
    V: IntoLua,
{
    let table = lua.create_table().unwrap();
    for (key, value) in entries {
        table.raw_set(key, value).unwrap();
    }
    table
}

/// Collect the keys a table holds, rendered as text and sorted
pub fn sorted_keys(table: &Table) -> Vec<String> {
    let mut keys = Vec::new();
    table
        .for_each(|key: Value, _: Value| {
            keys.push(lua_marshal::render(&key));
            Ok(())
        })
        .unwrap();
    keys.sort();
    keys
}

/// Build a mapping from string/value pairs
pub fn mapping<const N: usize>(entries: [(&str, NativeValue); N]) -> NativeValue {
    NativeValue::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>(),
    )
}

/// Keys of a decoded mapping, sorted; panics if the value is not a mapping
pub fn mapping_keys(value: &NativeValue) -> Vec<String> {
    let map = value
        .as_mapping()
        .unwrap_or_else(|| panic!("Expected Mapping, got {:?}", value));
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}
