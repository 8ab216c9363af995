//! Conversion entry points and mlua trait integration
//!
//! `Converter` carries a `ConvertConfig` and exposes both directions:
//! - `encode` - `NativeValue` → `mlua::Value` (needs the `Lua` handle)
//! - `decode` - `mlua::Value` → `NativeValue`
//!
//! `NativeValue` also implements `IntoLua` and `FromLua`, so it can be used
//! anywhere mlua accepts arguments or returns results.
//!
//! # Examples
//!
//! ```
//! use lua_marshal::NativeValue;
//! use mlua::{Function, Lua};
//! use std::collections::HashMap;
//!
//! let lua = Lua::new();
//! let count: Function = lua.load("function(t) return #t.items end").eval().unwrap();
//!
//! let mut args = HashMap::new();
//! args.insert("items".to_string(), NativeValue::from(vec![1, 2, 3]));
//!
//! let result: NativeValue = count.call(NativeValue::mapping(args)).unwrap();
//! assert_eq!(result, NativeValue::Number(3.0));
//! ```

use crate::config::ConvertConfig;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{ConfigResult, ConvertResult};
use crate::value::NativeValue;
use mlua::{FromLua, IntoLua, Lua, Table, Value};

/// Bidirectional converter configured with nesting limits
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the configuration fails
    /// [`ConvertConfig::validate`], e.g. a `max_depth` of zero.
    pub fn new(config: ConvertConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert a native value into a freshly allocated Lua value
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Lua` only if the runtime fails to allocate.
    pub fn encode(&self, lua: &Lua, value: &NativeValue) -> ConvertResult<Value> {
        Encoder::new(lua, &self.config).encode_value(value, 0)
    }

    /// Convert a Lua value into a native value
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Lua` only if the runtime fails while iterating a table.
    pub fn decode(&self, value: &Value) -> ConvertResult<NativeValue> {
        Decoder::new(&self.config).decode_value(value, 0)
    }

    /// Convert a Lua table into a sequence or a mapping
    pub fn decode_table(&self, table: &Table) -> ConvertResult<NativeValue> {
        Decoder::new(&self.config).decode_table(table, 0)
    }
}

impl IntoLua for NativeValue {
    fn into_lua(self, lua: &Lua) -> mlua::Result<Value> {
        Ok(Converter::default().encode(lua, &self)?)
    }
}

impl FromLua for NativeValue {
    fn from_lua(value: Value, _lua: &Lua) -> mlua::Result<Self> {
        Ok(Converter::default().decode(&value)?)
    }
}
