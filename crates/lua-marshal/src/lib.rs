//! lua-marshal - value conversion at the Lua boundary
//!
//! Converts host dynamic values to and from Lua values:
//! - `encode`: `NativeValue` → `mlua::Value`, allocating tables as needed
//! - `decode`: `mlua::Value` → `NativeValue`, deciding for each table whether
//!   it is a sequence (keys exactly `1..=n`) or a mapping
//!
//! Neither direction fails on type grounds. Values with no dedicated rule
//! (host types without a variant, Lua functions, userdata, threads) degrade
//! to their textual rendering.
//!
//! # Example
//!
//! ```
//! use lua_marshal::{decode, encode, NativeValue};
//! use mlua::Lua;
//! use std::collections::HashMap;
//!
//! let lua = Lua::new();
//!
//! let mut user = HashMap::new();
//! user.insert("name".to_string(), NativeValue::from("John"));
//! user.insert("age".to_string(), NativeValue::from(30));
//! user.insert("tags".to_string(), NativeValue::from(vec!["developer", "golang"]));
//!
//! let table = encode(&lua, &NativeValue::mapping(user)).unwrap();
//! let back = decode(&table).unwrap();
//!
//! assert_eq!(back.get("age"), Some(&NativeValue::Number(30.0)));
//! assert_eq!(back.get("tags").and_then(|t| t.len()), Some(2));
//! ```

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod value;

pub use config::{ConvertConfig, DEFAULT_MAX_DEPTH};
pub use convert::Converter;
pub use decode::{decode, render, table_to_native};
pub use encode::encode;
pub use error::{ConfigError, ConfigResult, ConvertError, ConvertResult};
pub use value::{NativeValue, Opaque};

// Re-export mlua for downstream crates
pub use mlua;
