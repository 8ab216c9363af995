//! Script boundary example
//!
//! Passes a host record into a Lua function and reads the structured
//! result back.
//!
//! Run with: cargo run --example script_boundary -p lua-marshal

use lua_marshal::{decode, encode, NativeValue};
use mlua::{Function, Lua};
use std::collections::HashMap;

#[derive(Debug)]
#[allow(dead_code)]
struct RequestId(u64);

fn main() -> mlua::Result<()> {
    let lua = Lua::new();

    let summarize: Function = lua
        .load(
            r#"
            function(user)
                local upper = {}
                for i, tag in ipairs(user.tags) do
                    upper[i] = string.upper(tag)
                end
                return {
                    greeting = "hello " .. user.name,
                    tags = upper,
                    request = user.request,
                }
            end
            "#,
        )
        .eval()?;

    let mut user = HashMap::new();
    user.insert("name".to_string(), NativeValue::from("John"));
    user.insert("age".to_string(), NativeValue::from(30));
    user.insert("tags".to_string(), NativeValue::from(vec!["developer", "golang"]));
    user.insert("request".to_string(), NativeValue::opaque(RequestId(7)));

    let input = encode(&lua, &NativeValue::mapping(user))?;
    let result: mlua::Value = summarize.call(input)?;
    let output = decode(&result)?;

    println!("Lua -> Rust:");
    println!("  {}", output);
    Ok(())
}
