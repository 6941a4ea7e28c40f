//! Diagnostic (not bit-exact) pretty-printing of [`Value`]s.
//!
//! Used by the CLI's `parse` command to render literal values embedded in
//! the AST dump. `original_source/di_prettyprint.c` re-encodes literals back
//! to JSON text via `json_encode`; this does the equivalent with `serde_json`
//! rather than hand-rolling escaping.

use crate::{Key, Value};
use std::fmt::Write as _;

pub fn pretty_print(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Double(d) => {
            let _ = write!(out, "{d}");
        }
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Null => out.push_str("null"),
        Value::Str(s) => {
            let encoded = serde_json::to_string(s.as_ref()).unwrap_or_else(|_| format!("{s:?}"));
            out.push_str(&encoded);
        }
        Value::Array(elems) => {
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, elem);
            }
            out.push(']');
        }
        Value::Dict(entries) => {
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(out, key);
                out.push_str(": ");
                write_value(out, val);
            }
            out.push('}');
        }
    }
}

fn write_key(out: &mut String, key: &Key) {
    match key {
        Key::Str(s) => {
            let encoded = serde_json::to_string(s.as_ref()).unwrap_or_else(|_| format!("{s:?}"));
            out.push_str(&encoded);
        }
        Key::Int(i) => {
            let _ = write!(out, "{i}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn prints_scalars() {
        assert_eq!(pretty_print(&Value::Int(3)), "3");
        assert_eq!(pretty_print(&Value::Bool(false)), "false");
        assert_eq!(pretty_print(&Value::Null), "null");
    }

    #[test]
    fn prints_string_with_quotes_and_escapes() {
        assert_eq!(pretty_print(&Value::str("a\nb")), "\"a\\nb\"");
    }

    #[test]
    fn prints_array_and_dict() {
        let arr = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(pretty_print(&arr), "[1, 2]");

        let mut map = IndexMap::new();
        map.insert(Key::Str("x".into()), Value::Int(1));
        let dict = Value::dict(map);
        assert_eq!(pretty_print(&dict), "{\"x\": 1}");
    }
}
