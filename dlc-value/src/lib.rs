//! The runtime value system: an immutable, structurally-shared tree of
//! JSON-compatible values.
//!
//! Every literal the lexer recognizes — numbers, strings, `true`/`false`/
//! `null`, array and dict literals — decodes into a [`Value`]. `Value` is
//! the one concrete collaborator the front-end passes (lexer, parser,
//! annotator) actually touch; everything past literal decoding (arithmetic,
//! pattern matching at runtime, garbage collection) belongs to a separate
//! evaluator this workspace doesn't implement.
//!
//! Grounded on `original_source/json.c` (`json_decode`'s int/double/string
//! split) for literal decoding and `original_source/di_prettyprint.c` for
//! the diagnostic renderer in [`pp`]. Cloning a `Value` is O(1) — arrays and
//! dicts are `Rc`-shared — and the `*_push`/`*_set` mutators only clone the
//! underlying collection when another `Rc` is still holding it, the same
//! copy-on-write discipline `di.c`'s reference-counted `di_t` uses.

mod pp;

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub use pp::pretty_print;

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("value is not an array")]
    NotAnArray,
    #[error("value is not a dict")]
    NotADict,
    #[error("invalid JSON string literal: {0}")]
    InvalidStringLiteral(#[from] serde_json::Error),
    #[error("dict keys must be strings or numbers, found {0}")]
    InvalidDictKey(&'static str),
}

/// A dict key: this language restricts dict keys to strings and numbers
/// (spec.md §3), unlike the value type itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Str(Rc<str>),
    Int(i32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s:?}"),
            Key::Int(i) => write!(f, "{i}"),
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(Key::Str(s.clone())),
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Double(_) => Err(ValueError::InvalidDictKey("double")),
            Value::Bool(_) => Err(ValueError::InvalidDictKey("bool")),
            Value::Null => Err(ValueError::InvalidDictKey("null")),
            Value::Array(_) => Err(ValueError::InvalidDictKey("array")),
            Value::Dict(_) => Err(ValueError::InvalidDictKey("dict")),
        }
    }
}

/// A JSON-compatible runtime value.
///
/// `Array` and `Dict` payloads are reference-counted so that cloning a
/// `Value` — which happens constantly while threading literals through the
/// parser and annotator — never copies the underlying collection.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i32),
    Double(f64),
    Bool(bool),
    Null,
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Dict(Rc<IndexMap<Key, Value>>),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(elems: Vec<Value>) -> Self {
        Value::Array(Rc::new(elems))
    }

    pub fn dict(entries: IndexMap<Key, Value>) -> Self {
        Value::Dict(Rc::new(entries))
    }

    pub fn empty_array() -> Self {
        Value::Array(Rc::new(Vec::new()))
    }

    pub fn empty_dict() -> Self {
        Value::Dict(Rc::new(IndexMap::new()))
    }

    /// Decode a JSON number literal exactly as matched by the lexer's
    /// `num_re` (`-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?`).
    ///
    /// Integral literals that fit in `i32` decode to `Value::Int`; anything
    /// with a fraction, exponent, or that overflows `i32` decodes to
    /// `Value::Double`. `json.c`'s `got_int` truncates overflowing integers
    /// to 32 bits silently (marked `FIXME: handle overflow` there); this
    /// falls back to a double instead so no precision is silently dropped.
    pub fn decode_json_number(literal: &str) -> Value {
        let looks_integral = !literal.contains(['.', 'e', 'E']);
        if looks_integral {
            if let Ok(i) = literal.parse::<i32>() {
                return Value::Int(i);
            }
        }
        let d: f64 = literal.parse().expect("lexer only passes well-formed number literals");
        Value::Double(d)
    }

    /// Decode a JSON string literal, including its surrounding quotes, with
    /// standard JSON escape handling (`\"`, `\\`, `\/`, `\b`, `\f`, `\n`,
    /// `\r`, `\t`, `\uXXXX`).
    pub fn decode_json_string(literal: &str) -> Result<Value, ValueError> {
        let decoded: String = serde_json::from_str(literal)?;
        Ok(Value::str(decoded))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Append to an array value, cloning the backing `Vec` only if another
    /// `Value` still shares it.
    pub fn array_push(&mut self, elem: Value) -> Result<(), ValueError> {
        match self {
            Value::Array(rc) => {
                Rc::make_mut(rc).push(elem);
                Ok(())
            }
            _ => Err(ValueError::NotAnArray),
        }
    }

    /// Insert into a dict value, cloning the backing `IndexMap` only if
    /// another `Value` still shares it.
    pub fn dict_set(&mut self, key: Key, value: Value) -> Result<(), ValueError> {
        match self {
            Value::Dict(rc) => {
                Rc::make_mut(rc).insert(key, value);
                Ok(())
            }
            _ => Err(ValueError::NotADict),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_integer() {
        assert_eq!(Value::decode_json_number("42"), Value::Int(42));
        assert_eq!(Value::decode_json_number("-7"), Value::Int(-7));
    }

    #[test]
    fn decodes_fraction_and_exponent_as_double() {
        assert_eq!(Value::decode_json_number("3.14"), Value::Double(3.14));
        assert_eq!(Value::decode_json_number("1e10"), Value::Double(1e10));
    }

    #[test]
    fn decodes_overflowing_integer_as_double_rather_than_truncating() {
        let v = Value::decode_json_number("99999999999999999999");
        assert!(matches!(v, Value::Double(_)));
    }

    #[test]
    fn decodes_string_literal_with_escapes() {
        let v = Value::decode_json_string(r#""line one\nline two""#).unwrap();
        assert_eq!(v, Value::str("line one\nline two"));
    }

    #[test]
    fn array_push_clones_only_when_shared() {
        let mut a = Value::array(vec![Value::Int(1)]);
        let b = a.clone();
        a.array_push(Value::Int(2)).unwrap();
        assert_eq!(a, Value::array(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(b, Value::array(vec![Value::Int(1)]));
    }

    #[test]
    fn dict_set_on_non_dict_errors() {
        let mut v = Value::Int(1);
        assert!(v.dict_set(Key::Int(0), Value::Null).is_err());
    }

    #[test]
    fn dict_key_conversion_rejects_non_string_non_int_values() {
        assert!(Key::try_from(&Value::Bool(true)).is_err());
        assert!(Key::try_from(&Value::str("k")).is_ok());
        assert!(Key::try_from(&Value::Int(3)).is_ok());
    }

    #[quickcheck_macros::quickcheck]
    fn integer_round_trips_through_decode(n: i32) -> bool {
        Value::decode_json_number(&n.to_string()) == Value::Int(n)
    }
}
