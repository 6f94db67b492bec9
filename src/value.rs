use std::{
    collections::BTreeMap,
    fmt::{self, Display, Write},
};

use num_bigint::BigInt;

use crate::number::Decimal;

pub type Map = BTreeMap<String, Value>;

/// One parsed JSON value.
///
/// Numbers keep every digit they were written with: integers as [`BigInt`],
/// numbers with a decimal point as [`Decimal`]. Strings hold the raw text
/// found between the quotes unless escape decoding was requested.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
    Integer(BigInt),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
    Object(Map),
    Array(Vec<Value>),
    Null,
}

impl Value {
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    pub fn decimal(value: Decimal) -> Self {
        Self::Decimal(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    pub fn object(entries: Map) -> Self {
        Self::Object(entries)
    }

    pub fn array(items: Vec<Value>) -> Self {
        Self::Array(items)
    }

    pub fn null() -> Self {
        Self::Null
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(num) => Some(num),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Self::Decimal(num) => Some(num),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(str) => Some(str),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(bool) => Some(*bool),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Member of an object. `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Element of an array. `None` when out of range or not an array.
    pub fn index(&self, i: usize) -> Option<&Value> {
        self.as_array().and_then(|array| array.get(i))
    }

    pub fn unwrap_null(&self) {
        match self {
            Self::Null => (),
            _ => panic!("Try to get null, but value is not null: {}", self),
        }
    }

    pub fn unwrap_integer(&self) -> &BigInt {
        self.as_integer()
            .unwrap_or_else(|| panic!("Try to get integer, but value is not an integer: {}", self))
    }

    pub fn unwrap_decimal(&self) -> &Decimal {
        self.as_decimal()
            .unwrap_or_else(|| panic!("Try to get decimal, but value is not a decimal: {}", self))
    }

    pub fn unwrap_text(&self) -> &str {
        self.as_text()
            .unwrap_or_else(|| panic!("Try to get text, but value is not a text: {}", self))
    }

    pub fn unwrap_bool(&self) -> bool {
        self.as_bool()
            .unwrap_or_else(|| panic!("Try to get bool, but value is not a bool: {}", self))
    }

    pub fn unwrap_object(&self) -> &Map {
        self.as_object()
            .unwrap_or_else(|| panic!("Try to get object, but value is not an object: {}", self))
    }

    pub fn unwrap_array(&self) -> &[Value] {
        self.as_array()
            .unwrap_or_else(|| panic!("Try to get array, but value is not an array: {}", self))
    }

    /// Renders the value as JSON-like text.
    ///
    /// Text is written between quotes exactly as stored, and decimals always
    /// use fixed notation. Object members come out in key order, separated
    /// by `", "`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render_to(&mut out);
        out
    }

    pub fn render_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(out, "{}", num),
            Self::Decimal(num) => write!(out, "{}", num),
            Self::Text(str) => write!(out, "\"{}\"", str),
            Self::Boolean(bool) => write!(out, "{}", bool),
            Self::Null => out.write_str("null"),
            Self::Object(obj) => {
                out.write_char('{')?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    write!(out, "\"{}\": ", key)?;
                    value.render_to(out)?;
                }
                out.write_char('}')
            }
            Self::Array(array) => {
                out.write_char('[')?;
                for (i, value) in array.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    value.render_to(out)?;
                }
                out.write_char(']')
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_to(f)
    }
}

/// Location in the source text.
///
/// `offset` counts bytes from the start of the document, `line` and `col`
/// start at 1 and `col` counts characters.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}
