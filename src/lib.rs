#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a small JSON parser that never rounds numbers. Integers are kept as arbitrary-precision integers and numbers with a decimal point as exact decimals, so a document can be parsed and rendered back without losing a single digit.
//!
//! ## Why use it ?
//!
//! Most JSON libraries turn `123456789012345678901234567890` or `1.230000000000000000001` into a 64-bit float. When those digits matter (amounts, identifiers, measurements), this crate keeps them as written.
//!
//! ## How to use it ?
//!
//! The crate exposes a `Value` enum with one variant per JSON kind:
//!
//! ```rust
//! # use num_bigint::BigInt;
//! # use exact_json_parser::{number::Decimal, value::Map};
//! pub enum Value {
//!     Integer(BigInt),
//!     Decimal(Decimal),
//!     Text(String),
//!     Boolean(bool),
//!     Object(Map),
//!     Array(Vec<Value>),
//!     Null,
//! }
//! ```
//!
//! ### Parsing
//!
//! ```rust
//! use exact_json_parser::parse;
//!
//! let parsed = parse(r#"{"id": 123456789012345678901234567890, "price": 1.10}"#).unwrap();
//!
//! assert_eq!(parsed.get("id").unwrap().render(), "123456789012345678901234567890");
//! assert_eq!(parsed.render(), r#"{"id": 123456789012345678901234567890, "price": 1.10}"#);
//! ```
//!
//! ### Options
//!
//! The default parser is lenient. [`ParseOptions`] tightens it:
//!
//! ```rust
//! use exact_json_parser::{error::Kind, parse_with, ParseOptions};
//!
//! let options = ParseOptions::new()
//!     .strict_commas(true)
//!     .unescape_strings(true)
//!     .allow_trailing(false)
//!     .max_depth(16);
//!
//! let err = parse_with("[1, 2,]", &options).unwrap_err();
//!
//! assert_eq!(err.kind, Kind::TrailingComma);
//! assert_eq!(err.start.offset, 5);
//! ```
//!
//! ### Serializing in a struct
//!
//! `Value` implements [Serialize](https://docs.rs/serde/latest/serde/ser/trait.Serialize.html). Numbers that fit a 64-bit integer or float exactly are serialized as numbers, the others as strings holding their exact digits.
//!
//! ```rust
//! use exact_json_parser::parse;
//!
//! let parsed = parse(r#"{"small": 42, "big": 18446744073709551616}"#).unwrap();
//!
//! let json = serde_json::to_value(&parsed).unwrap();
//!
//! assert_eq!(json["small"], 42);
//! assert_eq!(json["big"], "18446744073709551616");
//! ```

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate num_bigint;
extern crate num_traits;
extern crate serde;
extern crate tracing;

mod input;
mod parser;
mod ser;

pub mod error;
pub mod number;
pub mod options;
pub mod value;

pub use error::Error;
pub use options::ParseOptions;
pub use parser::{parse, parse_with, ParseResult};
pub use value::Value;
