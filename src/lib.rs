//! binmap
//!
//! Converts tagged Rust structs to and from flat, dynamically-typed bin maps,
//! the record shape schemaless key/value stores expect.
//!
//! # Overview
//!
//! - [`encode`] walks a record and emits a [`BinMap`], omitting zero-valued fields
//! - [`decode`] merges a [`BinMap`] into an existing record
//! - `#[derive(BinRecord)]` selects the participating fields with `#[bin(...)]` tags
//!
//! Integers of every width are stored as `i64` and floats as `f64`; narrowing on
//! decode wraps silently. `DateTime<Utc>` is stored as epoch seconds and
//! durations as nanoseconds.
//!
//! # Example
//!
//! ```rust
//! use binmap::{decode, encode, BinRecord, BinValue};
//! use std::collections::HashMap;
//!
//! #[derive(BinRecord, Debug, Default, PartialEq)]
//! struct Account {
//!     #[bin(name = "id")]
//!     id: u64,
//!     #[bin("owner")]
//!     owner: String,
//!     #[bin("limits")]
//!     limits: HashMap<String, i64>,
//!     // not stored
//!     cached_balance: i64,
//! }
//!
//! let account = Account {
//!     id: 7,
//!     owner: "ada".to_string(),
//!     cached_balance: 100,
//!     ..Default::default()
//! };
//!
//! let bins = encode(&account).unwrap();
//! assert_eq!(bins.get("id"), Some(&BinValue::Int(7)));
//! assert!(!bins.contains_key("limits"));
//!
//! let mut decoded = Account::default();
//! decode(Some(&bins), &mut decoded).unwrap();
//! assert_eq!(decoded.owner, "ada");
//! assert_eq!(decoded.cached_balance, 0);
//! ```

// Lets the derive's `::binmap::` paths resolve inside this crate's own tests.
extern crate self as binmap;

pub mod decode;
pub mod encode;

pub use binmap_core::{coerce, json, record};
pub use binmap_core::{
    BinMap, BinMapError, BinRecord, BinSink, BinSource, BinValue, BinValueMap, Convertible,
    ErrorKind, FieldDescriptor, MapKey, Result, ScalarKind, Shape,
};
pub use binmap_derive::BinRecord;

pub use decode::{decode, decode_root};
pub use encode::{encode, encode_root};

/// Bin names of `R`'s tagged fields, in declaration order.
pub fn tags<R: BinRecord>() -> Vec<&'static str> {
    R::FIELDS.iter().map(|field| field.tag).collect()
}
