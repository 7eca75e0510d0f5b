//! Core types for binmap.
//!
//! This crate provides the foundational pieces used by the `binmap` encoder
//! and decoder:
//!
//! - [`BinValue`] / [`BinMap`] - the dynamically-typed flat record
//! - [`Convertible`] - type-directed conversion of a single value
//! - [`BinRecord`] - a struct whose tagged fields map onto bins
//! - [`coerce`] - named scalar conversions between widths
//! - [`BinMapError`] - the error taxonomy
//!
//! # Architecture
//!
//! ```text
//! binmap-core (this crate)
//!    │
//!    ├─── binmap-derive   (#[derive(BinRecord)] expands to calls into `record`)
//!    │
//!    └─── binmap          (encode / decode entrypoints)
//! ```
//!
//! # Example
//!
//! ```rust
//! use binmap_core::{BinValue, Convertible};
//!
//! let value = 300u16.to_bin().unwrap();
//! assert_eq!(value, BinValue::Int(300));
//!
//! // Narrowing wraps instead of failing.
//! assert_eq!(u8::from_bin(&value).unwrap(), 44);
//! ```

pub mod coerce;
pub mod convert;
pub mod error;
pub mod json;
pub mod record;
pub mod shape;
pub mod time;
pub mod values;

pub use convert::{Convertible, MapKey};
pub use error::{BinMapError, ErrorKind, Result};
pub use record::{BinRecord, BinSink, BinSource, FieldDescriptor};
pub use shape::{ScalarKind, Shape};
pub use values::{BinMap, BinValue, BinValueMap};
