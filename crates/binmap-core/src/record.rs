//! Tagged records and the per-field traversal shared by encode and decode.
//!
//! `#[derive(BinRecord)]` implements [`BinRecord`] and [`Convertible`] for a
//! struct by calling into the helpers below once per tagged field, in
//! declaration order. Hand-written impls can use the same helpers.

use crate::convert::Convertible;
use crate::error::{BinMapError, Result};
use crate::shape::Shape;
use crate::values::{BinMap, BinValue, BinValueMap};
use tracing::trace;

/// Compile-time description of one tagged field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name
    pub name: &'static str,
    /// Bin name the field is stored under
    pub tag: &'static str,
    /// Declared type as written in the struct
    pub type_name: &'static str,
    pub shape: Shape,
}

/// A struct whose tagged fields map onto bins.
pub trait BinRecord: Convertible + Default {
    /// Tagged fields in declaration order. Untagged fields are not listed.
    const FIELDS: &'static [FieldDescriptor];

    /// Encode every non-zero tagged field into `out`.
    fn encode_fields(&self, out: &mut dyn BinSink) -> Result<()>;

    /// Merge every tagged field present in `source` into `self`.
    fn decode_fields(&mut self, source: &dyn BinSource) -> Result<()>;
}

/// Somewhere a record's bins can be read from.
pub trait BinSource {
    fn bin(&self, tag: &str) -> Option<&BinValue>;
}

/// Somewhere a record's bins can be written to.
pub trait BinSink {
    fn put(&mut self, tag: &str, value: BinValue);
}

impl BinSource for BinMap {
    fn bin(&self, tag: &str) -> Option<&BinValue> {
        self.get(tag)
    }
}

impl BinSource for BinValueMap {
    fn bin(&self, tag: &str) -> Option<&BinValue> {
        self.iter()
            .find(|(key, _)| key.as_str() == Some(tag))
            .map(|(_, value)| value)
    }
}

impl BinSink for BinMap {
    fn put(&mut self, tag: &str, value: BinValue) {
        self.insert(tag.to_string(), value);
    }
}

impl BinSink for BinValueMap {
    fn put(&mut self, tag: &str, value: BinValue) {
        self.insert(BinValue::Str(tag.to_string()), value);
    }
}

/// Encode one field unless it holds its zero value.
pub fn encode_field<T: Convertible>(
    out: &mut dyn BinSink,
    name: &str,
    tag: &str,
    value: &T,
) -> Result<()> {
    if value.is_default() {
        trace!(field = name, tag, "skipping zero-valued field");
        return Ok(());
    }
    let bin = value.to_bin().map_err(|e| e.in_field(name))?;
    trace!(field = name, tag, kind = bin.kind_name(), "encoded field");
    out.put(tag, bin);
    Ok(())
}

/// Merge one field from `source`. Absent and nil bins leave the field as is.
pub fn decode_field<T: Convertible>(
    source: &dyn BinSource,
    name: &str,
    tag: &str,
    value: &mut T,
) -> Result<()> {
    let Some(bin) = source.bin(tag) else {
        trace!(field = name, tag, "bin absent, field untouched");
        return Ok(());
    };
    if bin.is_nil() {
        trace!(field = name, tag, "bin is nil, field untouched");
        return Ok(());
    }
    value.merge_bin(bin).map_err(|e| e.in_field(name))?;
    trace!(field = name, tag, kind = bin.kind_name(), "decoded field");
    Ok(())
}

/// Encode a record as a nested map value.
pub fn record_to_bin<R: BinRecord>(record: &R) -> Result<BinValue> {
    let mut out = BinValueMap::new();
    record.encode_fields(&mut out)?;
    Ok(BinValue::Map(out))
}

/// Merge a nested map value into a record.
pub fn record_merge_bin<R: BinRecord>(record: &mut R, value: &BinValue) -> Result<()> {
    let map = value
        .as_map()
        .ok_or_else(|| BinMapError::shape_mismatch("map", value.kind_name()))?;
    record.decode_fields(map)
}

/// Build a fresh record from a nested map value.
pub fn record_from_bin<R: BinRecord>(value: &BinValue) -> Result<R> {
    let mut record = R::default();
    record_merge_bin(&mut record, value)?;
    Ok(record)
}

/// Encode a record as a top-level flat record.
pub fn record_to_bins<R: BinRecord>(record: &R) -> Result<BinMap> {
    let mut out = BinMap::with_capacity(R::FIELDS.len());
    record.encode_fields(&mut out)?;
    Ok(out)
}

/// Merge a top-level flat record into a record.
pub fn record_merge_bins<R: BinRecord>(record: &mut R, bins: &BinMap) -> Result<()> {
    record.decode_fields(bins)
}
