//! Encoder: typed record → flat record.

use binmap_core::{BinMap, BinMapError, BinRecord, Convertible, Result};
use std::any::type_name;
use tracing::debug;

/// Encode a record into a flat record.
///
/// Zero-valued fields are left out. Any unsupported value aborts the whole
/// encode; no partial flat record is returned.
pub fn encode<R: BinRecord>(record: &R) -> Result<BinMap> {
    let bins = record.to_bins()?;
    debug!(
        record = type_name::<R>(),
        fields = R::FIELDS.len(),
        bins = bins.len(),
        "encoded record"
    );
    Ok(bins)
}

/// Encode any convertible value, checking at runtime that it is a record.
///
/// `None` is a null reference and fails, as does a value that is not a
/// struct. One level of `Option` around a record is looked through. `()` is
/// the empty input and encodes to an empty flat record.
pub fn encode_root<T: Convertible>(value: Option<&T>) -> Result<BinMap> {
    let Some(value) = value else {
        return Err(BinMapError::input_shape("null reference"));
    };
    let bins = value.to_bins()?;
    debug!(
        value = type_name::<T>(),
        bins = bins.len(),
        "encoded record"
    );
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinValue;
    use binmap_core::ErrorKind;

    #[derive(crate::BinRecord, Debug, Default)]
    struct Flags {
        #[bin("on")]
        on: bool,
        #[bin(name = "")]
        ignored_empty_tag: bool,
        ignored: bool,
    }

    #[test]
    fn test_encode_skips_untagged_and_empty_tags() {
        let flags = Flags {
            on: true,
            ignored_empty_tag: true,
            ignored: true,
        };
        let bins = encode(&flags).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins.get("on"), Some(&BinValue::Bool(true)));
    }

    #[test]
    fn test_encode_root_rejects_null() {
        let err = encode_root::<Flags>(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn test_encode_root_rejects_non_struct() {
        let err = encode_root(Some(&42i32)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
        let err = encode_root(Some(&vec![1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn test_encode_root_looks_through_option() {
        let flags = Some(Flags {
            on: true,
            ..Flags::default()
        });
        assert_eq!(encode_root(Some(&flags)).unwrap().len(), 1);

        let err = encode_root(Some(&None::<Flags>)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn test_encode_root_unit_is_empty() {
        assert!(encode_root(Some(&())).unwrap().is_empty());
    }
}
