//! Decoder: flat record → typed record.

use binmap_core::{BinMap, BinMapError, BinRecord, Convertible, Result};
use std::any::type_name;
use tracing::debug;

/// Merge a flat record into `target`.
///
/// A `None` record is a no-op. Tags missing from the record leave their
/// fields untouched. On error, fields decoded before the failing one keep
/// their new values.
pub fn decode<R: BinRecord>(bins: Option<&BinMap>, target: &mut R) -> Result<()> {
    let Some(bins) = bins else {
        debug!(record = type_name::<R>(), "no record to decode");
        return Ok(());
    };
    target.merge_bins(bins)?;
    debug!(
        record = type_name::<R>(),
        fields = R::FIELDS.len(),
        bins = bins.len(),
        "decoded record"
    );
    Ok(())
}

/// Merge a flat record into any convertible target, checking at runtime that
/// it is a record.
///
/// A `None` record succeeds without looking at the target. A `None` target,
/// a `None` inside an `Option` target, or a target that is not a struct
/// fails.
pub fn decode_root<T: Convertible>(bins: Option<&BinMap>, target: Option<&mut T>) -> Result<()> {
    let Some(bins) = bins else {
        return Ok(());
    };
    let Some(target) = target else {
        return Err(BinMapError::input_shape("null reference"));
    };
    target.merge_bins(bins)?;
    debug!(
        target = type_name::<T>(),
        bins = bins.len(),
        "decoded record"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinValue;
    use binmap_core::ErrorKind;

    #[derive(crate::BinRecord, Debug, Default, PartialEq)]
    struct Counter {
        #[bin("count")]
        count: u32,
        #[bin("label")]
        label: String,
    }

    fn bins(entries: &[(&str, BinValue)]) -> BinMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_decode_none_is_noop() {
        let mut counter = Counter {
            count: 3,
            label: "x".to_string(),
        };
        decode(None, &mut counter).unwrap();
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn test_decode_merges() {
        let mut counter = Counter {
            count: 3,
            label: "keep".to_string(),
        };
        decode(Some(&bins(&[("count", BinValue::Int(9))])), &mut counter).unwrap();
        assert_eq!(
            counter,
            Counter {
                count: 9,
                label: "keep".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_ignores_unknown_bins() {
        let mut counter = Counter::default();
        decode(
            Some(&bins(&[("other", BinValue::from("x"))])),
            &mut counter,
        )
        .unwrap();
        assert_eq!(counter, Counter::default());
    }

    #[test]
    fn test_decode_root_none_record_skips_target_check() {
        decode_root::<i32>(None, None).unwrap();
    }

    #[test]
    fn test_decode_root_rejects_null_target() {
        let record = bins(&[("count", BinValue::Int(1))]);
        let err = decode_root::<Counter>(Some(&record), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);

        let mut missing: Option<Counter> = None;
        let err = decode_root(Some(&record), Some(&mut missing)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn test_decode_root_rejects_non_struct() {
        let record = bins(&[("count", BinValue::Int(1))]);
        let mut number = 0i64;
        let err = decode_root(Some(&record), Some(&mut number)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn test_decode_root_into_record() {
        let record = bins(&[("count", BinValue::Int(1))]);
        let mut counter = Counter::default();
        decode_root(Some(&record), Some(&mut counter)).unwrap();
        assert_eq!(counter.count, 1);
    }

    #[test]
    fn test_decode_error_names_field() {
        let record = bins(&[("label", BinValue::Int(1))]);
        let err = decode(Some(&record), &mut Counter::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.path(), "label");
    }
}
