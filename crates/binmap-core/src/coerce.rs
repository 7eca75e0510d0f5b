//! Scalar coercion between declared Rust widths and the canonical bin forms.
//!
//! Integers travel as `i64` and floats as `f64`. Moving between the declared
//! width and the canonical one never fails: every pair has a named function
//! here, and each of them truncates, reinterprets or rounds exactly like an
//! `as` cast. Callers that need range checks must do them before encoding.

use crate::error::{BinMapError, Result};
use crate::values::BinValue;

macro_rules! widen_fns {
    ($($name:ident: $source:ty),* $(,)?) => {
        $(
            #[doc = concat!("Widen `", stringify!($source), "` into the canonical `i64`.")]
            #[inline]
            pub fn $name(value: $source) -> i64 {
                value as i64
            }
        )*
    };
}

macro_rules! narrow_fns {
    ($($name:ident: $target:ty),* $(,)?) => {
        $(
            #[doc = concat!("Narrow the canonical `i64` into `", stringify!($target), "`, wrapping silently.")]
            #[inline]
            pub fn $name(value: i64) -> $target {
                value as $target
            }
        )*
    };
}

widen_fns! {
    i8_to_i64: i8,
    i16_to_i64: i16,
    i32_to_i64: i32,
    isize_to_i64: isize,
    u8_to_i64: u8,
    u16_to_i64: u16,
    u32_to_i64: u32,
}

/// Reinterpret a `u64` as `i64`.
///
/// Values above `i64::MAX` come out negative; [`i64_to_u64`] restores them.
#[inline]
pub fn u64_to_i64(value: u64) -> i64 {
    value as i64
}

/// Reinterpret a `usize` as `i64`, with the same wrap as [`u64_to_i64`].
#[inline]
pub fn usize_to_i64(value: usize) -> i64 {
    value as i64
}

#[inline]
pub fn i64_to_i64(value: i64) -> i64 {
    value
}

narrow_fns! {
    i64_to_i8: i8,
    i64_to_i16: i16,
    i64_to_i32: i32,
    i64_to_isize: isize,
    i64_to_u8: u8,
    i64_to_u16: u16,
    i64_to_u32: u32,
    i64_to_u64: u64,
    i64_to_usize: usize,
}

#[inline]
pub fn f32_to_f64(value: f32) -> f64 {
    f64::from(value)
}

/// Narrow to `f32` with IEEE round-to-nearest; out-of-range values become infinite.
#[inline]
pub fn f64_to_f32(value: f64) -> f32 {
    value as f32
}

#[inline]
pub fn f64_to_f64(value: f64) -> f64 {
    value
}

/// Read an integer-shaped value.
pub fn expect_int(value: &BinValue, target: &str) -> Result<i64> {
    match value {
        BinValue::Int(i) => Ok(*i),
        other => Err(BinMapError::conversion(other, target)),
    }
}

/// Read a float-shaped value; integers are accepted and widened.
pub fn expect_float(value: &BinValue, target: &str) -> Result<f64> {
    match value {
        BinValue::Float(f) => Ok(*f),
        BinValue::Int(i) => Ok(*i as f64),
        other => Err(BinMapError::conversion(other, target)),
    }
}

/// Read a boolean; integers count as `true` when non-zero.
pub fn expect_bool(value: &BinValue) -> Result<bool> {
    match value {
        BinValue::Bool(b) => Ok(*b),
        BinValue::Int(i) => Ok(*i != 0),
        other => Err(BinMapError::conversion(other, "bool")),
    }
}

pub fn expect_str(value: &BinValue) -> Result<&str> {
    match value {
        BinValue::Str(s) => Ok(s),
        other => Err(BinMapError::conversion(other, "string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_unsigned_wraps_above_signed_max() {
        assert_eq!(u64_to_i64(u64::MAX), -1);
        assert_eq!(u64_to_i64(i64::MAX as u64 + 1), i64::MIN);
        assert_eq!(i64_to_u64(-1), u64::MAX);
        assert_eq!(i64_to_u64(i64::MIN), i64::MAX as u64 + 1);
    }

    #[test]
    fn test_narrowing_wraps() {
        assert_eq!(i64_to_u8(300), 44);
        assert_eq!(i64_to_i8(200), -56);
        assert_eq!(i64_to_i16(70_000), 4_464);
        assert_eq!(i64_to_u32(-1), u32::MAX);
    }

    #[test]
    fn test_widening_is_lossless() {
        assert_eq!(i8_to_i64(i8::MIN), -128);
        assert_eq!(u32_to_i64(u32::MAX), 4_294_967_295);
        assert_eq!(f32_to_f64(67.0), 67.0);
    }

    #[test]
    fn test_float_narrowing() {
        assert_eq!(f64_to_f32(6.7), 6.7f32);
        assert!(f64_to_f32(f64::MAX).is_infinite());
    }

    #[test]
    fn test_expect_int_rejects_other_shapes() {
        assert_eq!(expect_int(&BinValue::Int(7), "i32").unwrap(), 7);
        let err = expect_int(&BinValue::Float(7.0), "i32").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.to_string(), "cannot convert 7 to i32");
    }

    #[test]
    fn test_expect_float_accepts_ints() {
        assert_eq!(expect_float(&BinValue::Int(6), "f32").unwrap(), 6.0);
        assert_eq!(expect_float(&BinValue::Float(8.9), "f64").unwrap(), 8.9);
        assert!(expect_float(&BinValue::from("8.9"), "f64").is_err());
    }

    #[test]
    fn test_expect_bool() {
        assert!(expect_bool(&BinValue::Bool(true)).unwrap());
        assert!(expect_bool(&BinValue::Int(1)).unwrap());
        assert!(!expect_bool(&BinValue::Int(0)).unwrap());
        assert!(expect_bool(&BinValue::from("true")).is_err());
    }
}
