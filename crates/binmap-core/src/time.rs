//! Time points and durations.
//!
//! - `DateTime<Utc>` is stored as whole seconds since the Unix epoch; the
//!   sub-second part is dropped on encode.
//! - `std::time::Duration` and `chrono::TimeDelta` are plain integers counting
//!   nanoseconds. Nothing in the stored value marks them as durations.

use crate::coerce;
use crate::convert::Convertible;
use crate::error::{BinMapError, Result};
use crate::shape::{ScalarKind, Shape};
use crate::values::BinValue;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::time::Duration;

impl Convertible for DateTime<Utc> {
    const SHAPE: Shape = Shape::Time;

    /// The Unix epoch is the zero time point.
    fn is_default(&self) -> bool {
        *self == DateTime::<Utc>::UNIX_EPOCH
    }

    fn to_bin(&self) -> Result<BinValue> {
        Ok(BinValue::Int(self.timestamp()))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        let seconds = value
            .as_i64()
            .ok_or_else(|| BinMapError::conversion(value, "time (must be an int)"))?;
        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| BinMapError::conversion(seconds, "time (out of range)"))
    }
}

impl Convertible for Duration {
    const SHAPE: Shape = Shape::Scalar(ScalarKind::Int);

    fn is_default(&self) -> bool {
        self.is_zero()
    }

    // Durations beyond ~292 years wrap, like any other u64 above i64::MAX.
    fn to_bin(&self) -> Result<BinValue> {
        Ok(BinValue::Int(coerce::u64_to_i64(self.as_nanos() as u64)))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        let nanos = coerce::expect_int(value, "duration")?;
        Ok(Duration::from_nanos(coerce::i64_to_u64(nanos)))
    }
}

impl Convertible for TimeDelta {
    const SHAPE: Shape = Shape::Scalar(ScalarKind::Int);

    fn is_default(&self) -> bool {
        self.is_zero()
    }

    fn to_bin(&self) -> Result<BinValue> {
        self.num_nanoseconds()
            .map(BinValue::Int)
            .ok_or_else(|| BinMapError::conversion(self, "duration in nanoseconds"))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        coerce::expect_int(value, "duration").map(TimeDelta::nanoseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_time_to_epoch_seconds() {
        let t = Utc.with_ymd_and_hms(2025, 10, 17, 12, 51, 0).unwrap();
        assert_eq!(t.to_bin().unwrap(), BinValue::Int(t.timestamp()));
        assert_eq!(DateTime::<Utc>::from_bin(&BinValue::Int(t.timestamp())).unwrap(), t);
    }

    #[test]
    fn test_time_drops_sub_second() {
        let t = Utc.with_ymd_and_hms(2025, 10, 17, 12, 51, 0).unwrap()
            + TimeDelta::milliseconds(250);
        let decoded = DateTime::<Utc>::from_bin(&t.to_bin().unwrap()).unwrap();
        assert_ne!(decoded, t);
        assert_eq!(decoded.timestamp(), t.timestamp());
    }

    #[test]
    fn test_time_requires_int() {
        let err = DateTime::<Utc>::from_bin(&BinValue::from("2025-10-17")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        let err = DateTime::<Utc>::from_bin(&BinValue::Int(i64::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn test_epoch_is_zero() {
        assert!(DateTime::<Utc>::UNIX_EPOCH.is_default());
        assert!(DateTime::<Utc>::default().is_default());
    }

    #[test]
    fn test_duration_as_nanoseconds() {
        assert_eq!(
            Duration::from_secs(3600).to_bin().unwrap(),
            BinValue::Int(3_600_000_000_000)
        );
        assert_eq!(
            Duration::from_bin(&BinValue::Int(60_000_000_000)).unwrap(),
            Duration::from_secs(60)
        );
        assert_eq!(
            TimeDelta::hours(1).to_bin().unwrap(),
            BinValue::Int(3_600_000_000_000)
        );
        assert_eq!(
            TimeDelta::from_bin(&BinValue::Int(-1_000)).unwrap(),
            TimeDelta::microseconds(-1)
        );
    }
}
