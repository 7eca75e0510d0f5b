//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use binmap::{BinMap, BinRecord, BinValue};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Initialize logging for tests
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binmap=trace,binmap_core=trace".into()),
        )
        .with_test_writer()
        .try_init();
}

#[derive(BinRecord, Clone, Debug, Default, PartialEq)]
pub struct Alias(pub String);

#[derive(BinRecord, Clone, Debug, Default, PartialEq)]
pub struct Inner {
    #[bin("int")]
    pub int: isize,
    #[bin("int32")]
    pub int32: i32,
    #[bin("uint32")]
    pub uint32: u32,
    #[bin("int64")]
    pub int64: i64,
    #[bin("uint64")]
    pub uint64: u64,
    #[bin("float32")]
    pub float32: f32,
    #[bin("float64")]
    pub float64: f64,
    #[bin("bool")]
    pub flag: bool,
    #[bin("text")]
    pub text: String,
    #[bin("map_str_str")]
    pub map_str_str: HashMap<String, String>,
    #[bin("map_int")]
    pub map_int: HashMap<isize, isize>,
    #[bin("time")]
    pub time: DateTime<Utc>,
    #[bin("duration")]
    pub duration: Duration,
    #[bin("alias")]
    pub alias: Alias,
    #[bin("slice")]
    pub slice: Vec<isize>,
}

#[derive(BinRecord, Clone, Debug, Default, PartialEq)]
pub struct Outer {
    #[bin("int")]
    pub int: isize,
    #[bin("int32")]
    pub int32: i32,
    #[bin("uint32")]
    pub uint32: u32,
    #[bin("int64")]
    pub int64: i64,
    #[bin("uint64")]
    pub uint64: u64,
    #[bin("float32")]
    pub float32: f32,
    #[bin("float64")]
    pub float64: f64,
    #[bin("bool")]
    pub flag: bool,
    #[bin("text")]
    pub text: String,
    #[bin("map_str_str")]
    pub map_str_str: HashMap<String, String>,
    #[bin("map_int")]
    pub map_int: HashMap<isize, isize>,
    #[bin("time")]
    pub time: DateTime<Utc>,
    #[bin("duration")]
    pub duration: Duration,
    #[bin("nested")]
    pub nested: Inner,
    #[bin("alias")]
    pub alias: Alias,
    #[bin("slice")]
    pub slice: Vec<isize>,
}

pub fn date(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .expect("valid test date")
}

/// A record with every field populated.
pub fn all_fields() -> Outer {
    Outer {
        int: 1,
        int32: 2,
        uint32: 3,
        int64: 4,
        uint64: 5,
        float32: 6.7,
        float64: 8.9,
        flag: true,
        text: "string".to_string(),
        map_str_str: HashMap::from([("key".to_string(), "value".to_string())]),
        map_int: HashMap::from([(1, 2)]),
        time: date(2025, 10, 17, 12, 51),
        duration: Duration::from_secs(3600),
        nested: Inner {
            int: 10,
            int32: 11,
            uint32: 12,
            int64: 13,
            uint64: 14,
            float32: 15.0,
            float64: 16.0,
            flag: true,
            text: "17".to_string(),
            map_str_str: HashMap::from([("key2".to_string(), "value2".to_string())]),
            map_int: HashMap::from([(3, 4)]),
            time: date(2025, 10, 24, 12, 51),
            duration: Duration::from_secs(60),
            alias: Alias("alias2".to_string()),
            slice: vec![4, 5, 6],
        },
        alias: Alias("alias".to_string()),
        slice: vec![1, 2, 3],
    }
}

/// Build a flat record from `(bin, value)` pairs.
pub fn bins<const N: usize>(entries: [(&str, BinValue); N]) -> BinMap {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
