//! Type-directed conversion between Rust values and [`BinValue`]s.
//!
//! [`Convertible`] is implemented for every supported field type. The impl a
//! field uses is picked by the compiler from its declared type, so the
//! conversion strategy of a record is fixed at compile time; only the stored
//! values are inspected at runtime.

use crate::coerce;
use crate::error::{BinMapError, Result};
use crate::shape::{ScalarKind, Shape};
use crate::values::{BinMap, BinValue, BinValueMap};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A type that can be written to and read from a flat record.
pub trait Convertible: Sized {
    /// Conversion strategy of the declared type.
    const SHAPE: Shape;

    /// The zero value check used to omit fields on encode.
    fn is_default(&self) -> bool;

    /// Convert into a dynamic value.
    fn to_bin(&self) -> Result<BinValue>;

    /// Build a fresh value from a stored one.
    fn from_bin(value: &BinValue) -> Result<Self>;

    /// Decode a stored value into `self`.
    ///
    /// Replaces `self` by default. Records override this to merge field by
    /// field, leaving fields that are missing from `value` untouched.
    fn merge_bin(&mut self, value: &BinValue) -> Result<()> {
        *self = Self::from_bin(value)?;
        Ok(())
    }

    /// Encode as a top-level flat record. Only records support this.
    fn to_bins(&self) -> Result<BinMap> {
        Err(BinMapError::input_shape(Self::SHAPE.name()))
    }

    /// Decode a top-level flat record into `self`. Only records support this.
    fn merge_bins(&mut self, _bins: &BinMap) -> Result<()> {
        Err(BinMapError::input_shape(Self::SHAPE.name()))
    }
}

/// A type usable as a map key: integers and strings.
pub trait MapKey: Sized + Ord + Hash {
    fn to_key(&self) -> Result<BinValue>;

    fn from_key(key: &BinValue) -> Result<Self>;
}

/// Reject stored key kinds that no map key type accepts.
fn check_key_kind(key: &BinValue) -> Result<()> {
    match key {
        BinValue::Int(_) | BinValue::Str(_) => Ok(()),
        other => Err(BinMapError::unsupported(format!(
            "{} as map key",
            other.kind_name()
        ))),
    }
}

macro_rules! int_convertible {
    ($($ty:ty: $kind:ident, $widen:path, $narrow:path);* $(;)?) => {
        $(
            impl Convertible for $ty {
                const SHAPE: Shape = Shape::Scalar(ScalarKind::$kind);

                fn is_default(&self) -> bool {
                    *self == 0
                }

                fn to_bin(&self) -> Result<BinValue> {
                    Ok(BinValue::Int($widen(*self)))
                }

                fn from_bin(value: &BinValue) -> Result<Self> {
                    coerce::expect_int(value, stringify!($ty)).map($narrow)
                }
            }

            impl MapKey for $ty {
                fn to_key(&self) -> Result<BinValue> {
                    Ok(BinValue::Int($widen(*self)))
                }

                fn from_key(key: &BinValue) -> Result<Self> {
                    check_key_kind(key)?;
                    coerce::expect_int(key, stringify!($ty)).map($narrow)
                }
            }
        )*
    };
}

int_convertible! {
    i8: Int, coerce::i8_to_i64, coerce::i64_to_i8;
    i16: Int, coerce::i16_to_i64, coerce::i64_to_i16;
    i32: Int, coerce::i32_to_i64, coerce::i64_to_i32;
    i64: Int, coerce::i64_to_i64, coerce::i64_to_i64;
    isize: Int, coerce::isize_to_i64, coerce::i64_to_isize;
    u8: Uint, coerce::u8_to_i64, coerce::i64_to_u8;
    u16: Uint, coerce::u16_to_i64, coerce::i64_to_u16;
    u32: Uint, coerce::u32_to_i64, coerce::i64_to_u32;
    u64: Uint, coerce::u64_to_i64, coerce::i64_to_u64;
    usize: Uint, coerce::usize_to_i64, coerce::i64_to_usize;
}

macro_rules! float_convertible {
    ($($ty:ty: $widen:path, $narrow:path);* $(;)?) => {
        $(
            impl Convertible for $ty {
                const SHAPE: Shape = Shape::Scalar(ScalarKind::Float);

                // Bit-pattern check: -0.0 and NaN are real values, not zero.
                fn is_default(&self) -> bool {
                    self.to_bits() == 0
                }

                fn to_bin(&self) -> Result<BinValue> {
                    Ok(BinValue::Float($widen(*self)))
                }

                fn from_bin(value: &BinValue) -> Result<Self> {
                    coerce::expect_float(value, stringify!($ty)).map($narrow)
                }
            }
        )*
    };
}

float_convertible! {
    f32: coerce::f32_to_f64, coerce::f64_to_f32;
    f64: coerce::f64_to_f64, coerce::f64_to_f64;
}

impl Convertible for bool {
    const SHAPE: Shape = Shape::Scalar(ScalarKind::Bool);

    fn is_default(&self) -> bool {
        !*self
    }

    fn to_bin(&self) -> Result<BinValue> {
        Ok(BinValue::Bool(*self))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        coerce::expect_bool(value)
    }
}

// Bool keys are representable in Rust but not in the flat record.
impl MapKey for bool {
    fn to_key(&self) -> Result<BinValue> {
        Err(BinMapError::unsupported("bool as map key"))
    }

    fn from_key(_key: &BinValue) -> Result<Self> {
        Err(BinMapError::unsupported("bool as map key"))
    }
}

impl Convertible for String {
    const SHAPE: Shape = Shape::Scalar(ScalarKind::Str);

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn to_bin(&self) -> Result<BinValue> {
        Ok(BinValue::Str(self.clone()))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        coerce::expect_str(value).map(str::to_string)
    }
}

impl MapKey for String {
    fn to_key(&self) -> Result<BinValue> {
        Ok(BinValue::Str(self.clone()))
    }

    fn from_key(key: &BinValue) -> Result<Self> {
        check_key_kind(key)?;
        coerce::expect_str(key).map(str::to_string)
    }
}

/// `()` is the "nothing" input: it encodes as an empty flat record.
impl Convertible for () {
    const SHAPE: Shape = Shape::Unit;

    fn is_default(&self) -> bool {
        true
    }

    fn to_bin(&self) -> Result<BinValue> {
        Ok(BinValue::Nil)
    }

    fn from_bin(_value: &BinValue) -> Result<Self> {
        Ok(())
    }

    fn to_bins(&self) -> Result<BinMap> {
        Ok(BinMap::new())
    }
}

impl<T: Convertible> Convertible for Option<T> {
    const SHAPE: Shape = Shape::Optional;

    fn is_default(&self) -> bool {
        self.is_none()
    }

    // A present value is encoded even when it is its own zero value.
    fn to_bin(&self) -> Result<BinValue> {
        match self {
            Some(inner) => inner.to_bin(),
            None => Ok(BinValue::Nil),
        }
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        if value.is_nil() {
            return Ok(None);
        }
        T::from_bin(value).map(Some)
    }

    // Always decode into a fresh `T`; the old pointee is not merged into.
    fn merge_bin(&mut self, value: &BinValue) -> Result<()> {
        if let Some(inner) = Self::from_bin(value)? {
            *self = Some(inner);
        }
        Ok(())
    }

    fn to_bins(&self) -> Result<BinMap> {
        match self {
            Some(inner) => inner.to_bins(),
            None => Err(BinMapError::input_shape("null reference")),
        }
    }

    fn merge_bins(&mut self, bins: &BinMap) -> Result<()> {
        match self {
            Some(inner) => inner.merge_bins(bins),
            None => Err(BinMapError::input_shape("null reference")),
        }
    }
}

impl<T: Convertible> Convertible for Box<T> {
    const SHAPE: Shape = T::SHAPE;

    fn is_default(&self) -> bool {
        (**self).is_default()
    }

    fn to_bin(&self) -> Result<BinValue> {
        (**self).to_bin()
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        T::from_bin(value).map(Box::new)
    }

    fn merge_bin(&mut self, value: &BinValue) -> Result<()> {
        (**self).merge_bin(value)
    }

    fn to_bins(&self) -> Result<BinMap> {
        (**self).to_bins()
    }

    fn merge_bins(&mut self, bins: &BinMap) -> Result<()> {
        (**self).merge_bins(bins)
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    // Elements are never omitted, zero or not, so positions are preserved.
    fn to_bin(&self) -> Result<BinValue> {
        let items = self
            .iter()
            .enumerate()
            .map(|(i, item)| item.to_bin().map_err(|e| e.at_index(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(BinValue::List(items))
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        let items = value
            .as_list()
            .ok_or_else(|| BinMapError::shape_mismatch("list", value.kind_name()))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_bin(item).map_err(|e| e.at_index(i)))
            .collect()
    }
}

/// Map values go through scalar conversion only.
fn check_map_value_shape<V: Convertible>() -> Result<()> {
    if V::SHAPE.is_scalar() {
        Ok(())
    } else {
        Err(BinMapError::unsupported(format!(
            "{} as map value",
            V::SHAPE.name()
        )))
    }
}

fn map_to_bin<'a, K, V, I>(entries: I) -> Result<BinValue>
where
    K: MapKey + std::fmt::Debug + 'a,
    V: Convertible + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    check_map_value_shape::<V>()?;
    let mut out = BinValueMap::new();
    for (key, value) in entries {
        let bin_key = key.to_key().map_err(|e| e.at_key(format!("{key:?}")))?;
        let bin_value = value.to_bin().map_err(|e| e.at_key(format!("{key:?}")))?;
        out.insert(bin_key, bin_value);
    }
    Ok(BinValue::Map(out))
}

fn map_from_bin<K, V, C>(value: &BinValue) -> Result<C>
where
    K: MapKey,
    V: Convertible,
    C: FromIterator<(K, V)>,
{
    check_map_value_shape::<V>()?;
    let entries = value
        .as_map()
        .ok_or_else(|| BinMapError::shape_mismatch("map", value.kind_name()))?;
    entries
        .iter()
        .map(|(k, v)| -> Result<(K, V)> {
            let key = K::from_key(k).map_err(|e| e.at_key(k))?;
            let value = V::from_bin(v).map_err(|e| e.at_key(k))?;
            Ok((key, value))
        })
        .collect()
}

impl<K, V, S> Convertible for HashMap<K, V, S>
where
    K: MapKey + Eq + std::fmt::Debug,
    V: Convertible,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Mapping;

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn to_bin(&self) -> Result<BinValue> {
        map_to_bin(self.iter())
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        map_from_bin(value)
    }
}

impl<K, V> Convertible for BTreeMap<K, V>
where
    K: MapKey + std::fmt::Debug,
    V: Convertible,
{
    const SHAPE: Shape = Shape::Mapping;

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn to_bin(&self) -> Result<BinValue> {
        map_to_bin(self.iter())
    }

    fn from_bin(value: &BinValue) -> Result<Self> {
        map_from_bin(value)
    }
}

macro_rules! unsupported_convertible {
    ($kind:literal => $($ty:ty $([$($param:ident),*])?),* $(,)?) => {
        $(
            impl$(<$($param),*>)? Convertible for $ty {
                const SHAPE: Shape = Shape::Unsupported($kind);

                fn is_default(&self) -> bool {
                    false
                }

                fn to_bin(&self) -> Result<BinValue> {
                    Err(BinMapError::unsupported($kind))
                }

                fn from_bin(_value: &BinValue) -> Result<Self> {
                    Err(BinMapError::unsupported($kind))
                }
            }
        )*
    };
}

// Function pointers and channels have no stored form; tagging one compiles
// but fails at runtime as soon as a value has to cross.
unsupported_convertible! {
    "func" =>
        fn() -> R [R],
        fn(A) -> R [A, R],
        fn(A, B) -> R [A, B, R],
}

unsupported_convertible! {
    "chan" =>
        std::sync::mpsc::Sender<T> [T],
        std::sync::mpsc::SyncSender<T> [T],
        std::sync::mpsc::Receiver<T> [T],
}
