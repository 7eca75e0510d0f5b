//! Static conversion strategy of a type.
//!
//! Every [`Convertible`](crate::Convertible) type declares its [`Shape`] as an
//! associated constant, so traversal decisions that depend only on the declared
//! type (which map values are allowed, whether an entrypoint received a struct)
//! are resolved without looking at any runtime value.

use std::fmt;

/// Scalar kinds understood by the coercion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// Signed integer of any width
    Int,
    /// Unsigned integer of any width
    Uint,
    /// Float of any width
    Float,
    Str,
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "string",
        }
    }
}

/// How a type is converted to and from a [`BinValue`](crate::BinValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Leaf value stored directly
    Scalar(ScalarKind),
    /// Point in time stored as epoch seconds
    Time,
    /// Tagged record stored as a nested map
    Struct,
    /// Ordered sequence stored as a list
    Sequence,
    /// Keyed collection stored as a nested map
    Mapping,
    /// Nullable indirection (`Option<T>`)
    Optional,
    /// The empty value `()`
    Unit,
    /// A kind the engine refuses to convert, e.g. `"func"` or `"chan"`
    Unsupported(&'static str),
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.name(),
            Self::Time => "time",
            Self::Struct => "struct",
            Self::Sequence => "sequence",
            Self::Mapping => "map",
            Self::Optional => "optional",
            Self::Unit => "unit",
            Self::Unsupported(kind) => kind,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
