//! Error types for binmap conversions.
//!
//! Every failure is returned to the immediate caller. Leaf errors describe what
//! went wrong; the `Field`, `Index` and `Key` wrappers record where it went
//! wrong while the error bubbles up through nested records.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, Error)]
pub enum BinMapError {
    /// The value handed to an entrypoint is not a non-null reference to a struct.
    #[error("the provided value must be a non-null reference to a struct, got {found}")]
    InputShape { found: String },

    /// A field, map value or map key has a kind the engine cannot convert.
    #[error("type {kind} is not supported")]
    UnsupportedKind { kind: String },

    /// A stored value has a different dynamic shape than the declared field type.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// A stored value cannot be converted to the requested kind.
    #[error("cannot convert {value} to {target}")]
    Conversion { value: String, target: String },

    #[error("failed to convert field {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<BinMapError>,
    },

    #[error("failed to convert element {index}: {source}")]
    Index {
        index: usize,
        #[source]
        source: Box<BinMapError>,
    },

    #[error("failed to convert map entry {key}: {source}")]
    Key {
        key: String,
        #[source]
        source: Box<BinMapError>,
    },
}

/// Flat classification of a [`BinMapError`], ignoring path wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputShape,
    UnsupportedKind,
    ShapeMismatch,
    Conversion,
}

impl BinMapError {
    pub fn input_shape(found: impl Into<String>) -> Self {
        Self::InputShape {
            found: found.into(),
        }
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn conversion(value: impl ToString, target: impl Into<String>) -> Self {
        Self::Conversion {
            value: value.to_string(),
            target: target.into(),
        }
    }

    /// Wrap the error with the name of the struct field being converted.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// Wrap the error with the position of the sequence element being converted.
    pub fn at_index(self, index: usize) -> Self {
        Self::Index {
            index,
            source: Box::new(self),
        }
    }

    /// Wrap the error with the map key whose entry failed.
    pub fn at_key(self, key: impl ToString) -> Self {
        Self::Key {
            key: key.to_string(),
            source: Box::new(self),
        }
    }

    /// The root cause, with every path wrapper removed.
    pub fn root(&self) -> &BinMapError {
        match self {
            Self::Field { source, .. } | Self::Index { source, .. } | Self::Key { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::InputShape { .. } => ErrorKind::InputShape,
            Self::UnsupportedKind { .. } => ErrorKind::UnsupportedKind,
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Field { .. } | Self::Index { .. } | Self::Key { .. } => {
                unreachable!("root() strips path wrappers")
            }
        }
    }

    /// Dotted path to the failing value, e.g. `nested.slice[2]`.
    ///
    /// Empty when the error was raised at the top level.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut current = self;
        loop {
            match current {
                Self::Field { field, source } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(field);
                    current = source;
                }
                Self::Index { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    current = source;
                }
                Self::Key { key, source } => {
                    path.push_str(&format!("[{key}]"));
                    current = source;
                }
                _ => return path,
            }
        }
    }
}

/// Result type for binmap conversions.
pub type Result<T> = std::result::Result<T, BinMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sees_through_wrappers() {
        let err = BinMapError::shape_mismatch("list", "int")
            .at_index(2)
            .in_field("slice")
            .in_field("nested");
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert!(matches!(err.root(), BinMapError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_path_renders_nesting() {
        let err = BinMapError::conversion("x", "i32")
            .at_index(2)
            .in_field("slice")
            .in_field("nested");
        assert_eq!(err.path(), "nested.slice[2]");

        let err = BinMapError::unsupported("list").at_key("k").in_field("map");
        assert_eq!(err.path(), "map[k]");

        assert_eq!(BinMapError::input_shape("i32").path(), "");
    }

    #[test]
    fn test_display_names_field() {
        let err = BinMapError::unsupported("fn").in_field("callback");
        assert_eq!(
            err.to_string(),
            "failed to convert field callback: type fn is not supported"
        );
    }
}
