//! Error handling for Inkmap
//!
//! Provides the error types shared by every layer of the converter:
//! - Transform errors (one malformed function inside a `transform` attribute)
//! - Geometry errors (element attributes that yield no reference point)
//! - Document errors (a tree the walker cannot traverse)
//!
//! Transform and geometry errors are recoverable per element: the engine turns them into
//! warnings and keeps going, so they never become an [`Error`]. Only document errors fail a
//! whole conversion.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Transform error type
///
/// Describes one transform function that was skipped while parsing a `transform` attribute.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Function name is not one of translate/scale/rotate/matrix
    #[error("Unknown transform function '{name}'")]
    UnknownFunction {
        /// The unrecognised function name.
        name: String,
    },

    /// Function was called with the wrong number of arguments
    #[error("Transform function '{name}' takes {expected} arguments, got {actual}")]
    ArgumentCount {
        /// The function name.
        name: String,
        /// Human readable description of the accepted counts.
        expected: &'static str,
        /// Number of arguments found.
        actual: usize,
    },

    /// An argument is not a number
    #[error("Invalid argument '{argument}' in transform function '{name}'")]
    InvalidArgument {
        /// The function name.
        name: String,
        /// The offending argument text.
        argument: String,
    },

    /// Opening parenthesis without a matching closing one
    #[error("Unterminated transform function '{name}'")]
    Unterminated {
        /// The function name.
        name: String,
    },

    /// Text between functions that is not a function call
    #[error("Unexpected text in transform: '{text}'")]
    UnexpectedText {
        /// The stray text.
        text: String,
    },
}

/// Geometry error type
///
/// Explains why an element has no usable reference point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A required attribute is absent
    #[error("Missing attribute '{attribute}'")]
    MissingAttribute {
        /// The attribute name.
        attribute: String,
    },

    /// A numeric attribute does not parse
    #[error("Invalid number '{value}' in attribute '{attribute}'")]
    InvalidNumber {
        /// The attribute name.
        attribute: String,
        /// The raw attribute value.
        value: String,
    },

    /// A coordinate list yielded no complete pair
    #[error("No coordinate pairs in attribute '{attribute}'")]
    NoCoordinates {
        /// The attribute name.
        attribute: String,
    },
}

/// Main error type for Inkmap
///
/// Fails a whole conversion, or the serialization of its result.
#[derive(Error, Debug)]
pub enum Error {
    /// The document cannot be traversed
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// The reason the document was rejected.
        reason: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create an invalid document error
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Error::InvalidDocument {
            reason: reason.into(),
        }
    }

    /// Check if this is a document structure error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::InvalidDocument { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_error_display() {
        let err = TransformError::ArgumentCount {
            name: "matrix".to_string(),
            expected: "6",
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Transform function 'matrix' takes 6 arguments, got 4"
        );

        let err = TransformError::UnknownFunction {
            name: "skewX".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown transform function 'skewX'");
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::InvalidNumber {
            attribute: "width".to_string(),
            value: "wide".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number 'wide' in attribute 'width'");
    }

    #[test]
    fn test_error_classification() {
        let err = Error::other("Unknown SVG element type: image");
        assert!(!err.is_document_error());

        let err = Error::invalid_document("root is not a container");
        assert!(err.is_document_error());
        assert_eq!(err.to_string(), "Invalid document: root is not a container");
    }
}
