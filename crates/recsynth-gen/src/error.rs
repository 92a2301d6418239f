//! Error types for recsynth-gen

use thiserror::Error;

/// Result type alias for recsynth-gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building record types, instantiating them,
/// or driving the generator
#[derive(Debug, Error)]
pub enum Error {
    /// A record or field name is not a valid identifier
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A field name collides with a reserved keyword
    #[error("Reserved name: {0}")]
    ReservedName(String),

    /// Two fields of one record share a name
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// A field without a default follows a field with one
    #[error("Field {field} has no default but follows a defaulted field")]
    RequiredAfterDefault {
        /// Offending field
        field: String,
    },

    /// More positional arguments than the record has fields
    #[error("{record} takes {expected} positional arguments but {got} were given")]
    TooManyArguments {
        /// Record type name
        record: String,
        /// Number of fields
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// A required field was not supplied
    #[error("{record} missing required argument: {field}")]
    MissingArgument {
        /// Record type name
        record: String,
        /// Field that has no value and no default
        field: String,
    },

    /// More field names were requested than the allocator can supply
    #[error("Requested {requested} field names but only {available} exist")]
    NamesExhausted {
        /// Number of names requested
        requested: usize,
        /// Size of the name space
        available: usize,
    },

    /// An exact nesting depth above the configured ceiling was requested
    #[error("Requested nesting depth {requested} exceeds the maximum of {max}")]
    DepthExceeded {
        /// Depth asked for
        requested: u32,
        /// Effective `max_depth`
        max: u32,
    },

    /// The test runner failed to produce a value
    #[error("Generation error: {0}")]
    Generation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateField("a".to_string());
        assert_eq!(err.to_string(), "Duplicate field: a");
    }

    #[test]
    fn test_error_required_after_default() {
        let err = Error::RequiredAfterDefault {
            field: "_b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field _b has no default but follows a defaulted field"
        );
    }

    #[test]
    fn test_error_too_many_arguments() {
        let err = Error::TooManyArguments {
            record: "HypClass".to_string(),
            expected: 2,
            got: 3,
        };
        assert_eq!(
            err.to_string(),
            "HypClass takes 2 positional arguments but 3 were given"
        );
    }

    #[test]
    fn test_error_names_exhausted() {
        let err = Error::NamesExhausted {
            requested: 800,
            available: 695,
        };
        assert!(err.to_string().contains("800"));
        assert!(err.to_string().contains("695"));
    }

    #[test]
    fn test_error_depth_exceeded() {
        let err = Error::DepthExceeded {
            requested: 3000,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "Requested nesting depth 3000 exceeds the maximum of 4"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_from_serde_yaml() {
        let yaml_err: serde_yaml::Error = serde_yaml::from_str::<i32>("not: [yaml").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::YamlError(_)));
        assert!(err.to_string().contains("YAML error"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::InvalidIdentifier("1abc".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("InvalidIdentifier"));
    }
}
