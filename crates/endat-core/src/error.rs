//! Unified error types for the endat configuration layer.
//!
//! This module provides a common error type [`EndatError`] used across the
//! codec, the configuration store and the path layer. A missing section or
//! key is always reported as a lookup failure instead of being papered over
//! with a default, so misconfiguration surfaces at the call site.
//!
//! # Example
//!
//! ```ignore
//! use endat_core::{Config, EndatResult};
//!
//! fn weather_pattern(cfg: &Config) -> EndatResult<String> {
//!     Ok(cfg.get("coastdat", "file_pattern")?.to_string())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all endat operations.
#[derive(Error, Debug)]
pub enum EndatError {
    /// I/O errors (reading configuration files, creating directories)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// INI grammar errors, with the 1-based line of the offending input
    #[error("parse error in line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Lookup of a section that does not exist
    #[error("no section [{section}] in the configuration")]
    MissingSection { section: String },

    /// Lookup of a key that does not exist within an existing section
    #[error("no key \"{key}\" in section [{section}]")]
    MissingKey { section: String, key: String },

    /// Lookup of a key whose value is the "None" sentinel
    #[error("value of [{section}] {key} is unset; supply it before use")]
    Unset { section: String, key: String },

    /// A value that cannot be coerced to the requested type
    #[error("value \"{value}\" of [{section}] {key} is not a valid {expected}")]
    InvalidValue {
        section: String,
        key: String,
        expected: &'static str,
        value: String,
    },

    /// Placeholder template errors (unbalanced braces, unresolved tokens)
    #[error("template error: {0}")]
    Template(String),

    /// Path composition errors
    #[error("path error: {0}")]
    Path(String),
}

/// Convenience type alias for Results using EndatError.
pub type EndatResult<T> = Result<T, EndatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_name_the_pair() {
        let err = EndatError::MissingKey {
            section: "coastdat".into(),
            key: "file_pattern".into(),
        };
        assert!(err.to_string().contains("coastdat"));
        assert!(err.to_string().contains("file_pattern"));

        let err = EndatError::Unset {
            section: "root_paths".into(),
            key: "local_root".into(),
        };
        assert!(err.to_string().contains("unset"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EndatError = io_err.into();
        assert!(matches!(err, EndatError::Io(_)));
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = EndatError::Parse {
            line: 7,
            message: "expected key = value".into(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> EndatResult<()> {
            Err(EndatError::MissingSection {
                section: "feedin".into(),
            })
        }

        fn outer() -> EndatResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
