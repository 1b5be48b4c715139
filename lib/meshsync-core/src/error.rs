//! Error types for validation and catalog conversion
use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

/// A single rejected field. The value is the exact JSON rendering of the
/// field value so downstream error messages are reproducible.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub path: FieldPath,
    pub value: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Invalid value: {}: {}",
            self.path, self.value, self.message
        )
    }
}

/// Aggregated validation failure for one resource. Every violation found
/// during validation is listed; validation never stops at the first error.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidResourceError {
    /// Lowercase kind of the rejected resource, e.g. "ingressgateway".
    pub kind: String,
    /// Kubernetes name of the rejected resource.
    pub name: String,
    pub errors: Vec<FieldError>,
}

impl InvalidResourceError {
    pub fn new(kind: &str, name: &str, errors: Vec<FieldError>) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            errors,
        }
    }
}

impl fmt::Display for InvalidResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.meshsync.dev \"{}\" is invalid: ", self.kind, self.name)?;
        match self.errors.as_slice() {
            [single] => write!(f, "{}", single),
            errors => {
                f.write_str("[")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl std::error::Error for InvalidResourceError {}

/// Errors raised while converting a catalog registration to its external
/// payload. Each malformed duration field maps to its own variant so the
/// caller can report precisely which one failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("invalid value for intervalDuration")]
    InvalidInterval,

    #[error("invalid value for timeoutDuration")]
    InvalidTimeout,

    #[error("invalid value for deregisterCriticalServiceAfterDuration")]
    InvalidDeregisterAfter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_display() {
        let err = InvalidResourceError::new(
            "ratelimitpolicy",
            "limits",
            vec![FieldError {
                path: FieldPath::new("spec").child("mode"),
                value: "\"bad\"".to_string(),
                message: "mode must be one of: permissive, enforcing, disabled".to_string(),
            }],
        );
        assert_eq!(
            err.to_string(),
            "ratelimitpolicy.meshsync.dev \"limits\" is invalid: spec.mode: Invalid value: \
             \"bad\": mode must be one of: permissive, enforcing, disabled"
        );
    }

    #[test]
    fn test_multiple_errors_bracketed() {
        let path = FieldPath::new("spec");
        let err = InvalidResourceError::new(
            "ratelimitpolicy",
            "limits",
            vec![
                FieldError {
                    path: path.child("readRate"),
                    value: "-1.0".to_string(),
                    message: "readRate must be >= 0".to_string(),
                },
                FieldError {
                    path: path.child("writeRate"),
                    value: "0.0".to_string(),
                    message: "writeRate must be > 0".to_string(),
                },
            ],
        );
        let text = err.to_string();
        assert!(text.contains("[spec.readRate"));
        assert!(text.contains("readRate must be >= 0"));
        assert!(text.contains("writeRate must be > 0"));
        assert!(text.ends_with(']'));
    }
}
