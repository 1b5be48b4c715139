//! Shared validation building blocks
//!
//! Kind validators push violations into an [`ErrorList`] and convert the
//! accumulated set to an [`InvalidResourceError`] at the end; no rule short
//! circuits the others.
use serde::Serialize;

use crate::error::{FieldError, InvalidResourceError};
use crate::path::FieldPath;

/// The wildcard token rejected wherever tenancy names are expected.
pub const WILDCARD: &str = "*";

/// Accumulator for field violations found while validating one resource.
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<FieldError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. The rejected value is rendered as JSON so error
    /// text is reproducible byte for byte.
    pub fn push<T: Serialize>(&mut self, path: FieldPath, value: &T, message: impl Into<String>) {
        let value = serde_json::to_string(value).unwrap_or_default();
        self.errors.push(FieldError {
            path,
            value,
            message: message.into(),
        });
    }

    /// Record a violation with an already-rendered value.
    pub fn push_raw(&mut self, path: FieldPath, value: String, message: impl Into<String>) {
        self.errors.push(FieldError {
            path,
            value,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation for the named resource. Returns `Ok(())` when no
    /// violations were recorded.
    pub fn into_result(self, kind: &str, name: &str) -> Result<(), InvalidResourceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidResourceError::new(kind, name, self.errors))
        }
    }
}

/// `must be one of "a", "b"` message for enum-like string fields.
pub fn not_in_set_message(allowed: &[&str]) -> String {
    format!(r#"must be one of "{}""#, allowed.join(r#"", ""#))
}

/// Check a string field against an allowed set, recording the standard
/// message when it does not match.
pub fn check_in_set(errors: &mut ErrorList, path: FieldPath, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.push(path, &value, not_in_set_message(allowed));
    }
}

/// Check a read/write rate pair. Read rates of zero are allowed, write
/// rates are not.
pub fn check_rates(errors: &mut ErrorList, path: &FieldPath, read_rate: f64, write_rate: f64) {
    if read_rate < 0.0 {
        errors.push(path.child("readRate"), &read_rate, "readRate must be >= 0");
    }
    if write_rate <= 0.0 {
        errors.push(path.child("writeRate"), &write_rate, "writeRate must be > 0");
    }
}

/// Reject the wildcard token in a tenancy field. The rejected value is
/// rendered as the empty string to match the server's own error text.
pub fn check_not_wildcard(errors: &mut ErrorList, path: FieldPath, value: &str, scope: &str) {
    if value == WILDCARD {
        errors.push_raw(
            path,
            "\"\"".to_string(),
            format!("exporting to all {scope} (wildcard) is not supported"),
        );
    }
}

/// Require that the resource name match the mesh partition the cluster
/// syncs into. Singleton kinds scoped to a partition carry its name; when
/// partitions are disabled the name must be "default".
pub fn check_partition_identity(
    errors: &mut ErrorList,
    kube_kind: &str,
    name: &str,
    caps: &crate::capabilities::Capabilities,
) {
    if caps.partitions_enabled {
        if name != caps.partition {
            errors.push(
                FieldPath::new("name"),
                &name,
                format!(
                    r#"{kube_kind} resource name must be the same name as the partition, "{}""#,
                    caps.partition
                ),
            );
        }
    } else if name != "default" {
        errors.push(
            FieldPath::new("name"),
            &name,
            format!(r#"{kube_kind} resource name must be "default""#),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_set_message() {
        assert_eq!(
            not_in_set_message(&["tcp", "http", "http2", "grpc"]),
            r#"must be one of "tcp", "http", "http2", "grpc""#
        );
        assert_eq!(
            not_in_set_message(&["TLS_AUTO", ""]),
            r#"must be one of "TLS_AUTO", """#
        );
    }

    #[test]
    fn test_check_rates() {
        let mut errors = ErrorList::new();
        check_rates(&mut errors, &FieldPath::new("spec"), -1.0, 0.0);
        let err = errors.into_result("ratelimitpolicy", "limits").unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.errors[0].message, "readRate must be >= 0");
        assert_eq!(err.errors[1].message, "writeRate must be > 0");
    }

    #[test]
    fn test_zero_read_rate_allowed() {
        let mut errors = ErrorList::new();
        check_rates(&mut errors, &FieldPath::new("spec"), 0.0, 100.0);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_wildcard_rejected_with_empty_value() {
        let mut errors = ErrorList::new();
        check_not_wildcard(
            &mut errors,
            FieldPath::new("spec").child("services").index(0).child("namespace"),
            WILDCARD,
            "namespaces",
        );
        let err = errors.into_result("exportedservices", "default").unwrap_err();
        assert_eq!(
            err.errors[0].to_string(),
            "spec.services[0].namespace: Invalid value: \"\": \
             exporting to all namespaces (wildcard) is not supported"
        );
    }

    #[test]
    fn test_partition_identity() {
        let partitioned = crate::capabilities::Capabilities {
            partitions_enabled: true,
            partition: "team-a".to_string(),
            ..Default::default()
        };
        let mut errors = ErrorList::new();
        check_partition_identity(&mut errors, "exportedservices", "other", &partitioned);
        let err = errors.into_result("exportedservices", "other").unwrap_err();
        assert_eq!(
            err.errors[0].message,
            r#"exportedservices resource name must be the same name as the partition, "team-a""#
        );

        let unpartitioned = crate::capabilities::Capabilities::default();
        let mut errors = ErrorList::new();
        check_partition_identity(&mut errors, "exportedservices", "other", &unpartitioned);
        let err = errors.into_result("exportedservices", "other").unwrap_err();
        assert_eq!(
            err.errors[0].message,
            r#"exportedservices resource name must be "default""#
        );

        let mut errors = ErrorList::new();
        check_partition_identity(&mut errors, "exportedservices", "default", &unpartitioned);
        assert!(errors.is_empty());
    }
}
