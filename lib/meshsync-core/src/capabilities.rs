//! Enterprise capability flags supplied by the environment
use tracing::debug;

/// Feature flags and tenancy configuration of the connected mesh server.
/// Supplied by the caller; this crate never probes the environment itself.
#[derive(Clone, Debug, Default)]
pub struct Capabilities {
    /// Whether mesh namespaces are enabled.
    pub namespaces_enabled: bool,

    /// Whether admin partitions are enabled.
    pub partitions_enabled: bool,

    /// The partition this cluster syncs into. Empty when partitions are
    /// disabled.
    pub partition: String,

    /// Fixed destination namespace all resources sync into, if configured.
    pub destination_namespace: String,

    /// Whether destination namespaces mirror the resource's own namespace.
    pub mirroring: bool,

    /// Prefix prepended to mirrored namespace names.
    pub mirroring_prefix: String,
}

impl Capabilities {
    /// Resolve the destination namespace for a resource living in
    /// `resource_namespace`. Returns an empty string when namespaces are
    /// disabled or no destination can be derived; callers leave fields
    /// untouched in that case.
    pub fn resolve_namespace(&self, resource_namespace: &str) -> String {
        if !self.namespaces_enabled {
            return String::new();
        }
        if !self.destination_namespace.is_empty() {
            return self.destination_namespace.clone();
        }
        if self.mirroring {
            let namespace = format!("{}{}", self.mirroring_prefix, resource_namespace);
            debug!(%namespace, "mirroring resource namespace");
            return namespace;
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_namespaces_resolve_empty() {
        let caps = Capabilities {
            namespaces_enabled: false,
            destination_namespace: "shared".to_string(),
            mirroring: true,
            ..Default::default()
        };
        assert_eq!(caps.resolve_namespace("apps"), "");
    }

    #[test]
    fn test_fixed_destination_wins_over_mirroring() {
        let caps = Capabilities {
            namespaces_enabled: true,
            destination_namespace: "shared".to_string(),
            mirroring: true,
            ..Default::default()
        };
        assert_eq!(caps.resolve_namespace("apps"), "shared");
    }

    #[test]
    fn test_mirroring_with_prefix() {
        let caps = Capabilities {
            namespaces_enabled: true,
            mirroring: true,
            mirroring_prefix: "k8s-".to_string(),
            ..Default::default()
        };
        assert_eq!(caps.resolve_namespace("apps"), "k8s-apps");
    }

    #[test]
    fn test_no_destination_configured() {
        let caps = Capabilities {
            namespaces_enabled: true,
            ..Default::default()
        };
        assert_eq!(caps.resolve_namespace("apps"), "");
    }
}
