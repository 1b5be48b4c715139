//! Native config-entry representation of the mesh server
//!
//! These types mirror what the server returns when a config entry is read
//! back: the semantic fields of the resource plus server-assigned volatile
//! fields (raft indexes, the provenance meta map, back-filled tenancy) that
//! equivalence checking must ignore.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Meta key identifying which system manages an entry.
pub const SOURCE_KEY: &str = "external-source";
/// Meta value recorded for entries managed by this sync core.
pub const SOURCE_VALUE: &str = "kubernetes";
/// Meta key recording the datacenter a managed entry was written from.
pub const DATACENTER_KEY: &str = "source-datacenter";

/// Provenance meta attached to every translated entry.
pub fn provenance(datacenter: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (SOURCE_KEY.to_string(), SOURCE_VALUE.to_string()),
        (DATACENTER_KEY.to_string(), datacenter.to_string()),
    ])
}

/// Config entry kinds understood by the mesh server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    RateLimit,
    ExportedServices,
    IngressGateway,
    TerminatingGateway,
    SamenessGroup,
}

impl EntryKind {
    /// The server's native name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::RateLimit => "control-plane-request-limit",
            EntryKind::ExportedServices => "exported-services",
            EntryKind::IngressGateway => "ingress-gateway",
            EntryKind::TerminatingGateway => "terminating-gateway",
            EntryKind::SamenessGroup => "sameness-group",
        }
    }
}

/// A config entry as held by the mesh server. The variant is the kind
/// discriminator used by equivalence checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Kind")]
pub enum ConfigEntry {
    #[serde(rename = "control-plane-request-limit")]
    RateLimit(RateLimitEntry),
    #[serde(rename = "exported-services")]
    ExportedServices(ExportedServicesEntry),
    #[serde(rename = "ingress-gateway")]
    IngressGateway(IngressGatewayEntry),
    #[serde(rename = "terminating-gateway")]
    TerminatingGateway(TerminatingGatewayEntry),
    #[serde(rename = "sameness-group")]
    SamenessGroup(SamenessGroupEntry),
}

impl ConfigEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            ConfigEntry::RateLimit(_) => EntryKind::RateLimit,
            ConfigEntry::ExportedServices(_) => EntryKind::ExportedServices,
            ConfigEntry::IngressGateway(_) => EntryKind::IngressGateway,
            ConfigEntry::TerminatingGateway(_) => EntryKind::TerminatingGateway,
            ConfigEntry::SamenessGroup(_) => EntryKind::SamenessGroup,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConfigEntry::RateLimit(e) => &e.name,
            ConfigEntry::ExportedServices(e) => &e.name,
            ConfigEntry::IngressGateway(e) => &e.name,
            ConfigEntry::TerminatingGateway(e) => &e.name,
            ConfigEntry::SamenessGroup(e) => &e.name,
        }
    }

    /// Reset every server-assigned field so two entries can be compared on
    /// the fields the caller actually controls.
    pub fn clear_volatile(&mut self) {
        match self {
            ConfigEntry::RateLimit(e) => e.clear_volatile(),
            ConfigEntry::ExportedServices(e) => e.clear_volatile(),
            ConfigEntry::IngressGateway(e) => e.clear_volatile(),
            ConfigEntry::TerminatingGateway(e) => e.clear_volatile(),
            ConfigEntry::SamenessGroup(e) => e.clear_volatile(),
        }
    }
}

// Server-assigned fields shared by every entry kind.
macro_rules! impl_clear_volatile {
    ($($entry:ty),* $(,)?) => {
        $(impl $entry {
            pub fn clear_volatile(&mut self) {
                self.meta.clear();
                self.create_index = 0;
                self.modify_index = 0;
                self.partition.clear();
                self.namespace.clear();
            }
        })*
    };
}

impl_clear_volatile!(
    RateLimitEntry,
    ExportedServicesEntry,
    IngressGatewayEntry,
    TerminatingGatewayEntry,
    SamenessGroupEntry,
);

/// Control-plane request limit entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RateLimitEntry {
    pub name: String,
    pub mode: String,
    pub read_rate: f64,
    pub write_rate: f64,
    #[serde(rename = "ACL")]
    pub acl: Option<RatePairEntry>,
    pub catalog: Option<RatePairEntry>,
    pub config_entry: Option<RatePairEntry>,
    #[serde(rename = "ConnectCA")]
    pub connect_ca: Option<RatePairEntry>,
    pub coordinate: Option<RatePairEntry>,
    pub discovery_chain: Option<RatePairEntry>,
    pub health: Option<RatePairEntry>,
    pub intention: Option<RatePairEntry>,
    #[serde(rename = "KV")]
    pub kv: Option<RatePairEntry>,
    pub tenancy: Option<RatePairEntry>,
    pub prepared_query: Option<RatePairEntry>,
    pub session: Option<RatePairEntry>,
    pub txn: Option<RatePairEntry>,
    pub meta: BTreeMap<String, String>,
    pub create_index: u64,
    pub modify_index: u64,
    pub partition: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RatePairEntry {
    pub read_rate: f64,
    pub write_rate: f64,
}

/// Exported-services entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportedServicesEntry {
    pub name: String,
    pub services: Vec<ExportedServiceEntry>,
    pub meta: BTreeMap<String, String>,
    pub create_index: u64,
    pub modify_index: u64,
    pub partition: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportedServiceEntry {
    pub name: String,
    pub namespace: String,
    pub consumers: Vec<ServiceConsumerEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceConsumerEntry {
    pub partition: String,
    pub peer: String,
    pub sameness_group: String,
}

/// Ingress-gateway entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IngressGatewayEntry {
    pub name: String,
    #[serde(rename = "TLS")]
    pub tls: GatewayTlsEntry,
    pub listeners: Vec<IngressListenerEntry>,
    pub defaults: Option<ServiceLimitsEntry>,
    pub meta: BTreeMap<String, String>,
    pub create_index: u64,
    pub modify_index: u64,
    pub partition: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayTlsEntry {
    pub enabled: bool,
    #[serde(rename = "SDS")]
    pub sds: Option<GatewayTlsSdsEntry>,
    #[serde(rename = "TLSMinVersion")]
    pub tls_min_version: String,
    #[serde(rename = "TLSMaxVersion")]
    pub tls_max_version: String,
    pub cipher_suites: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayTlsSdsEntry {
    pub cluster_name: String,
    pub cert_resource: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GatewayServiceTlsEntry {
    #[serde(rename = "SDS")]
    pub sds: Option<GatewayTlsSdsEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IngressListenerEntry {
    pub port: u16,
    pub protocol: String,
    #[serde(rename = "TLS")]
    pub tls: Option<GatewayTlsEntry>,
    pub services: Vec<IngressServiceEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IngressServiceEntry {
    pub name: String,
    pub hosts: Vec<String>,
    pub namespace: String,
    pub partition: String,
    #[serde(rename = "TLS")]
    pub tls: Option<GatewayServiceTlsEntry>,
    pub request_headers: Option<HeaderModifiersEntry>,
    pub response_headers: Option<HeaderModifiersEntry>,
    pub max_connections: Option<u32>,
    pub max_pending_requests: Option<u32>,
    pub max_concurrent_requests: Option<u32>,
    pub passive_health_check: Option<PassiveHealthCheckEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceLimitsEntry {
    pub max_connections: Option<u32>,
    pub max_pending_requests: Option<u32>,
    pub max_concurrent_requests: Option<u32>,
    pub passive_health_check: Option<PassiveHealthCheckEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PassiveHealthCheckEntry {
    pub interval: String,
    pub max_failures: u32,
    #[serde(rename = "EnforcingConsecutive5xx")]
    pub enforcing_consecutive_5xx: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HeaderModifiersEntry {
    pub add: BTreeMap<String, String>,
    pub set: BTreeMap<String, String>,
    pub remove: Vec<String>,
}

/// Terminating-gateway entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TerminatingGatewayEntry {
    pub name: String,
    pub services: Vec<LinkedServiceEntry>,
    pub meta: BTreeMap<String, String>,
    pub create_index: u64,
    pub modify_index: u64,
    pub partition: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LinkedServiceEntry {
    pub namespace: String,
    pub name: String,
    #[serde(rename = "CAFile")]
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
    #[serde(rename = "SNI")]
    pub sni: String,
    pub disable_auto_host_rewrite: bool,
}

/// Sameness-group entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SamenessGroupEntry {
    pub name: String,
    pub default_for_failover: bool,
    pub include_local: bool,
    pub members: Vec<SamenessMemberEntry>,
    pub meta: BTreeMap<String, String>,
    pub create_index: u64,
    pub modify_index: u64,
    pub partition: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SamenessMemberEntry {
    pub partition: String,
    pub peer: String,
}

/// Normalize a tenancy value where the server treats the empty string and
/// the explicit "default" token as the same thing.
pub fn normalize_empty_to_default(value: &mut String) {
    if value.is_empty() {
        *value = "default".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_meta() {
        let meta = provenance("dc1");
        assert_eq!(meta.get(SOURCE_KEY).unwrap(), SOURCE_VALUE);
        assert_eq!(meta.get(DATACENTER_KEY).unwrap(), "dc1");
    }

    #[test]
    fn test_clear_volatile_resets_server_fields() {
        let mut entry = ExportedServicesEntry {
            name: "default".to_string(),
            meta: provenance("dc1"),
            create_index: 10,
            modify_index: 42,
            partition: "default".to_string(),
            ..Default::default()
        };
        entry.clear_volatile();
        assert!(entry.meta.is_empty());
        assert_eq!(entry.modify_index, 0);
        assert_eq!(entry.partition, "");
        assert_eq!(entry.name, "default");
    }

    #[test]
    fn test_kind_discriminator() {
        let entry = ConfigEntry::SamenessGroup(SamenessGroupEntry::default());
        assert_eq!(entry.kind(), EntryKind::SamenessGroup);
        assert_eq!(entry.kind().as_str(), "sameness-group");
    }

    #[test]
    fn test_normalize_empty_to_default() {
        let mut value = String::new();
        normalize_empty_to_default(&mut value);
        assert_eq!(value, "default");

        let mut value = "team-a".to_string();
        normalize_empty_to_default(&mut value);
        assert_eq!(value, "team-a");
    }
}
