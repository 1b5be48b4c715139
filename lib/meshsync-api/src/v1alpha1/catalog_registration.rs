use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// CatalogRegistration registers a node, service and health check directly
/// in the mesh catalog
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "CatalogRegistration",
    plural = "catalogregistrations",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRegistrationSpec {
    /// ID of the node to register.
    #[serde(default)]
    pub id: String,

    /// Node name to register.
    #[serde(default)]
    pub node: String,

    /// Address to register.
    #[serde(default)]
    pub address: String,

    /// Tagged addresses of the node.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tagged_addresses: BTreeMap<String, String>,

    /// Arbitrary KV metadata pairs attached to the node, for filtering.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_meta: BTreeMap<String, String>,

    /// Datacenter to register in, defaulting to the agent's datacenter.
    #[serde(default)]
    pub datacenter: String,

    /// Service to register.
    #[serde(default)]
    pub service: CatalogService,

    /// SkipNodeUpdate skips updating the node's information in the
    /// registration.
    #[serde(default)]
    pub skip_node_update: bool,

    /// Partition is the admin partition the service is registered in.
    /// Partitioning is an enterprise feature.
    #[serde(default)]
    pub partition: String,

    /// Health check to register with the service.
    #[serde(rename = "check", skip_serializing_if = "Option::is_none")]
    pub health_check: Option<CatalogHealthCheck>,

    /// Locality of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<Locality>,
}

/// A service registered through the catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogService {
    /// ID of the service, defaulting to the service name when unset.
    #[serde(default)]
    pub id: String,

    /// Logical name of the service.
    #[serde(default)]
    pub name: String,

    /// Tags assigned to the service, exposed for later filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Arbitrary KV metadata linked to the service instance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,

    /// Port of the service.
    #[serde(default)]
    pub port: u16,

    /// Address of the service. If not provided the node address is used.
    #[serde(default)]
    pub address: String,

    /// Unix domain socket path the service listens on, mutually exclusive
    /// with port.
    #[serde(default)]
    pub socket_path: String,

    /// Explicit LAN and WAN addresses for the service instance.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tagged_addresses: BTreeMap<String, ServiceAddress>,

    /// Weights applied to the service during DNS responses.
    #[serde(default)]
    pub weights: ServiceWeights,

    /// Disables the anti-entropy feature for the service's tags when true.
    #[serde(default)]
    pub enable_tag_override: bool,

    /// Locality of the service instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<Locality>,

    /// Namespace the service is registered in.
    /// Namespacing is an enterprise feature.
    #[serde(default)]
    pub namespace: String,

    /// Admin partition the service is registered in.
    /// Partitioning is an enterprise feature.
    #[serde(default)]
    pub partition: String,
}

/// An address and port pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub port: u16,
}

/// DNS weights for a service in passing and warning states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWeights {
    #[serde(default)]
    pub passing: u32,
    #[serde(default)]
    pub warning: u32,
}

/// Region and zone of a node or service instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Locality {
    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub zone: String,
}

/// A single health check registered alongside the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogHealthCheck {
    /// Node the check is registered on.
    #[serde(default)]
    pub node: String,

    /// Unique ID of this check on the node.
    #[serde(default)]
    pub check_id: String,

    /// Name of the check.
    #[serde(default)]
    pub name: String,

    /// Initial status of the check. One of passing, warning, or critical.
    #[serde(default)]
    pub status: String,

    /// Opaque human-readable notes.
    #[serde(default)]
    pub notes: String,

    /// Output of the last check run.
    #[serde(default)]
    pub output: String,

    /// ID of the service this check is associated with.
    #[serde(default)]
    pub service_id: String,

    /// Name of the service this check is associated with.
    #[serde(default)]
    pub service_name: String,

    /// Type of the check.
    #[serde(default, rename = "type")]
    pub check_type: String,

    /// Exposed port associated with the check.
    #[serde(default)]
    pub exposed_port: u16,

    /// How the check is executed.
    #[serde(default)]
    pub definition: HealthCheckDefinition,

    /// Namespace the check is registered in.
    /// Namespacing is an enterprise feature.
    #[serde(default)]
    pub namespace: String,

    /// Admin partition the check is registered in.
    /// Partitioning is an enterprise feature.
    #[serde(default)]
    pub partition: String,
}

/// Details about a health check's execution. The three duration fields are
/// Go-style duration strings, e.g. "10s" or "1m30s".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckDefinition {
    /// URL to issue a GET request against every interval.
    #[serde(default)]
    pub http: String,

    /// Headers set for HTTP checks.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, Vec<String>>,

    /// HTTP method used for HTTP checks.
    #[serde(default)]
    pub method: String,

    /// Body sent with HTTP checks.
    #[serde(default)]
    pub body: String,

    /// SNI host used when connecting via TLS.
    #[serde(default, rename = "tlsServerName")]
    pub tls_server_name: String,

    /// Skips certificate verification for HTTPS checks when true.
    #[serde(default, rename = "tlsSkipVerify")]
    pub tls_skip_verify: bool,

    /// Host and port to open a TCP connection against every interval.
    #[serde(default)]
    pub tcp: String,

    /// Uses TLS for the TCP check when true.
    #[serde(default, rename = "tcpUseTLS")]
    pub tcp_use_tls: bool,

    /// Host and port to send a UDP datagram against every interval.
    #[serde(default)]
    pub udp: String,

    /// gRPC endpoint supporting the standard gRPC health protocol.
    #[serde(default)]
    pub grpc: String,

    /// Uses TLS for the gRPC check when true.
    #[serde(default, rename = "grpcUseTLS")]
    pub grpc_use_tls: bool,

    /// Operating-system service name to check.
    #[serde(default)]
    pub os_service: String,

    /// Frequency at which to run this check. Required for HTTP and TCP
    /// checks.
    #[serde(default)]
    pub interval_duration: String,

    /// Timeout for outgoing connections made by the check.
    #[serde(default)]
    pub timeout_duration: String,

    /// Deregisters the service after it has been critical for this long.
    #[serde(default)]
    pub deregister_critical_service_after_duration: String,
}
