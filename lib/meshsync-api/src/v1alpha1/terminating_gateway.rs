use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// TerminatingGateway configures the services represented by a
/// terminating gateway
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "TerminatingGateway",
    plural = "terminatinggateways",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct TerminatingGatewaySpec {
    /// Services is the list of services represented by the terminating
    /// gateway.
    #[serde(default)]
    pub services: Vec<LinkedService>,
}

/// A service fronted by a terminating gateway.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedService {
    /// Namespace the service is registered in.
    /// Namespacing is an enterprise feature.
    #[serde(default)]
    pub namespace: String,

    /// Name of the service, as defined in the mesh catalog.
    #[serde(default)]
    pub name: String,

    /// Optional path to a CA certificate used for TLS connections from the
    /// gateway to the linked service.
    #[serde(default)]
    pub ca_file: String,

    /// Optional path to a client certificate used for TLS connections from
    /// the gateway to the linked service.
    #[serde(default)]
    pub cert_file: String,

    /// Optional path to a private key used for TLS connections from the
    /// gateway to the linked service.
    #[serde(default)]
    pub key_file: String,

    /// Optional server name to specify during the TLS handshake with the
    /// linked service.
    #[serde(default)]
    pub sni: String,

    /// Disables the gateway's automatic host rewrite feature when true.
    #[serde(default)]
    pub disable_auto_host_rewrite: bool,
}
