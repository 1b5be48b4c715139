use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// ExportedServices manages the exporting of services in the local
/// partition to other partitions, peers and sameness groups
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "ExportedServices",
    plural = "exportedservices",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct ExportedServicesSpec {
    /// Services is the list of services to export and the consumers to
    /// expose them to.
    #[serde(default)]
    pub services: Vec<ExportedService>,
}

/// A single service exported from the local partition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportedService {
    /// Name of the service to be exported.
    #[serde(default)]
    pub name: String,

    /// Namespace to export the service from.
    /// Namespacing is an enterprise feature.
    #[serde(default)]
    pub namespace: String,

    /// Consumers is the list of downstream consumers of the service.
    #[serde(default)]
    pub consumers: Vec<ServiceConsumer>,
}

/// A downstream consumer of an exported service. Exactly one of the
/// selectors must be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConsumer {
    /// Partition is the admin partition to export the service to.
    #[serde(default)]
    pub partition: String,

    /// Peer is the name of the peer to export the service to.
    #[serde(default)]
    pub peer: String,

    /// SamenessGroup is the name of the sameness group to export the
    /// service to.
    #[serde(default)]
    pub sameness_group: String,
}
