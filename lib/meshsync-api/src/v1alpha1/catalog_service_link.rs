use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::catalog_registration::{CatalogHealthCheck, CatalogService};
use super::status::Status;

/// CatalogServiceLink registers an external service in the mesh catalog so
/// it can be fronted by a terminating gateway
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "CatalogServiceLink",
    plural = "catalogservicelinks",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct CatalogServiceLinkSpec {
    /// Registration holds the information needed to register or
    /// deregister the linked service.
    #[serde(rename = "service", skip_serializing_if = "Option::is_none")]
    pub registration: Option<LinkedRegistration>,
}

/// Node and service information for a linked catalog registration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedRegistration {
    /// Node name to register the linked service on.
    #[serde(default)]
    pub node: String,

    /// Address to register.
    #[serde(default)]
    pub address: String,

    /// Datacenter to register in, defaulting to the agent's datacenter.
    #[serde(default)]
    pub datacenter: String,

    /// Tagged addresses of the node.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tagged_addresses: BTreeMap<String, String>,

    /// Arbitrary KV metadata pairs attached to the node, for filtering.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_meta: BTreeMap<String, String>,

    /// Service to register.
    #[serde(default)]
    pub service: CatalogService,

    /// Health check registered with the linked service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CatalogHealthCheck>,

    /// SkipNodeUpdate skips updating the node's information in the
    /// registration.
    #[serde(default)]
    pub skip_node_update: bool,
}
