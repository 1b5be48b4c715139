use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// SamenessGroup declares a set of partitions and peers whose same-named
/// services are considered identical
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "SamenessGroup",
    plural = "samenessgroups",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct SamenessGroupSpec {
    /// DefaultForFailover indicates that upstream requests to members of
    /// this group will implicitly fail over between members. When true the
    /// local partition must be a member of the group or IncludeLocal must
    /// be set.
    #[serde(default)]
    pub default_for_failover: bool,

    /// IncludeLocal includes the local partition as the first member of
    /// the group. The local partition can only be a member of a single
    /// sameness group.
    #[serde(default)]
    pub include_local: bool,

    /// Members are the partitions and peers that are part of the group.
    /// Members that do not exist are ignored.
    #[serde(default)]
    pub members: Vec<SamenessGroupMember>,
}

/// A single member of a sameness group. A member cannot set both peer and
/// partition at the same time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SamenessGroupMember {
    /// Partition that is part of the sameness group.
    #[serde(default)]
    pub partition: String,

    /// Peer that is part of the sameness group.
    #[serde(default)]
    pub peer: String,
}

impl SamenessGroupMember {
    /// Returns true if neither partition nor peer is set.
    pub fn is_empty(&self) -> bool {
        self.partition.is_empty() && self.peer.is_empty()
    }
}
