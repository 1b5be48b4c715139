use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// RateLimitPolicy configures request rate limits applied by the mesh
/// control plane, globally and per subsystem category
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "RateLimitPolicy",
    plural = "ratelimitpolicies",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitPolicySpec {
    /// Mode determines how rate limiting is applied.
    /// One of "permissive", "enforcing" or "disabled".
    #[serde(default)]
    pub mode: String,

    /// Global read/write rates, applied when no per-subsystem rate matches.
    #[serde(flatten)]
    pub rates: ReadWriteRates,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_entry: Option<ReadWriteRates>,

    #[serde(rename = "connectCA", skip_serializing_if = "Option::is_none")]
    pub connect_ca: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery_chain: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intention: Option<ReadWriteRates>,

    #[serde(rename = "kv", skip_serializing_if = "Option::is_none")]
    pub kv: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_query: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ReadWriteRates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn: Option<ReadWriteRates>,
}

/// A pair of read/write rate limits, in operations per second.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadWriteRates {
    /// Maximum read rate. Must be >= 0.
    #[serde(default)]
    pub read_rate: f64,

    /// Maximum write rate. Must be > 0.
    #[serde(default)]
    pub write_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_flatten_inline() {
        let spec = RateLimitPolicySpec {
            mode: "permissive".to_string(),
            rates: ReadWriteRates {
                read_rate: 100.0,
                write_rate: 50.0,
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["readRate"], 100.0);
        assert_eq!(json["writeRate"], 50.0);
        assert!(json.get("rates").is_none());
    }

    #[test]
    fn test_subsystem_blocks_omitted_when_unset() {
        let json = serde_json::to_value(RateLimitPolicySpec::default()).unwrap();
        assert!(json.get("acl").is_none());
        assert!(json.get("connectCA").is_none());
    }
}
