//! Shared status subresource attached to every synchronized resource kind
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition type used to record the outcome of the last sync attempt.
pub const CONDITION_SYNCED: &str = "Synced";

/// Status of a condition, following the Kubernetes convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// A single observation of a resource's state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, currently only "Synced".
    pub r#type: String,

    /// Status: "True", "False", "Unknown".
    pub status: ConditionStatus,

    /// Last time the condition transitioned from one status to another.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason for the condition's last transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Human-readable message indicating details about the transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Observed sync state shared by all resource kinds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Conditions indicate the latest available observations of the
    /// resource's current state.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Last time the resource successfully synced with the mesh server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_time: Option<DateTime<Utc>>,
}

impl Status {
    /// Returns the condition with the given type, if present.
    pub fn get_condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.r#type == condition_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_condition_missing() {
        let status = Status::default();
        assert!(status.get_condition(CONDITION_SYNCED).is_none());
    }

    #[test]
    fn test_condition_serializes_camel_case() {
        let condition = Condition {
            r#type: CONDITION_SYNCED.to_string(),
            status: ConditionStatus::True,
            last_transition_time: None,
            reason: "Synced".to_string(),
            message: String::new(),
        };
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["type"], "Synced");
        assert_eq!(json["status"], "True");
        assert!(json.get("message").is_none());
    }
}
