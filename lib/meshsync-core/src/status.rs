//! Synced condition bookkeeping shared by every resource kind
use chrono::Utc;

use meshsync_api::v1alpha1::status::{Condition, ConditionStatus, Status, CONDITION_SYNCED};

/// Access to the status block plus the provided Synced condition helpers.
///
/// The condition list holds at most the single Synced condition; setting it
/// replaces the list wholesale.
pub trait SyncStatus {
    fn sync_status(&self) -> &Status;
    fn sync_status_mut(&mut self) -> &mut Status;

    /// Replace the Synced condition, stamping the transition time with the
    /// current wall clock.
    fn set_synced_condition(&mut self, status: ConditionStatus, reason: &str, message: &str) {
        self.sync_status_mut().conditions = vec![Condition {
            r#type: CONDITION_SYNCED.to_string(),
            status,
            last_transition_time: Some(Utc::now()),
            reason: reason.to_string(),
            message: message.to_string(),
        }];
    }

    /// Record the moment the resource was last successfully written out.
    fn set_last_synced_time(&mut self) {
        self.sync_status_mut().last_synced_time = Some(Utc::now());
    }

    /// The current Synced condition as (status, reason, message). A missing
    /// condition reads as Unknown with empty reason and message.
    fn synced_condition(&self) -> (ConditionStatus, String, String) {
        match self.sync_status().get_condition(CONDITION_SYNCED) {
            Some(cond) => (cond.status, cond.reason.clone(), cond.message.clone()),
            None => (ConditionStatus::Unknown, String::new(), String::new()),
        }
    }

    fn synced_condition_status(&self) -> ConditionStatus {
        self.synced_condition().0
    }
}

/// Wire the trait to the generated resource types, whose status block is
/// `Option<Status>` and lazily materialized on first write.
macro_rules! impl_sync_status {
    ($($resource:ty),* $(,)?) => {
        $(impl SyncStatus for $resource {
            fn sync_status(&self) -> &Status {
                static EMPTY: std::sync::OnceLock<Status> = std::sync::OnceLock::new();
                self.status
                    .as_ref()
                    .unwrap_or_else(|| EMPTY.get_or_init(Status::default))
            }

            fn sync_status_mut(&mut self) -> &mut Status {
                self.status.get_or_insert_with(Status::default)
            }
        })*
    };
}

impl_sync_status!(
    meshsync_api::v1alpha1::RateLimitPolicy,
    meshsync_api::v1alpha1::ExportedServices,
    meshsync_api::v1alpha1::IngressGateway,
    meshsync_api::v1alpha1::TerminatingGateway,
    meshsync_api::v1alpha1::SamenessGroup,
    meshsync_api::v1alpha1::CatalogRegistration,
    meshsync_api::v1alpha1::CatalogServiceLink,
);

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_api::v1alpha1::{ExportedServices, ExportedServicesSpec};

    fn resource() -> ExportedServices {
        ExportedServices::new("default", ExportedServicesSpec::default())
    }

    #[test]
    fn test_missing_condition_reads_unknown() {
        let resource = resource();
        let (status, reason, message) = resource.synced_condition();
        assert_eq!(status, ConditionStatus::Unknown);
        assert_eq!(reason, "");
        assert_eq!(message, "");
    }

    #[test]
    fn test_set_condition_replaces_wholesale() {
        let mut resource = resource();
        resource.set_synced_condition(
            ConditionStatus::False,
            "InternalError",
            "write failed",
        );
        resource.set_synced_condition(ConditionStatus::True, "", "");

        let status = resource.status.as_ref().unwrap();
        assert_eq!(status.conditions.len(), 1);
        assert_eq!(resource.synced_condition_status(), ConditionStatus::True);
        assert!(status.conditions[0].last_transition_time.is_some());
    }

    #[test]
    fn test_last_synced_time() {
        let mut resource = resource();
        assert!(resource.sync_status().last_synced_time.is_none());
        resource.set_last_synced_time();
        assert!(resource.sync_status().last_synced_time.is_some());
    }
}
