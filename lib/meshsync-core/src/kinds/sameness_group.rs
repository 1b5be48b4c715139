use std::collections::HashSet;

use meshsync_api::v1alpha1::{SamenessGroup, SamenessGroupMember};

use crate::capabilities::Capabilities;
use crate::entry::{
    normalize_empty_to_default, provenance, ConfigEntry, EntryKind, SamenessGroupEntry,
    SamenessMemberEntry,
};
use crate::error::InvalidResourceError;
use crate::path::FieldPath;
use crate::resource::ConfigEntryResource;
use crate::rules::ErrorList;

fn validate_member(errors: &mut ErrorList, path: FieldPath, member: &SamenessGroupMember) {
    if member.is_empty() {
        errors.push(
            path,
            member,
            "sameness group members must specify either partition or peer",
        );
    } else if !member.peer.is_empty() && !member.partition.is_empty() {
        errors.push(
            path,
            member,
            "sameness group members cannot specify both partition and peer in the same entry",
        );
    }
}

impl ConfigEntryResource for SamenessGroup {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::SamenessGroup
    }

    fn entry_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn kube_kind(&self) -> &'static str {
        "samenessgroup"
    }

    fn validate(&self, caps: &Capabilities) -> Result<(), InvalidResourceError> {
        let mut errors = ErrorList::new();
        let path = FieldPath::new("spec");

        if self.entry_name().is_empty() {
            errors.push(
                path.child("name"),
                &self.entry_name(),
                "sameness groups must have a name defined",
            );
        }

        let resource_namespace = self.metadata.namespace.as_deref().unwrap_or_default();
        if !resource_namespace.is_empty() && resource_namespace != "default" {
            errors.push(
                path.child("name"),
                &caps.destination_namespace,
                "sameness groups must reside in the default namespace",
            );
        }

        if self.spec.members.is_empty() {
            errors.push(
                path.child("members"),
                &self.spec.members,
                "sameness groups must have at least one member",
            );
        }

        let mut includes_local = self.spec.include_local;
        let mut seen = HashSet::new();
        for (i, member) in self.spec.members.iter().enumerate() {
            if member.partition == caps.partition {
                includes_local = true;
            }
            validate_member(&mut errors, path.child("members").index(i), member);
            if !seen.insert(member) {
                errors.push(
                    path.child("members").index(i),
                    member,
                    "sameness group members must be unique",
                );
            }
        }

        if !includes_local {
            errors.push(
                path.child("members"),
                &self.spec.include_local,
                "the local partition must be a member of sameness groups",
            );
        }

        errors.into_result(self.kube_kind(), self.entry_name())
    }

    fn to_entry(&self, datacenter: &str) -> ConfigEntry {
        let members = self
            .spec
            .members
            .iter()
            .map(|member| SamenessMemberEntry {
                partition: member.partition.clone(),
                peer: member.peer.clone(),
            })
            .collect();
        ConfigEntry::SamenessGroup(SamenessGroupEntry {
            name: self.entry_name().to_string(),
            default_for_failover: self.spec.default_for_failover,
            include_local: self.spec.include_local,
            members,
            meta: provenance(datacenter),
            ..Default::default()
        })
    }

    /// The server back-fills member partitions with "default"; treat the
    /// empty string the same way on both sides.
    fn normalize(&self, entry: &mut ConfigEntry) {
        if let ConfigEntry::SamenessGroup(entry) = entry {
            for member in &mut entry.members {
                normalize_empty_to_default(&mut member.partition);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_api::v1alpha1::SamenessGroupSpec;

    fn group(name: &str, spec: SamenessGroupSpec) -> SamenessGroup {
        SamenessGroup::new(name, spec)
    }

    fn partition_member(partition: &str) -> SamenessGroupMember {
        SamenessGroupMember {
            partition: partition.to_string(),
            ..Default::default()
        }
    }

    fn peer_member(peer: &str) -> SamenessGroupMember {
        SamenessGroupMember {
            peer: peer.to_string(),
            ..Default::default()
        }
    }

    fn local_caps() -> Capabilities {
        Capabilities {
            partitions_enabled: true,
            partition: "default".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_group() {
        let group = group(
            "region",
            SamenessGroupSpec {
                members: vec![partition_member("default"), peer_member("east")],
                ..Default::default()
            },
        );
        assert!(group.validate(&local_caps()).is_ok());
    }

    #[test]
    fn test_requires_members() {
        let group = group("region", SamenessGroupSpec::default());
        let err = group.validate(&local_caps()).unwrap_err();
        let messages: Vec<_> = err.errors.iter().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"sameness groups must have at least one member"));
        assert!(messages.contains(&"the local partition must be a member of sameness groups"));
    }

    #[test]
    fn test_include_local_satisfies_membership() {
        let group = group(
            "region",
            SamenessGroupSpec {
                include_local: true,
                members: vec![peer_member("east")],
                ..Default::default()
            },
        );
        assert!(group.validate(&local_caps()).is_ok());
    }

    #[test]
    fn test_member_with_both_selectors() {
        let group = group(
            "region",
            SamenessGroupSpec {
                members: vec![
                    partition_member("default"),
                    SamenessGroupMember {
                        partition: "other".to_string(),
                        peer: "east".to_string(),
                    },
                ],
                ..Default::default()
            },
        );
        let err = group.validate(&local_caps()).unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "sameness group members cannot specify both partition and peer in the same entry"
        );
    }

    #[test]
    fn test_empty_member() {
        let group = group(
            "region",
            SamenessGroupSpec {
                members: vec![partition_member("default"), SamenessGroupMember::default()],
                ..Default::default()
            },
        );
        let err = group.validate(&local_caps()).unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "sameness group members must specify either partition or peer"
        );
    }

    #[test]
    fn test_duplicate_members() {
        let group = group(
            "region",
            SamenessGroupSpec {
                members: vec![partition_member("default"), partition_member("default")],
                ..Default::default()
            },
        );
        let err = group.validate(&local_caps()).unwrap_err();
        assert_eq!(err.errors[0].path.to_string(), "spec.members[1]");
        assert_eq!(err.errors[0].message, "sameness group members must be unique");
    }

    #[test]
    fn test_must_reside_in_default_namespace() {
        let mut group = group(
            "region",
            SamenessGroupSpec {
                members: vec![partition_member("default")],
                ..Default::default()
            },
        );
        group.metadata.namespace = Some("apps".to_string());
        let err = group.validate(&local_caps()).unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "sameness groups must reside in the default namespace"
        );
    }

    #[test]
    fn test_matches_entry_normalizes_partition() {
        let group = group(
            "region",
            SamenessGroupSpec {
                members: vec![partition_member("default"), peer_member("east")],
                ..Default::default()
            },
        );
        let ConfigEntry::SamenessGroup(mut entry) = group.to_entry("dc1") else {
            panic!("wrong kind");
        };
        entry.members[0].partition = String::new();
        entry.modify_index = 12;
        assert!(group.matches_entry(&ConfigEntry::SamenessGroup(entry)));
    }
}
