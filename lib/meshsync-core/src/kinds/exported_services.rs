use meshsync_api::v1alpha1::{ExportedService, ExportedServices, ServiceConsumer};

use crate::capabilities::Capabilities;
use crate::entry::{
    normalize_empty_to_default, provenance, ConfigEntry, EntryKind, ExportedServiceEntry,
    ExportedServicesEntry, ServiceConsumerEntry,
};
use crate::error::InvalidResourceError;
use crate::path::FieldPath;
use crate::resource::ConfigEntryResource;
use crate::rules::{check_partition_identity, ErrorList, WILDCARD};

fn validate_service(
    errors: &mut ErrorList,
    path: FieldPath,
    service: &ExportedService,
    caps: &Capabilities,
) {
    if service.consumers.is_empty() {
        errors.push(path.clone(), &service.consumers, "service must have at least 1 consumer.");
    }
    if !caps.namespaces_enabled && !service.namespace.is_empty() {
        errors.push(
            path.clone(),
            &service.namespace,
            "namespaces must be enabled to specify service namespace",
        );
    }
    for (i, consumer) in service.consumers.iter().enumerate() {
        validate_consumer(errors, path.child("consumers").index(i), consumer, caps);
    }
}

/// At most one violation is reported per consumer; the selector-count rules
/// subsume the rest.
fn validate_consumer(
    errors: &mut ErrorList,
    path: FieldPath,
    consumer: &ServiceConsumer,
    caps: &Capabilities,
) {
    let count = [&consumer.partition, &consumer.peer, &consumer.sameness_group]
        .iter()
        .filter(|v| !v.is_empty())
        .count();
    if count > 1 {
        errors.push(
            path,
            consumer,
            "service consumer must define at most one of Peer, Partition, or SamenessGroup",
        );
    } else if count == 0 {
        errors.push(
            path,
            consumer,
            "service consumer must define at least one of Peer, Partition, or SamenessGroup",
        );
    } else if !caps.partitions_enabled && !consumer.partition.is_empty() {
        errors.push(
            path.child("partition"),
            &consumer.partition,
            "admin partitions must be enabled to specify partition",
        );
    } else if consumer.partition == WILDCARD {
        errors.push_raw(
            path.child("partition"),
            "\"\"".to_string(),
            "exporting to all partitions (wildcard) is not supported",
        );
    } else if consumer.peer == WILDCARD {
        errors.push_raw(
            path.child("peer"),
            "\"\"".to_string(),
            "exporting to all peers (wildcard) is not supported",
        );
    } else if consumer.sameness_group == WILDCARD {
        errors.push_raw(
            path.child("samenessgroup"),
            "\"\"".to_string(),
            "exporting to all sameness groups (wildcard) is not supported",
        );
    }
}

impl ConfigEntryResource for ExportedServices {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::ExportedServices
    }

    fn entry_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn kube_kind(&self) -> &'static str {
        "exportedservices"
    }

    fn validate(&self, caps: &Capabilities) -> Result<(), InvalidResourceError> {
        let mut errors = ErrorList::new();
        check_partition_identity(&mut errors, self.kube_kind(), self.entry_name(), caps);

        if self.spec.services.is_empty() {
            errors.push(
                FieldPath::new("spec").child("services"),
                &self.spec.services,
                "at least one service must be exported",
            );
        }
        for (i, service) in self.spec.services.iter().enumerate() {
            let path = FieldPath::new("spec").child("services").index(i);
            validate_service(&mut errors, path, service, caps);
        }
        errors.into_result(self.kube_kind(), self.entry_name())
    }

    fn to_entry(&self, datacenter: &str) -> ConfigEntry {
        let services = self
            .spec
            .services
            .iter()
            .map(|service| ExportedServiceEntry {
                name: service.name.clone(),
                namespace: service.namespace.clone(),
                consumers: service
                    .consumers
                    .iter()
                    .map(|consumer| ServiceConsumerEntry {
                        partition: consumer.partition.clone(),
                        peer: consumer.peer.clone(),
                        sameness_group: consumer.sameness_group.clone(),
                    })
                    .collect(),
            })
            .collect();
        ConfigEntry::ExportedServices(ExportedServicesEntry {
            name: self.entry_name().to_string(),
            services,
            meta: provenance(datacenter),
            ..Default::default()
        })
    }

    /// The server back-fills consumer partitions with "default"; treat the
    /// empty string the same way on both sides.
    fn normalize(&self, entry: &mut ConfigEntry) {
        if let ConfigEntry::ExportedServices(entry) = entry {
            for service in &mut entry.services {
                for consumer in &mut service.consumers {
                    normalize_empty_to_default(&mut consumer.partition);
                }
            }
        }
    }
}
