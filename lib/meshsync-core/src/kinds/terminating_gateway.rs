use meshsync_api::v1alpha1::TerminatingGateway;

use crate::capabilities::Capabilities;
use crate::entry::{provenance, ConfigEntry, EntryKind, LinkedServiceEntry, TerminatingGatewayEntry};
use crate::error::InvalidResourceError;
use crate::path::FieldPath;
use crate::resource::ConfigEntryResource;
use crate::rules::ErrorList;

impl ConfigEntryResource for TerminatingGateway {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::TerminatingGateway
    }

    fn entry_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn kube_kind(&self) -> &'static str {
        "terminatinggateway"
    }

    fn validate(&self, caps: &Capabilities) -> Result<(), InvalidResourceError> {
        let mut errors = ErrorList::new();
        let path = FieldPath::new("spec");

        for (i, service) in self.spec.services.iter().enumerate() {
            let has_cert = !service.cert_file.is_empty();
            let has_key = !service.key_file.is_empty();
            if has_cert != has_key {
                errors.push(
                    path.child("services").index(i),
                    service,
                    "if certFile or keyFile is set, the other must also be set",
                );
            }
        }
        if !caps.namespaces_enabled {
            for (i, service) in self.spec.services.iter().enumerate() {
                if !service.namespace.is_empty() {
                    errors.push(
                        path.child("services").index(i).child("namespace"),
                        &service.namespace,
                        "namespaces must be enabled to set service.namespace",
                    );
                }
            }
        }

        errors.into_result(self.kube_kind(), self.entry_name())
    }

    fn default_namespace_fields(&mut self, caps: &Capabilities) {
        if !caps.namespaces_enabled {
            return;
        }
        let resource_namespace = self.metadata.namespace.clone().unwrap_or_default();
        let namespace = caps.resolve_namespace(&resource_namespace);
        for service in &mut self.spec.services {
            if service.namespace.is_empty() {
                service.namespace = namespace.clone();
            }
        }
    }

    fn to_entry(&self, datacenter: &str) -> ConfigEntry {
        let services = self
            .spec
            .services
            .iter()
            .map(|service| LinkedServiceEntry {
                namespace: service.namespace.clone(),
                name: service.name.clone(),
                ca_file: service.ca_file.clone(),
                cert_file: service.cert_file.clone(),
                key_file: service.key_file.clone(),
                sni: service.sni.clone(),
                disable_auto_host_rewrite: service.disable_auto_host_rewrite,
            })
            .collect();
        ConfigEntry::TerminatingGateway(TerminatingGatewayEntry {
            name: self.entry_name().to_string(),
            services,
            meta: provenance(datacenter),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_api::v1alpha1::{LinkedService, TerminatingGatewaySpec};

    fn gateway(services: Vec<LinkedService>) -> TerminatingGateway {
        TerminatingGateway::new("gateway", TerminatingGatewaySpec { services })
    }

    fn service(name: &str) -> LinkedService {
        LinkedService {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_gateway() {
        let mut secured = service("db");
        secured.cert_file = "/etc/certs/db.crt".to_string();
        secured.key_file = "/etc/certs/db.key".to_string();
        let gateway = gateway(vec![service("billing"), secured]);
        assert!(gateway.validate(&Capabilities::default()).is_ok());
    }

    #[test]
    fn test_cert_without_key() {
        let mut broken = service("db");
        broken.cert_file = "/etc/certs/db.crt".to_string();
        let gateway = gateway(vec![broken]);
        let err = gateway.validate(&Capabilities::default()).unwrap_err();
        assert_eq!(err.errors[0].path.to_string(), "spec.services[0]");
        assert_eq!(
            err.errors[0].message,
            "if certFile or keyFile is set, the other must also be set"
        );
    }

    #[test]
    fn test_key_without_cert() {
        let mut broken = service("db");
        broken.key_file = "/etc/certs/db.key".to_string();
        let err = gateway(vec![broken])
            .validate(&Capabilities::default())
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_namespace_requires_capability() {
        let mut scoped = service("db");
        scoped.namespace = "data".to_string();
        let err = gateway(vec![scoped])
            .validate(&Capabilities::default())
            .unwrap_err();
        assert_eq!(
            err.errors[0].message,
            "namespaces must be enabled to set service.namespace"
        );
    }

    #[test]
    fn test_namespace_defaulting() {
        let mut gateway = gateway(vec![service("db")]);
        gateway.metadata.namespace = Some("apps".to_string());
        let caps = Capabilities {
            namespaces_enabled: true,
            destination_namespace: "shared".to_string(),
            ..Default::default()
        };
        gateway.default_namespace_fields(&caps);
        assert_eq!(gateway.spec.services[0].namespace, "shared");
    }

    #[test]
    fn test_matches_entry() {
        let gateway = gateway(vec![service("db")]);
        let ConfigEntry::TerminatingGateway(mut entry) = gateway.to_entry("dc1") else {
            panic!("wrong kind");
        };
        entry.create_index = 3;
        assert!(gateway.matches_entry(&ConfigEntry::TerminatingGateway(entry)));

        let ConfigEntry::TerminatingGateway(mut drifted) = gateway.to_entry("") else {
            panic!("wrong kind");
        };
        drifted.services[0].sni = "db.example.com".to_string();
        assert!(!gateway.matches_entry(&ConfigEntry::TerminatingGateway(drifted)));
    }
}
