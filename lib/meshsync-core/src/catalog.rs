//! Conversion of catalog resources to mesh catalog API payloads
//!
//! CatalogRegistration and CatalogServiceLink register nodes and services
//! directly in the catalog rather than through the config-entry family, so
//! they sit outside the ConfigEntryResource machinery.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use meshsync_api::v1alpha1::{
    CatalogHealthCheck, CatalogRegistration, CatalogService, CatalogServiceLink, Locality,
    ServiceAddress,
};

use crate::error::{FieldError, InvalidResourceError, RegistrationError};
use crate::path::FieldPath;

/// Catalog registration request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CatalogRegistrationPayload {
    #[serde(rename = "ID")]
    pub id: String,
    pub node: String,
    pub address: String,
    pub tagged_addresses: BTreeMap<String, String>,
    pub node_meta: BTreeMap<String, String>,
    pub datacenter: String,
    pub service: ServicePayload,
    pub check: Option<CheckPayload>,
    pub skip_node_update: bool,
    pub partition: String,
    pub locality: Option<LocalityPayload>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServicePayload {
    #[serde(rename = "ID")]
    pub id: String,
    pub service: String,
    pub tags: Vec<String>,
    pub meta: BTreeMap<String, String>,
    pub port: u16,
    pub address: String,
    pub socket_path: String,
    pub tagged_addresses: BTreeMap<String, ServiceAddressPayload>,
    pub weights: WeightsPayload,
    pub enable_tag_override: bool,
    pub namespace: String,
    pub partition: String,
    pub locality: Option<LocalityPayload>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceAddressPayload {
    pub address: String,
    pub port: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WeightsPayload {
    pub passing: u32,
    pub warning: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LocalityPayload {
    pub region: String,
    pub zone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CheckPayload {
    pub node: String,
    #[serde(rename = "CheckID")]
    pub check_id: String,
    pub name: String,
    pub status: String,
    pub notes: String,
    pub output: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    pub service_name: String,
    #[serde(rename = "Type")]
    pub check_type: String,
    pub exposed_port: u16,
    pub definition: CheckDefinitionPayload,
    pub namespace: String,
    pub partition: String,
}

/// Check definition with durations in nanoseconds, matching the catalog
/// API's wire encoding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CheckDefinitionPayload {
    #[serde(rename = "HTTP")]
    pub http: String,
    pub header: BTreeMap<String, Vec<String>>,
    pub method: String,
    pub body: String,
    #[serde(rename = "TLSServerName")]
    pub tls_server_name: String,
    #[serde(rename = "TLSSkipVerify")]
    pub tls_skip_verify: bool,
    #[serde(rename = "TCP")]
    pub tcp: String,
    #[serde(rename = "TCPUseTLS")]
    pub tcp_use_tls: bool,
    #[serde(rename = "UDP")]
    pub udp: String,
    #[serde(rename = "GRPC")]
    pub grpc: String,
    #[serde(rename = "GRPCUseTLS")]
    pub grpc_use_tls: bool,
    #[serde(rename = "OSService")]
    pub os_service: String,
    pub interval_duration: u64,
    pub timeout_duration: u64,
    pub deregister_critical_service_after_duration: u64,
}

/// Catalog deregistration request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CatalogDeregistrationPayload {
    pub node: String,
    pub address: String,
    pub datacenter: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    #[serde(rename = "CheckID")]
    pub check_id: String,
    pub namespace: String,
    pub partition: String,
}

/// Parse a Go-style duration string ("250ms", "10s", "1m30s", "1h") into
/// nanoseconds. Returns None for anything Go's parser would reject.
pub fn parse_go_duration(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut total: f64 = 0.0;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let value: f64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        let (multiplier, len) = if rest.starts_with("ns") {
            (1.0, 2)
        } else if rest.starts_with("us") {
            (1_000.0, 2)
        } else if rest.starts_with("ms") {
            (1_000_000.0, 2)
        } else if rest.starts_with('s') {
            (1_000_000_000.0, 1)
        } else if rest.starts_with('m') {
            (60.0 * 1_000_000_000.0, 1)
        } else if rest.starts_with('h') {
            (3600.0 * 1_000_000_000.0, 1)
        } else {
            return None;
        };
        rest = &rest[len..];
        total += value * multiplier;
    }
    Some(total as u64)
}

fn service_payload(service: &CatalogService) -> ServicePayload {
    ServicePayload {
        id: service.id.clone(),
        service: service.name.clone(),
        tags: service.tags.clone(),
        meta: service.meta.clone(),
        port: service.port,
        address: service.address.clone(),
        socket_path: service.socket_path.clone(),
        tagged_addresses: service
            .tagged_addresses
            .iter()
            .map(|(k, v)| (k.clone(), service_address_payload(v)))
            .collect(),
        weights: WeightsPayload {
            passing: service.weights.passing,
            warning: service.weights.warning,
        },
        enable_tag_override: service.enable_tag_override,
        namespace: service.namespace.clone(),
        partition: service.partition.clone(),
        locality: service.locality.as_ref().map(locality_payload),
    }
}

fn service_address_payload(address: &ServiceAddress) -> ServiceAddressPayload {
    ServiceAddressPayload {
        address: address.address.clone(),
        port: address.port,
    }
}

fn locality_payload(locality: &Locality) -> LocalityPayload {
    LocalityPayload {
        region: locality.region.clone(),
        zone: locality.zone.clone(),
    }
}

fn check_payload(check: &CatalogHealthCheck) -> Result<CheckPayload, RegistrationError> {
    let definition = &check.definition;
    let interval = parse_go_duration(&definition.interval_duration)
        .ok_or(RegistrationError::InvalidInterval)?;
    let timeout = parse_go_duration(&definition.timeout_duration)
        .ok_or(RegistrationError::InvalidTimeout)?;
    let deregister_after =
        parse_go_duration(&definition.deregister_critical_service_after_duration)
            .ok_or(RegistrationError::InvalidDeregisterAfter)?;

    Ok(CheckPayload {
        node: check.node.clone(),
        check_id: check.check_id.clone(),
        name: check.name.clone(),
        status: check.status.clone(),
        notes: check.notes.clone(),
        output: check.output.clone(),
        service_id: check.service_id.clone(),
        service_name: check.service_name.clone(),
        check_type: check.check_type.clone(),
        exposed_port: check.exposed_port,
        definition: CheckDefinitionPayload {
            http: definition.http.clone(),
            header: definition.header.clone(),
            method: definition.method.clone(),
            body: definition.body.clone(),
            tls_server_name: definition.tls_server_name.clone(),
            tls_skip_verify: definition.tls_skip_verify,
            tcp: definition.tcp.clone(),
            tcp_use_tls: definition.tcp_use_tls,
            udp: definition.udp.clone(),
            grpc: definition.grpc.clone(),
            grpc_use_tls: definition.grpc_use_tls,
            os_service: definition.os_service.clone(),
            interval_duration: interval,
            timeout_duration: timeout,
            deregister_critical_service_after_duration: deregister_after,
        },
        namespace: check.namespace.clone(),
        partition: check.partition.clone(),
    })
}

/// Conversions for direct catalog registrations.
pub trait CatalogResource {
    fn to_catalog_registration(&self) -> Result<CatalogRegistrationPayload, RegistrationError>;
    fn to_catalog_deregistration(&self) -> CatalogDeregistrationPayload;
}

impl CatalogResource for CatalogRegistration {
    fn to_catalog_registration(&self) -> Result<CatalogRegistrationPayload, RegistrationError> {
        let spec = &self.spec;
        let check = spec.health_check.as_ref().map(check_payload).transpose()?;
        Ok(CatalogRegistrationPayload {
            id: spec.id.clone(),
            node: spec.node.clone(),
            address: spec.address.clone(),
            tagged_addresses: spec.tagged_addresses.clone(),
            node_meta: spec.node_meta.clone(),
            datacenter: spec.datacenter.clone(),
            service: service_payload(&spec.service),
            check,
            skip_node_update: spec.skip_node_update,
            partition: spec.partition.clone(),
            locality: spec.locality.as_ref().map(locality_payload),
        })
    }

    fn to_catalog_deregistration(&self) -> CatalogDeregistrationPayload {
        let spec = &self.spec;
        CatalogDeregistrationPayload {
            node: spec.node.clone(),
            address: spec.address.clone(),
            datacenter: spec.datacenter.clone(),
            service_id: spec.service.id.clone(),
            check_id: spec
                .health_check
                .as_ref()
                .map(|check| check.check_id.clone())
                .unwrap_or_default(),
            namespace: spec.service.namespace.clone(),
            partition: spec.service.partition.clone(),
        }
    }
}

impl CatalogResource for CatalogServiceLink {
    fn to_catalog_registration(&self) -> Result<CatalogRegistrationPayload, RegistrationError> {
        let Some(registration) = &self.spec.registration else {
            return Ok(CatalogRegistrationPayload::default());
        };
        let check = registration.check.as_ref().map(check_payload).transpose()?;
        Ok(CatalogRegistrationPayload {
            node: registration.node.clone(),
            address: registration.address.clone(),
            datacenter: registration.datacenter.clone(),
            tagged_addresses: registration.tagged_addresses.clone(),
            node_meta: registration.node_meta.clone(),
            service: service_payload(&registration.service),
            check,
            skip_node_update: registration.skip_node_update,
            ..Default::default()
        })
    }

    fn to_catalog_deregistration(&self) -> CatalogDeregistrationPayload {
        let Some(registration) = &self.spec.registration else {
            return CatalogDeregistrationPayload::default();
        };
        CatalogDeregistrationPayload {
            node: registration.node.clone(),
            address: registration.address.clone(),
            datacenter: registration.datacenter.clone(),
            service_id: registration.service.id.clone(),
            check_id: registration
                .check
                .as_ref()
                .map(|check| check.check_id.clone())
                .unwrap_or_default(),
            namespace: registration.service.namespace.clone(),
            partition: registration.service.partition.clone(),
        }
    }
}

/// Spec drift detection for registrations, ignoring the status block.
pub fn equal_except_status(a: &CatalogRegistration, b: &CatalogRegistration) -> bool {
    a.spec == b.spec
}

/// Structural checks for a service link before it is written to the
/// catalog. Unlike config-entry validation the missing-registration case
/// masks the nested rules, so this returns on the first failure.
pub fn validate_service_link(link: &CatalogServiceLink) -> Result<(), InvalidResourceError> {
    let kind = "catalogservicelink";
    let name = link.metadata.name.as_deref().unwrap_or_default();
    let path = FieldPath::new("spec").child("service");

    let Some(registration) = &link.spec.registration else {
        return Err(InvalidResourceError::new(
            kind,
            name,
            vec![FieldError {
                path,
                value: "null".to_string(),
                message: "registration must be defined".to_string(),
            }],
        ));
    };
    if registration.node.is_empty() {
        return Err(InvalidResourceError::new(
            kind,
            name,
            vec![FieldError {
                path: path.child("node"),
                value: "\"\"".to_string(),
                message: "node must be defined".to_string(),
            }],
        ));
    }
    if registration.service.name.is_empty() {
        return Err(InvalidResourceError::new(
            kind,
            name,
            vec![FieldError {
                path: path.child("service").child("name"),
                value: "\"\"".to_string(),
                message: "service name must be defined".to_string(),
            }],
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_api::v1alpha1::{
        CatalogRegistrationSpec, CatalogServiceLinkSpec, HealthCheckDefinition,
        LinkedRegistration,
    };

    const NANOS_PER_SEC: u64 = 1_000_000_000;

    #[test]
    fn test_parse_go_duration() {
        assert_eq!(parse_go_duration("10s"), Some(10 * NANOS_PER_SEC));
        assert_eq!(parse_go_duration("250ms"), Some(250_000_000));
        assert_eq!(parse_go_duration("2m"), Some(120 * NANOS_PER_SEC));
        assert_eq!(parse_go_duration("1h"), Some(3600 * NANOS_PER_SEC));
        assert_eq!(parse_go_duration("1m30s"), Some(90 * NANOS_PER_SEC));
        assert_eq!(parse_go_duration("1.5s"), Some(NANOS_PER_SEC + 500_000_000));
    }

    #[test]
    fn test_parse_go_duration_rejects_garbage() {
        assert_eq!(parse_go_duration(""), None);
        assert_eq!(parse_go_duration("10"), None);
        assert_eq!(parse_go_duration("s"), None);
        assert_eq!(parse_go_duration("10x"), None);
        assert_eq!(parse_go_duration("ten seconds"), None);
    }

    fn check(interval: &str, timeout: &str, deregister: &str) -> CatalogHealthCheck {
        CatalogHealthCheck {
            check_id: "db-check".to_string(),
            name: "db".to_string(),
            status: "passing".to_string(),
            definition: HealthCheckDefinition {
                tcp: "10.0.0.1:5432".to_string(),
                interval_duration: interval.to_string(),
                timeout_duration: timeout.to_string(),
                deregister_critical_service_after_duration: deregister.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn registration() -> CatalogRegistration {
        CatalogRegistration::new(
            "db",
            CatalogRegistrationSpec {
                id: "node-1".to_string(),
                node: "external-db".to_string(),
                address: "10.0.0.1".to_string(),
                service: CatalogService {
                    id: "db-1".to_string(),
                    name: "db".to_string(),
                    port: 5432,
                    namespace: "data".to_string(),
                    ..Default::default()
                },
                health_check: Some(check("10s", "5s", "1m")),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_to_catalog_registration() {
        let payload = registration().to_catalog_registration().unwrap();
        assert_eq!(payload.node, "external-db");
        assert_eq!(payload.service.service, "db");
        let check = payload.check.unwrap();
        assert_eq!(check.definition.interval_duration, 10 * NANOS_PER_SEC);
        assert_eq!(check.definition.timeout_duration, 5 * NANOS_PER_SEC);
        assert_eq!(
            check.definition.deregister_critical_service_after_duration,
            60 * NANOS_PER_SEC
        );
    }

    #[test]
    fn test_each_duration_maps_to_named_error() {
        let mut reg = registration();
        reg.spec.health_check = Some(check("bad", "5s", "1m"));
        assert_eq!(
            reg.to_catalog_registration().unwrap_err(),
            RegistrationError::InvalidInterval
        );

        reg.spec.health_check = Some(check("10s", "bad", "1m"));
        assert_eq!(
            reg.to_catalog_registration().unwrap_err(),
            RegistrationError::InvalidTimeout
        );

        reg.spec.health_check = Some(check("10s", "5s", "bad"));
        assert_eq!(
            reg.to_catalog_registration().unwrap_err(),
            RegistrationError::InvalidDeregisterAfter
        );
    }

    #[test]
    fn test_to_catalog_deregistration() {
        let payload = registration().to_catalog_deregistration();
        assert_eq!(payload.node, "external-db");
        assert_eq!(payload.service_id, "db-1");
        assert_eq!(payload.check_id, "db-check");
        assert_eq!(payload.namespace, "data");
    }

    #[test]
    fn test_equal_except_status() {
        let a = registration();
        let mut b = registration();
        assert!(equal_except_status(&a, &b));

        b.spec.service.port = 5433;
        assert!(!equal_except_status(&a, &b));
    }

    fn link(registration: Option<LinkedRegistration>) -> CatalogServiceLink {
        CatalogServiceLink::new("db-link", CatalogServiceLinkSpec { registration })
    }

    #[test]
    fn test_service_link_requires_registration() {
        let err = validate_service_link(&link(None)).unwrap_err();
        assert_eq!(err.errors[0].message, "registration must be defined");
    }

    #[test]
    fn test_service_link_requires_node_and_service_name() {
        let err = validate_service_link(&link(Some(LinkedRegistration::default()))).unwrap_err();
        assert_eq!(err.errors[0].path.to_string(), "spec.service.node");

        let mut registration = LinkedRegistration {
            node: "external".to_string(),
            ..Default::default()
        };
        let err = validate_service_link(&link(Some(registration.clone()))).unwrap_err();
        assert_eq!(err.errors[0].path.to_string(), "spec.service.service.name");

        registration.service.name = "db".to_string();
        assert!(validate_service_link(&link(Some(registration))).is_ok());
    }

    #[test]
    fn test_service_link_conversion() {
        let registration = LinkedRegistration {
            node: "external".to_string(),
            address: "10.0.0.2".to_string(),
            service: CatalogService {
                id: "db-1".to_string(),
                name: "db".to_string(),
                port: 5432,
                ..Default::default()
            },
            ..Default::default()
        };
        let link = link(Some(registration));
        let payload = link.to_catalog_registration().unwrap();
        assert_eq!(payload.node, "external");
        assert!(payload.check.is_none());

        let dereg = link.to_catalog_deregistration();
        assert_eq!(dereg.service_id, "db-1");
    }
}
