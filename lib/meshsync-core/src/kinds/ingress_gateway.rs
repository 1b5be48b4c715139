use meshsync_api::v1alpha1::{
    GatewayServiceTls, GatewayTls, GatewayTlsSds, HttpHeaderModifiers, IngressGateway,
    IngressListener, IngressService, PassiveHealthCheck, ServiceLimits,
};

use crate::capabilities::Capabilities;
use crate::entry::{
    normalize_empty_to_default, provenance, ConfigEntry, EntryKind, GatewayServiceTlsEntry, GatewayTlsEntry,
    GatewayTlsSdsEntry, HeaderModifiersEntry, IngressGatewayEntry, IngressListenerEntry,
    IngressServiceEntry, PassiveHealthCheckEntry, ServiceLimitsEntry,
};
use crate::error::InvalidResourceError;
use crate::path::FieldPath;
use crate::resource::ConfigEntryResource;
use crate::rules::{check_in_set, ErrorList, WILDCARD};

const TLS_VERSIONS: &[&str] = &["TLS_AUTO", "TLSv1_0", "TLSv1_1", "TLSv1_2", "TLSv1_3", ""];
const PROTOCOLS: &[&str] = &["tcp", "http", "http2", "grpc"];

fn validate_tls(errors: &mut ErrorList, path: FieldPath, tls: &GatewayTls) {
    check_in_set(errors, path.child("tlsMaxVersion"), &tls.tls_max_version, TLS_VERSIONS);
    check_in_set(errors, path.child("tlsMinVersion"), &tls.tls_min_version, TLS_VERSIONS);
}

fn validate_listener(
    errors: &mut ErrorList,
    path: FieldPath,
    listener: &IngressListener,
    caps: &Capabilities,
) {
    check_in_set(errors, path.child("protocol"), &listener.protocol, PROTOCOLS);

    if listener.protocol == "tcp" && listener.services.len() > 1 {
        errors.push(
            path.child("services"),
            &listener.services,
            format!(
                "if protocol is \"tcp\", only a single service is allowed, found {}",
                listener.services.len()
            ),
        );
    }

    if let Some(tls) = &listener.tls {
        validate_tls(errors, path.child("tls"), tls);
    }

    for (i, service) in listener.services.iter().enumerate() {
        let service_path = path.child("services").index(i);
        if service.name == WILDCARD && listener.protocol != "http" {
            errors.push(
                service_path.child("name"),
                &service.name,
                format!(
                    "if name is \"{}\", protocol must be \"http\" but was \"{}\"",
                    WILDCARD, listener.protocol
                ),
            );
        }
        if service.name == WILDCARD && !service.hosts.is_empty() {
            errors.push(
                service_path.child("hosts"),
                &service.hosts,
                format!("hosts must be empty if name is \"{}\"", WILDCARD),
            );
        }
        if !service.partition.is_empty() && !caps.partitions_enabled {
            errors.push(
                service_path.child("partition"),
                &service.partition,
                "admin partitions must be enabled to set service.partition",
            );
        }
        if !service.namespace.is_empty() && !caps.namespaces_enabled {
            errors.push(
                service_path.child("namespace"),
                &service.namespace,
                "namespaces must be enabled to set service.namespace",
            );
        }
        if !service.hosts.is_empty() && listener.protocol == "tcp" {
            errors.push(
                service_path.child("hosts"),
                &service.hosts,
                "hosts must be empty if protocol is \"tcp\"",
            );
        }
        validate_limits(errors, &path, &service.limits);
    }
}

fn validate_limits(errors: &mut ErrorList, path: &FieldPath, limits: &ServiceLimits) {
    if limits.max_connections == Some(0) {
        errors.push(path.child("maxconnections"), &0, "MaxConnections must be > 0");
    }
    if limits.max_concurrent_requests == Some(0) {
        errors.push(
            path.child("maxconcurrentrequests"),
            &0,
            "MaxConcurrentRequests must be > 0",
        );
    }
    if limits.max_pending_requests == Some(0) {
        errors.push(
            path.child("maxpendingrequests"),
            &0,
            "MaxPendingRequests must be > 0",
        );
    }
}

fn tls_entry(tls: &GatewayTls) -> GatewayTlsEntry {
    GatewayTlsEntry {
        enabled: tls.enabled,
        sds: tls.sds.as_ref().map(sds_entry),
        tls_min_version: tls.tls_min_version.clone(),
        tls_max_version: tls.tls_max_version.clone(),
        cipher_suites: tls.cipher_suites.clone(),
    }
}

fn sds_entry(sds: &GatewayTlsSds) -> GatewayTlsSdsEntry {
    GatewayTlsSdsEntry {
        cluster_name: sds.cluster_name.clone(),
        cert_resource: sds.cert_resource.clone(),
    }
}

fn service_tls_entry(tls: &GatewayServiceTls) -> GatewayServiceTlsEntry {
    GatewayServiceTlsEntry {
        sds: tls.sds.as_ref().map(sds_entry),
    }
}

fn headers_entry(headers: &HttpHeaderModifiers) -> HeaderModifiersEntry {
    HeaderModifiersEntry {
        add: headers.add.clone(),
        set: headers.set.clone(),
        remove: headers.remove.clone(),
    }
}

fn passive_check_entry(check: &PassiveHealthCheck) -> PassiveHealthCheckEntry {
    PassiveHealthCheckEntry {
        interval: check.interval.clone(),
        max_failures: check.max_failures,
        enforcing_consecutive_5xx: check.enforcing_consecutive_5xx,
    }
}

fn limits_entry(limits: &ServiceLimits) -> ServiceLimitsEntry {
    ServiceLimitsEntry {
        max_connections: limits.max_connections,
        max_pending_requests: limits.max_pending_requests,
        max_concurrent_requests: limits.max_concurrent_requests,
        passive_health_check: limits.passive_health_check.as_ref().map(passive_check_entry),
    }
}

fn service_entry(service: &IngressService) -> IngressServiceEntry {
    IngressServiceEntry {
        name: service.name.clone(),
        hosts: service.hosts.clone(),
        namespace: service.namespace.clone(),
        partition: service.partition.clone(),
        tls: service.tls.as_ref().map(service_tls_entry),
        request_headers: service.request_headers.as_ref().map(headers_entry),
        response_headers: service.response_headers.as_ref().map(headers_entry),
        max_connections: service.limits.max_connections,
        max_pending_requests: service.limits.max_pending_requests,
        max_concurrent_requests: service.limits.max_concurrent_requests,
        passive_health_check: service
            .limits
            .passive_health_check
            .as_ref()
            .map(passive_check_entry),
    }
}

impl ConfigEntryResource for IngressGateway {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::IngressGateway
    }

    fn entry_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn kube_kind(&self) -> &'static str {
        "ingressgateway"
    }

    fn validate(&self, caps: &Capabilities) -> Result<(), InvalidResourceError> {
        let mut errors = ErrorList::new();
        let path = FieldPath::new("spec");

        validate_tls(&mut errors, path.child("tls"), &self.spec.tls);
        for (i, listener) in self.spec.listeners.iter().enumerate() {
            validate_listener(&mut errors, path.child("listeners").index(i), listener, caps);
        }
        if let Some(defaults) = &self.spec.defaults {
            validate_limits(&mut errors, &path.child("defaults"), defaults);
        }

        errors.into_result(self.kube_kind(), self.entry_name())
    }

    fn default_namespace_fields(&mut self, caps: &Capabilities) {
        if !caps.namespaces_enabled {
            return;
        }
        let resource_namespace = self.metadata.namespace.clone().unwrap_or_default();
        let namespace = caps.resolve_namespace(&resource_namespace);
        for listener in &mut self.spec.listeners {
            for service in &mut listener.services {
                if service.namespace.is_empty() {
                    service.namespace = namespace.clone();
                }
            }
        }
    }

    fn to_entry(&self, datacenter: &str) -> ConfigEntry {
        ConfigEntry::IngressGateway(IngressGatewayEntry {
            name: self.entry_name().to_string(),
            tls: tls_entry(&self.spec.tls),
            listeners: self
                .spec
                .listeners
                .iter()
                .map(|listener| IngressListenerEntry {
                    port: listener.port,
                    protocol: listener.protocol.clone(),
                    tls: listener.tls.as_ref().map(tls_entry),
                    services: listener.services.iter().map(service_entry).collect(),
                })
                .collect(),
            defaults: self.spec.defaults.as_ref().map(limits_entry),
            meta: provenance(datacenter),
            ..Default::default()
        })
    }

    /// The server back-fills service namespaces and partitions with
    /// "default"; treat the empty string the same way on both sides.
    fn normalize(&self, entry: &mut ConfigEntry) {
        if let ConfigEntry::IngressGateway(entry) = entry {
            for listener in &mut entry.listeners {
                for service in &mut listener.services {
                    normalize_empty_to_default(&mut service.namespace);
                    normalize_empty_to_default(&mut service.partition);
                }
            }
        }
    }
}
