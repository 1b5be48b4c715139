use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// IngressGateway configures the listeners of an ingress gateway and the
/// services each listener forwards traffic to
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "meshsync.dev",
    version = "v1alpha1",
    kind = "IngressGateway",
    plural = "ingressgateways",
    derive = "Default",
    derive = "PartialEq",
    status = "Status",
    printcolumn = r#"{"name":"Synced","type":"string","jsonPath":".status.conditions[?(@.type==\"Synced\")].status"}"#,
    printcolumn = r#"{"name":"Last Synced","type":"date","jsonPath":".status.lastSyncedTime"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct IngressGatewaySpec {
    /// TLS holds the TLS configuration for this gateway.
    #[serde(default)]
    pub tls: GatewayTls,

    /// Listeners declares what ports the ingress gateway should listen on
    /// and what services to associate with those ports.
    #[serde(default)]
    pub listeners: Vec<IngressListener>,

    /// Defaults is the default upstream limit configuration applied to all
    /// services on all listeners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<ServiceLimits>,
}

/// TLS configuration for a gateway or a single listener.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTls {
    /// Indicates that TLS should be enabled for this gateway.
    #[serde(default)]
    pub enabled: bool,

    /// SDS allows configuring the TLS certificate from an SDS service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sds: Option<GatewayTlsSds>,

    /// Minimum TLS version supported. One of `TLS_AUTO`, `TLSv1_0`,
    /// `TLSv1_1`, `TLSv1_2`, or `TLSv1_3`.
    #[serde(default, rename = "tlsMinVersion")]
    pub tls_min_version: String,

    /// Maximum TLS version supported. Must be greater than or equal to the
    /// minimum version.
    #[serde(default, rename = "tlsMaxVersion")]
    pub tls_max_version: String,

    /// Cipher suites to restrict connections negotiated via TLS 1.2 or
    /// earlier to.
    #[serde(default)]
    pub cipher_suites: Vec<String>,
}

/// SDS certificate source for a gateway.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTlsSds {
    /// ClusterName is the SDS cluster name to connect to.
    #[serde(default)]
    pub cluster_name: String,

    /// CertResource is the SDS resource name to request.
    #[serde(default)]
    pub cert_resource: String,
}

/// Per-service TLS overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayServiceTls {
    /// SDS allows configuring the TLS certificate from an SDS service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sds: Option<GatewayTlsSds>,
}

/// A listener on a specific port of the ingress gateway.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressListener {
    /// Port on which the ingress gateway should listen for traffic.
    #[serde(default)]
    pub port: u16,

    /// Protocol this listener is expected to receive. Depending on the
    /// protocol a listener might support multiplexing services over a
    /// single port. One of (tcp | http | http2 | grpc).
    #[serde(default)]
    pub protocol: String,

    /// TLS config for this listener.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<GatewayTls>,

    /// Services declares the set of services the listener forwards
    /// traffic to. For "tcp" listeners only a single service is allowed.
    #[serde(default)]
    pub services: Vec<IngressService>,
}

/// A service exposed on an ingress listener.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressService {
    /// Name of the service traffic should be forwarded to, or the wildcard
    /// specifier "*" to forward to all services. The wildcard requires an
    /// "http" listener.
    #[serde(default)]
    pub name: String,

    /// Hostnames routed to this service by matching the Host header.
    /// Only allowed on layer 7 protocols and never with the wildcard
    /// specifier.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Namespace where the service is located.
    /// Namespacing is an enterprise feature.
    #[serde(default)]
    pub namespace: String,

    /// Admin partition where the service is located.
    /// Partitioning is an enterprise feature.
    #[serde(default)]
    pub partition: String,

    /// TLS configuration scoped to this service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<GatewayServiceTls>,

    /// Request header manipulation rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<HttpHeaderModifiers>,

    /// Response header manipulation rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<HttpHeaderModifiers>,

    /// Upstream limits for this service, overriding the gateway defaults.
    #[serde(flatten)]
    pub limits: ServiceLimits,
}

/// Upstream connection limits.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLimits {
    /// Maximum number of connections a service instance may establish
    /// against the upstream. Limits HTTP/1.1 traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    /// Maximum number of requests queued while waiting for a connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pending_requests: Option<u32>,

    /// Maximum number of concurrent requests at a single point in time.
    /// Limits HTTP/2 traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_requests: Option<u32>,

    /// Passive health check configuration for removing upstream instances
    /// from the load balancing pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passive_health_check: Option<PassiveHealthCheck>,
}

/// Passive health check configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassiveHealthCheck {
    /// Time between checks, as a duration string (e.g. "10s").
    #[serde(default)]
    pub interval: String,

    /// Consecutive failures before an instance is ejected.
    #[serde(default)]
    pub max_failures: u32,

    /// Errors before a consecutive-5xx ejection occurs.
    #[serde(rename = "enforcingConsecutive5xx", skip_serializing_if = "Option::is_none")]
    pub enforcing_consecutive_5xx: Option<u32>,
}

/// HTTP header modification rules applied by the gateway.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeaderModifiers {
    /// Headers appended to the request or response, allowing duplicates.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub add: BTreeMap<String, String>,

    /// Headers set on the request or response, overwriting existing values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<String, String>,

    /// Header names stripped from the request or response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}
