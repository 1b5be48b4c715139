/// API version v1alpha1 for Meshsync CRDs
pub mod catalog_registration;
pub mod catalog_service_link;
pub mod exported_services;
pub mod ingress_gateway;
pub mod rate_limit_policy;
pub mod sameness_group;
pub mod status;
pub mod terminating_gateway;

pub use catalog_registration::{
    CatalogHealthCheck, CatalogRegistration, CatalogRegistrationSpec, CatalogService,
    HealthCheckDefinition, Locality, ServiceAddress, ServiceWeights,
};
pub use catalog_service_link::{CatalogServiceLink, CatalogServiceLinkSpec, LinkedRegistration};
pub use exported_services::{
    ExportedService, ExportedServices, ExportedServicesSpec, ServiceConsumer,
};
pub use ingress_gateway::{
    GatewayServiceTls, GatewayTls, GatewayTlsSds, HttpHeaderModifiers, IngressGateway,
    IngressGatewaySpec, IngressListener, IngressService, PassiveHealthCheck, ServiceLimits,
};
pub use rate_limit_policy::{RateLimitPolicy, RateLimitPolicySpec, ReadWriteRates};
pub use sameness_group::{SamenessGroup, SamenessGroupMember, SamenessGroupSpec};
pub use status::{Condition, ConditionStatus, Status, CONDITION_SYNCED};
pub use terminating_gateway::{LinkedService, TerminatingGateway, TerminatingGatewaySpec};

/// API group for Meshsync resources
pub const API_GROUP: &str = "meshsync.dev";
/// API version for Meshsync resources
pub const API_VERSION: &str = "v1alpha1";
