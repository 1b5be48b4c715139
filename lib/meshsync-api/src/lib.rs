//! Meshsync API types and CRDs for Kubernetes integration
//!
//! This library defines the custom resources synchronized into the mesh
//! control plane:
//! - RateLimitPolicy: Control-plane request rate limits
//! - ExportedServices: Services exported to other partitions and peers
//! - IngressGateway: Ingress gateway listener configuration
//! - TerminatingGateway: Services fronted by a terminating gateway
//! - SamenessGroup: Partitions and peers treated as identical
//! - CatalogRegistration: Direct catalog node/service registrations
//! - CatalogServiceLink: Links a catalog service to a terminating gateway

pub mod v1alpha1;

pub use v1alpha1::{
    CatalogRegistration, CatalogServiceLink, ExportedServices, IngressGateway, RateLimitPolicy,
    SamenessGroup, TerminatingGateway,
};
