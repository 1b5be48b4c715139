//! Per-kind sync behavior: validation rules, namespace defaulting and
//! translation to config entries
mod exported_services;
mod ingress_gateway;
mod rate_limit;
mod sameness_group;
mod terminating_gateway;
