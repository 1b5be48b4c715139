//! Core synchronization engine for Meshsync resources
//!
//! This library provides:
//! - Cross-field validation with aggregated, path-qualified errors
//! - Destination namespace defaulting under enterprise capability flags
//! - Translation of resource specs into mesh config entries
//! - Equivalence checking between a spec and a live config entry
//! - The single-slot Synced condition tracker

pub mod capabilities;
pub mod catalog;
pub mod entry;
pub mod error;
pub mod kinds;
pub mod path;
pub mod resource;
pub mod rules;
pub mod status;

pub use capabilities::Capabilities;
pub use catalog::{
    CatalogDeregistrationPayload, CatalogRegistrationPayload, CatalogResource,
};
pub use entry::{ConfigEntry, EntryKind};
pub use error::{FieldError, InvalidResourceError, RegistrationError};
pub use path::FieldPath;
pub use resource::ConfigEntryResource;
pub use status::SyncStatus;
