//! The contract every synced config-entry resource fulfils
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::entry::{ConfigEntry, EntryKind};
use crate::error::InvalidResourceError;

/// A Kubernetes resource that translates to a mesh config entry.
///
/// Implementations supply the kind discriminator, validation, namespace
/// defaulting, and translation; equivalence checking is derived from those
/// and normally left as the provided method.
pub trait ConfigEntryResource {
    /// The config entry kind this resource translates to.
    fn entry_kind(&self) -> EntryKind;

    /// The Kubernetes name of the resource, which becomes the entry name.
    fn entry_name(&self) -> &str;

    /// Lowercase Kubernetes kind, used to qualify validation errors.
    fn kube_kind(&self) -> &'static str;

    /// Check every cross-field rule, aggregating all violations.
    fn validate(&self, caps: &Capabilities) -> Result<(), InvalidResourceError>;

    /// Fill empty destination namespace fields from the capability
    /// configuration. Kinds without namespace fields leave this as a no-op.
    fn default_namespace_fields(&mut self, _caps: &Capabilities) {}

    /// Translate the spec into the config entry written to the mesh,
    /// stamped with provenance meta for `datacenter`.
    fn to_entry(&self, datacenter: &str) -> ConfigEntry;

    /// Kind-specific cleanup applied to both sides before comparison, for
    /// fields the server rewrites on read-back.
    fn normalize(&self, _entry: &mut ConfigEntry) {}

    /// Whether the live `entry` matches what this resource would produce,
    /// ignoring server-assigned fields on both sides.
    fn matches_entry(&self, entry: &ConfigEntry) -> bool {
        if entry.kind() != self.entry_kind() {
            debug!(
                expected = self.entry_kind().as_str(),
                found = entry.kind().as_str(),
                "config entry kind mismatch"
            );
            return false;
        }
        let mut ours = self.to_entry("");
        let mut theirs = entry.clone();
        ours.clear_volatile();
        theirs.clear_volatile();
        self.normalize(&mut ours);
        self.normalize(&mut theirs);
        ours == theirs
    }
}
