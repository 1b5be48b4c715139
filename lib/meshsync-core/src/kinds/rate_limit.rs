use meshsync_api::v1alpha1::{RateLimitPolicy, ReadWriteRates};

use crate::capabilities::Capabilities;
use crate::entry::{provenance, ConfigEntry, EntryKind, RateLimitEntry, RatePairEntry};
use crate::error::InvalidResourceError;
use crate::path::FieldPath;
use crate::resource::ConfigEntryResource;
use crate::rules::{check_rates, ErrorList};

fn rate_pair(rates: &Option<ReadWriteRates>) -> Option<RatePairEntry> {
    rates.as_ref().map(|r| RatePairEntry {
        read_rate: r.read_rate,
        write_rate: r.write_rate,
    })
}

fn check_optional_rates(errors: &mut ErrorList, path: FieldPath, rates: &Option<ReadWriteRates>) {
    if let Some(rates) = rates {
        check_rates(errors, &path, rates.read_rate, rates.write_rate);
    }
}

impl ConfigEntryResource for RateLimitPolicy {
    fn entry_kind(&self) -> EntryKind {
        EntryKind::RateLimit
    }

    fn entry_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    fn kube_kind(&self) -> &'static str {
        "ratelimitpolicy"
    }

    fn validate(&self, _caps: &Capabilities) -> Result<(), InvalidResourceError> {
        let mut errors = ErrorList::new();
        let path = FieldPath::new("spec");

        let spec = &self.spec;
        if !matches!(spec.mode.as_str(), "permissive" | "enforcing" | "disabled") {
            errors.push(
                path.child("mode"),
                &spec.mode,
                "mode must be one of: permissive, enforcing, disabled",
            );
        }

        check_rates(&mut errors, &path, spec.rates.read_rate, spec.rates.write_rate);
        check_optional_rates(&mut errors, path.child("acl"), &spec.acl);
        check_optional_rates(&mut errors, path.child("catalog"), &spec.catalog);
        check_optional_rates(&mut errors, path.child("configEntry"), &spec.config_entry);
        check_optional_rates(&mut errors, path.child("connectCA"), &spec.connect_ca);
        check_optional_rates(&mut errors, path.child("coordinate"), &spec.coordinate);
        check_optional_rates(&mut errors, path.child("discoveryChain"), &spec.discovery_chain);
        check_optional_rates(&mut errors, path.child("health"), &spec.health);
        check_optional_rates(&mut errors, path.child("intention"), &spec.intention);
        check_optional_rates(&mut errors, path.child("kv"), &spec.kv);
        check_optional_rates(&mut errors, path.child("tenancy"), &spec.tenancy);
        check_optional_rates(&mut errors, path.child("preparedQuery"), &spec.prepared_query);
        check_optional_rates(&mut errors, path.child("session"), &spec.session);
        check_optional_rates(&mut errors, path.child("txn"), &spec.txn);

        errors.into_result(self.kube_kind(), self.entry_name())
    }

    fn to_entry(&self, datacenter: &str) -> ConfigEntry {
        let spec = &self.spec;
        ConfigEntry::RateLimit(RateLimitEntry {
            name: self.entry_name().to_string(),
            mode: spec.mode.clone(),
            read_rate: spec.rates.read_rate,
            write_rate: spec.rates.write_rate,
            acl: rate_pair(&spec.acl),
            catalog: rate_pair(&spec.catalog),
            config_entry: rate_pair(&spec.config_entry),
            connect_ca: rate_pair(&spec.connect_ca),
            coordinate: rate_pair(&spec.coordinate),
            discovery_chain: rate_pair(&spec.discovery_chain),
            health: rate_pair(&spec.health),
            intention: rate_pair(&spec.intention),
            kv: rate_pair(&spec.kv),
            tenancy: rate_pair(&spec.tenancy),
            prepared_query: rate_pair(&spec.prepared_query),
            session: rate_pair(&spec.session),
            txn: rate_pair(&spec.txn),
            meta: provenance(datacenter),
            ..Default::default()
        })
    }
}
