use crate::service_record::ServiceRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedService {
    pub internal_address: Ipv4Addr,
    pub name: Arc<str>,
}

/// External-to-internal lookup built from a single directory snapshot.
///
/// Lives for one rewrite decision. When two services claim the same external
/// address the one listed first in the snapshot wins.
#[derive(Debug, Clone, Default)]
pub struct AddressMapping {
    entries: HashMap<Ipv4Addr, MappedService>,
}

impl AddressMapping {
    pub fn from_records(records: &[ServiceRecord]) -> Self {
        let mut entries = HashMap::new();

        for record in records.iter().filter(|r| r.exposure_kind.is_rewritable()) {
            for external in &record.external_addresses {
                if let Entry::Vacant(slot) = entries.entry(*external) {
                    slot.insert(MappedService {
                        internal_address: record.internal_address,
                        name: Arc::clone(&record.name),
                    });
                }
            }
        }

        Self { entries }
    }

    pub fn lookup(&self, external: Ipv4Addr) -> Option<&MappedService> {
        self.entries.get(&external)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
