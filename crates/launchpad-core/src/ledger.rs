//! Permission ledger: which capabilities have been asked for.
//!
//! The ledger caches only the "have we asked" flag. Whether a capability is
//! granted is answered by the host on every query.

use launchpad_contracts::capability::{Capability, CapabilityId};

use crate::traits::AccessControl;

struct LedgerEntry {
    capability: Capability,
    requested: bool,
}

/// The fixed, ordered list of required capabilities plus their request flags.
pub struct PermissionLedger {
    access: Box<dyn AccessControl>,
    entries: Vec<LedgerEntry>,
}

impl PermissionLedger {
    /// Create a ledger over `capabilities`, in the order they will be requested.
    pub fn new(access: Box<dyn AccessControl>, capabilities: Vec<Capability>) -> Self {
        let entries = capabilities
            .into_iter()
            .map(|capability| LedgerEntry { capability, requested: false })
            .collect();
        Self { access, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capabilities in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.entries.iter().map(|e| &e.capability)
    }

    /// Find the capability a host callback refers to.
    pub fn find_by_code(&self, request_code: u32) -> Option<&Capability> {
        self.capabilities().find(|c| c.request_code == request_code)
    }

    /// Ask the host whether `capability` is granted right now.
    pub fn is_granted(&self, capability: &Capability) -> bool {
        self.access.is_granted(&capability.permission)
    }

    /// True if every capability is granted. Vacuously true when empty.
    pub fn all_granted(&self) -> bool {
        self.capabilities().all(|c| self.is_granted(c))
    }

    pub fn is_requested(&self, id: &CapabilityId) -> bool {
        self.entries
            .iter()
            .any(|e| &e.capability.id == id && e.requested)
    }

    /// Set the requested flag. Returns false if `id` is not in the ledger.
    pub fn mark_requested(&mut self, id: &CapabilityId) -> bool {
        self.set_requested(id, true)
    }

    /// Clear the requested flag. Returns false if `id` is not in the ledger.
    pub fn mark_reset(&mut self, id: &CapabilityId) -> bool {
        self.set_requested(id, false)
    }

    /// Clear every requested flag so the next chain starts from the top.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.requested = false;
        }
    }

    pub(crate) fn access(&self) -> &dyn AccessControl {
        self.access.as_ref()
    }

    fn set_requested(&mut self, id: &CapabilityId, requested: bool) -> bool {
        match self.entries.iter_mut().find(|e| &e.capability.id == id) {
            Some(entry) => {
                entry.requested = requested;
                true
            }
            None => false,
        }
    }
}
