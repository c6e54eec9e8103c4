//! Sequential permission acquisition.
//!
//! The host platform cannot show two permission prompts at once, so the
//! chainer issues at most one request and then yields. It is re-entered
//! through `on_permission_result` when the host reports the user's answer,
//! re-scans the ledger from the top, and either issues the next request or
//! reports the final status.
//!
//! Scan algorithm, in declaration order:
//!
//! 1. Granted capabilities are skipped.
//! 2. The first ungranted capability that has not been requested yet is
//!    requested, and the scan stops with `AwaitingPermission`.
//! 3. Ungranted capabilities that were already requested are collected as
//!    missing and the scan continues, so the user sees every denial.
//! 4. With nothing missing the result is `AllGranted`.
//! 5. Otherwise every requested flag is reset (so a later attempt
//!    re-prompts from the top) and the result is `Denied`.

use tracing::{debug, info, warn};

use launchpad_contracts::capability::{Capability, CapabilityId};

use crate::ledger::PermissionLedger;

/// Where the chain stands after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStatus {
    /// A prompt for this capability is outstanding.
    AwaitingPermission(Capability),
    /// Every capability is granted.
    AllGranted,
    /// Every capability was requested and these are still ungranted.
    Denied(Vec<CapabilityId>),
}

/// Drives capability requests one at a time over a `PermissionLedger`.
pub struct PermissionChainer {
    ledger: PermissionLedger,
    outstanding: Option<Capability>,
}

impl PermissionChainer {
    pub fn new(ledger: PermissionLedger) -> Self {
        Self { ledger, outstanding: None }
    }

    pub fn ledger(&self) -> &PermissionLedger {
        &self.ledger
    }

    /// The capability whose prompt has not been answered yet, if any.
    pub fn outstanding(&self) -> Option<&Capability> {
        self.outstanding.as_ref()
    }

    /// True if every capability is granted right now. Issues nothing.
    pub fn all_granted(&self) -> bool {
        self.ledger.all_granted()
    }

    /// Scan the ledger and advance the chain by at most one request.
    ///
    /// While a prompt is outstanding this never issues another one; it
    /// reports the outstanding capability again instead. An outstanding
    /// prompt whose capability became granted in the meantime is treated as
    /// answered.
    pub fn advance(&mut self) -> ChainStatus {
        if let Some(pending) = &self.outstanding {
            if !self.ledger.is_granted(pending) {
                debug!(
                    capability = %pending.id,
                    request_code = pending.request_code,
                    "permission prompt still outstanding"
                );
                return ChainStatus::AwaitingPermission(pending.clone());
            }
            self.outstanding = None;
        }

        let mut missing = Vec::new();
        let mut next = None;

        for capability in self.ledger.capabilities() {
            if self.ledger.is_granted(capability) {
                continue;
            }
            if !self.ledger.is_requested(&capability.id) {
                next = Some(capability.clone());
                break;
            }
            debug!(capability = %capability.id, "capability requested but not granted");
            missing.push(capability.id.clone());
        }

        if let Some(capability) = next {
            info!(
                capability = %capability.id,
                permission = %capability.permission,
                request_code = capability.request_code,
                "requesting permission"
            );
            self.ledger.mark_requested(&capability.id);
            self.ledger.access().request(&capability);
            self.outstanding = Some(capability.clone());
            return ChainStatus::AwaitingPermission(capability);
        }

        if missing.is_empty() {
            debug!(count = self.ledger.len(), "all permissions granted");
            return ChainStatus::AllGranted;
        }

        warn!(
            missing = missing.len(),
            "permission chain finished with denials; resetting request state"
        );
        self.ledger.reset_all();
        ChainStatus::Denied(missing)
    }

    /// Handle the host's grant/deny callback for `request_code`.
    ///
    /// The callback only releases the outstanding prompt when its code
    /// matches; the decision itself is always re-read from the ledger. A
    /// callback for any other code is stale and cannot release the prompt.
    pub fn on_permission_result(&mut self, request_code: u32) -> ChainStatus {
        let answered = self.ledger.find_by_code(request_code).map(|c| c.id.clone());
        match (answered, &self.outstanding) {
            (None, _) => {
                debug!(request_code, "ignoring callback for an unknown request code");
            }
            (Some(id), Some(pending)) if pending.id == id => {
                debug!(request_code, capability = %id, "permission prompt answered");
                self.outstanding = None;
            }
            (Some(id), Some(pending)) => {
                debug!(
                    request_code,
                    capability = %id,
                    outstanding = %pending.id,
                    "ignoring stale permission callback"
                );
            }
            (Some(id), None) => {
                debug!(request_code, capability = %id, "permission callback with no prompt outstanding");
            }
        }
        self.advance()
    }
}
