//! Capability types.
//!
//! A capability is one access permission the host platform must grant before
//! the launcher may hand anything to the native runtime. The list of required
//! capabilities is fixed at startup and its declaration order is the order in
//! which they are requested.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for a capability.
///
/// Example: CapabilityId("write-external-storage")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId(pub String);

impl CapabilityId {
    /// Construct an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single capability the launcher requires.
///
/// `request_code` correlates the asynchronous grant/deny callback with the
/// capability that triggered the prompt. Grant state is deliberately absent:
/// it is always queried live from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Identifier used in logs and denial reports.
    pub id: CapabilityId,
    /// The platform permission string, e.g. "android.permission.READ_EXTERNAL_STORAGE".
    pub permission: String,
    /// Code passed with the request and echoed back by the host callback.
    pub request_code: u32,
}

impl Capability {
    pub fn new(id: impl Into<String>, permission: impl Into<String>, request_code: u32) -> Self {
        Self {
            id: CapabilityId::new(id),
            permission: permission.into(),
            request_code,
        }
    }

    /// The capabilities a sample host needs when nothing else is configured:
    /// shared storage write, then shared storage read.
    pub fn storage_defaults() -> Vec<Capability> {
        vec![
            Capability::new(
                "write-external-storage",
                "android.permission.WRITE_EXTERNAL_STORAGE",
                1,
            ),
            Capability::new(
                "read-external-storage",
                "android.permission.READ_EXTERNAL_STORAGE",
                2,
            ),
        ]
    }
}
